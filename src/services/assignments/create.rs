use tracing::info;

use super::AssignmentService;
use crate::errors::{Result, TrackerError};
use crate::models::UserId;
use crate::models::assignments::entities::{Assignment, NewAssignment};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::auth::entities::Principal;
use crate::policies::{Operation, parse_deadline};
use crate::utils::validate::{require_field, validate_attachments, validate_max_score};

const DEFAULT_MAX_SCORE: f64 = 100.0;

pub(crate) fn parse_student_ids(raw: &[String]) -> Result<Vec<UserId>> {
    let mut ids: Vec<UserId> = Vec::with_capacity(raw.len());
    for value in raw {
        let id =
            UserId::parse(value).map_err(|e| TrackerError::validation_failed(e.to_string()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

pub async fn create_assignment(
    service: &AssignmentService,
    principal: &Principal,
    req: CreateAssignmentRequest,
) -> Result<Assignment> {
    service.access.check(Operation::CreateAssignment, principal)?;

    // 必填项先于格式校验
    let title = require_field(req.title.as_deref(), "title")?;
    let deadline_raw = require_field(req.deadline.as_deref(), "deadline")?;
    let subject = require_field(req.subject.as_deref(), "subject")?;
    let deadline = parse_deadline(&deadline_raw)?;

    let max_score = validate_max_score(req.max_score.unwrap_or(DEFAULT_MAX_SCORE))?;
    let attachments = validate_attachments(req.attachments.as_deref().unwrap_or_default())?;
    let assigned_to = parse_student_ids(req.assigned_to.as_deref().unwrap_or_default())?;

    let assignment = service
        .storage
        .create_assignment(NewAssignment {
            title,
            description: req.description.unwrap_or_default().trim().to_string(),
            deadline,
            subject,
            max_score,
            attachments,
            // 创建者始终取自令牌主体
            created_by: principal.subject.clone(),
            assigned_to,
            created_at: service.now(),
        })
        .await?;

    info!("Assignment {} created by {}", assignment.id, principal.subject);
    Ok(assignment)
}
