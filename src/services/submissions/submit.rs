use tracing::info;

use super::SubmissionService;
use crate::errors::{Result, TrackerError};
use crate::models::AssignmentId;
use crate::models::auth::entities::Principal;
use crate::models::submissions::entities::{NewSubmission, Submission, SubmissionStatus};
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::policies::{AssignmentScope, Operation};

pub async fn submit(
    service: &SubmissionService,
    principal: &Principal,
    req: CreateSubmissionRequest,
) -> Result<Submission> {
    service.access.check(Operation::SubmitAssignment, principal)?;

    let assignment_id = AssignmentId::parse(&req.assignment_id)
        .map_err(|e| TrackerError::validation_failed(e.to_string()))?;

    // 不可见的作业按不存在处理
    let scope = AssignmentScope::for_principal(principal, service.visibility);
    let assignment = service
        .storage
        .get_assignment_by_id(&assignment_id)
        .await?
        .filter(|a| scope.matches(a))
        .ok_or_else(|| TrackerError::not_found(format!("作业不存在: {assignment_id}")))?;

    let already_submitted = service
        .storage
        .list_submissions_by_student(&principal.subject)
        .await?
        .iter()
        .any(|s| s.assignment_id == assignment.id);
    // 并发提交由存储层的唯一索引兜底
    if already_submitted {
        return Err(TrackerError::validation_failed("该作业已提交"));
    }

    let submission = service
        .storage
        .create_submission(NewSubmission {
            assignment_id: assignment.id,
            student_id: principal.subject.clone(),
            submitted_at: service.clock.now(),
            status: SubmissionStatus::Submitted,
            grade: None,
        })
        .await?;

    info!(
        "Submission {} created for assignment {} by {}",
        submission.id, submission.assignment_id, principal.subject
    );
    Ok(submission)
}
