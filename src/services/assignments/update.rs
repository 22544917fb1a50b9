use tracing::info;

use super::AssignmentService;
use super::create::parse_student_ids;
use crate::errors::{Result, TrackerError};
use crate::models::AssignmentId;
use crate::models::assignments::entities::{Assignment, AssignmentChanges};
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::auth::entities::Principal;
use crate::policies::{Operation, ensure_owner_of_existing, parse_deadline};
use crate::utils::validate::{non_blank, validate_attachments, validate_max_score};

pub async fn update_assignment(
    service: &AssignmentService,
    principal: &Principal,
    id: &AssignmentId,
    req: UpdateAssignmentRequest,
) -> Result<Assignment> {
    service.access.check(Operation::UpdateAssignment, principal)?;

    // 不存在优先于归属判断
    let existing = service.storage.get_assignment_by_id(id).await?;
    ensure_owner_of_existing(principal, id, existing)?;

    let changes = AssignmentChanges {
        title: non_blank(req.title.as_deref(), "title")?,
        description: req.description.map(|d| d.trim().to_string()),
        deadline: match non_blank(req.deadline.as_deref(), "deadline")? {
            Some(raw) => Some(parse_deadline(&raw)?),
            None => None,
        },
        subject: non_blank(req.subject.as_deref(), "subject")?,
        max_score: req.max_score.map(validate_max_score).transpose()?,
        attachments: req
            .attachments
            .as_deref()
            .map(validate_attachments)
            .transpose()?,
        assigned_to: req
            .assigned_to
            .as_deref()
            .map(parse_student_ids)
            .transpose()?,
        updated_at: service.now(),
    };

    let updated = service
        .storage
        .update_assignment(id, changes)
        .await?
        // 校验与写入之间被删除
        .ok_or_else(|| TrackerError::not_found(format!("作业不存在: {id}")))?;

    info!("Assignment {} updated by {}", id, principal.subject);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assignments::test_support::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_owner_updates_selected_fields() {
        let (service, _) = service().await;
        let t = teacher();
        let created = seed(&service, &t, "Essay", "English", Duration::days(3)).await;

        let req = UpdateAssignmentRequest {
            title: Some("Essay v2".to_string()),
            deadline: Some("2025-04-01".to_string()),
            ..Default::default()
        };
        let updated = service.update_assignment(&t, &created.id, req).await.unwrap();

        assert_eq!(updated.title, "Essay v2");
        assert_eq!(updated.deadline.to_rfc3339(), "2025-04-01T00:00:00+00:00");
        assert_eq!(updated.subject, "English");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.created_by, t.subject);
    }

    #[tokio::test]
    async fn test_other_teacher_is_forbidden() {
        let (service, storage) = service().await;
        let t1 = teacher();
        let t2 = teacher();
        let created = seed(&service, &t2, "Lab", "Chemistry", Duration::days(3)).await;

        let req = UpdateAssignmentRequest {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let err = service
            .update_assignment(&t1, &created.id, req)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E102");

        let unchanged = storage
            .get_assignment_by_id(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.title, "Lab");
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let (service, _) = service().await;
        let err = service
            .update_assignment(
                &teacher(),
                &AssignmentId::generate(),
                UpdateAssignmentRequest::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E103");
    }

    #[tokio::test]
    async fn test_student_is_forbidden_before_lookup() {
        let (service, _) = service().await;
        let err = service
            .update_assignment(
                &student(),
                &AssignmentId::generate(),
                UpdateAssignmentRequest::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E102");
    }

    #[tokio::test]
    async fn test_invalid_fields() {
        let (service, _) = service().await;
        let t = teacher();
        let created = seed(&service, &t, "Essay", "English", Duration::days(3)).await;

        let blank_title = UpdateAssignmentRequest {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        let err = service
            .update_assignment(&t, &created.id, blank_title)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E105");

        let bad_deadline = UpdateAssignmentRequest {
            deadline: Some("someday".to_string()),
            ..Default::default()
        };
        let err = service
            .update_assignment(&t, &created.id, bad_deadline)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E104");
    }

    #[test]
    fn test_created_by_cannot_be_sent() {
        let body = r#"{"title":"x","created_by":"3f2b1c4e-0000-4000-8000-000000000000"}"#;
        assert!(serde_json::from_str::<UpdateAssignmentRequest>(body).is_err());
    }
}
