use tracing::info;

use super::AssignmentService;
use crate::errors::{Result, TrackerError};
use crate::models::AssignmentId;
use crate::models::auth::entities::Principal;
use crate::policies::{Operation, ensure_owner_of_existing};

pub async fn delete_assignment(
    service: &AssignmentService,
    principal: &Principal,
    id: &AssignmentId,
) -> Result<()> {
    service.access.check(Operation::DeleteAssignment, principal)?;

    let existing = service.storage.get_assignment_by_id(id).await?;
    ensure_owner_of_existing(principal, id, existing)?;

    if !service.storage.delete_assignment(id).await? {
        return Err(TrackerError::not_found(format!("作业不存在: {id}")));
    }

    info!("Assignment {} deleted by {}", id, principal.subject);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assignments::test_support::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_owner_deletes() {
        let (service, storage) = service().await;
        let t = teacher();
        let created = seed(&service, &t, "Quiz", "Math", Duration::days(1)).await;

        service.delete_assignment(&t, &created.id).await.unwrap();
        assert!(
            storage
                .get_assignment_by_id(&created.id)
                .await
                .unwrap()
                .is_none()
        );

        // 再次删除返回不存在
        let err = service
            .delete_assignment(&t, &created.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E103");
    }

    #[tokio::test]
    async fn test_non_owner_and_student_forbidden() {
        let (service, storage) = service().await;
        let owner = teacher();
        let created = seed(&service, &owner, "Quiz", "Math", Duration::days(1)).await;

        let err = service
            .delete_assignment(&teacher(), &created.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E102");

        let err = service
            .delete_assignment(&student(), &created.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E102");

        assert!(
            storage
                .get_assignment_by_id(&created.id)
                .await
                .unwrap()
                .is_some()
        );
    }
}
