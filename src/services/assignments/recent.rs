use super::{AssignmentService, to_view};
use crate::errors::Result;
use crate::models::assignments::responses::AssignmentView;
use crate::models::auth::entities::Principal;
use crate::policies::Operation;

/// 最近发布的作业（按创建时间倒序）
pub async fn list_recent(
    service: &AssignmentService,
    principal: &Principal,
) -> Result<Vec<AssignmentView>> {
    service.access.check(Operation::ListRecent, principal)?;

    let now = service.now();
    let mut items = service.visible_assignments(principal).await?;
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(service.recent_limit);

    Ok(items.into_iter().map(|a| to_view(a, now, None)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use crate::models::assignments::entities::NewAssignment;
    use crate::policies::VisibilityPolicy;
    use crate::services::assignments::test_support::*;
    use chrono::Duration;

    fn published(
        owner: &UserId,
        title: &str,
        hours_ago: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> NewAssignment {
        NewAssignment {
            title: title.to_string(),
            description: String::new(),
            deadline: now + Duration::days(3),
            subject: "History".to_string(),
            max_score: 100.0,
            attachments: vec![],
            created_by: owner.clone(),
            assigned_to: vec![],
            created_at: now - Duration::hours(hours_ago),
        }
    }

    #[tokio::test]
    async fn test_returns_newest_five() {
        let (service, storage) = service().await;
        let owner = teacher().subject;
        for (i, title) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            storage
                .create_assignment(published(&owner, title, i as i64, service.now()))
                .await
                .unwrap();
        }

        let items = service.list_recent(&student()).await.unwrap();
        let titles: Vec<_> = items.iter().map(|v| v.assignment.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D", "E"]);
    }

    #[tokio::test]
    async fn test_respects_visibility_policy() {
        let (service, storage) = service_with(VisibilityPolicy::Assigned).await;
        let owner = teacher().subject;
        let me = student();

        let mut hidden = published(&owner, "Hidden", 0, service.now());
        hidden.assigned_to = vec![UserId::generate()];
        storage.create_assignment(hidden).await.unwrap();
        storage
            .create_assignment(published(&owner, "Visible", 1, service.now()))
            .await
            .unwrap();

        let items = service.list_recent(&me).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].assignment.title, "Visible");
    }

    #[tokio::test]
    async fn test_teacher_forbidden() {
        let (service, _) = service().await;
        let err = service.list_recent(&teacher()).await.unwrap_err();
        assert_eq!(err.code(), "E102");
    }
}
