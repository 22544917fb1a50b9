use super::{AssignmentService, to_view};
use crate::errors::Result;
use crate::models::assignments::responses::AssignmentView;
use crate::models::auth::entities::Principal;
use crate::policies::{DeadlineWindow, Operation};

async fn list_in_window(
    service: &AssignmentService,
    principal: &Principal,
    window: DeadlineWindow,
) -> Result<Vec<AssignmentView>> {
    let now = service.now();
    let mut items: Vec<_> = service
        .visible_assignments(principal)
        .await?
        .into_iter()
        .filter(|a| window.contains(a.deadline, now))
        .collect();
    items.sort_by(|a, b| a.deadline.cmp(&b.deadline));

    Ok(items.into_iter().map(|a| to_view(a, now, None)).collect())
}

/// 未来 7 天内截止的作业，按截止时间升序
pub async fn list_upcoming(
    service: &AssignmentService,
    principal: &Principal,
) -> Result<Vec<AssignmentView>> {
    service.access.check(Operation::ListUpcoming, principal)?;
    list_in_window(service, principal, DeadlineWindow::UPCOMING).await
}

/// 尚未截止的作业，按截止时间升序
pub async fn list_open_deadlines(
    service: &AssignmentService,
    principal: &Principal,
) -> Result<Vec<AssignmentView>> {
    service.access.check(Operation::ListOpenDeadlines, principal)?;
    list_in_window(service, principal, DeadlineWindow::NOT_YET_DUE).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::DeadlineStatus;
    use crate::services::assignments::test_support::*;
    use chrono::Duration;

    fn titles(items: &[AssignmentView]) -> Vec<&str> {
        items.iter().map(|v| v.assignment.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_upcoming_window() {
        let (service, _) = service().await;
        let t = teacher();
        seed(&service, &t, "Week edge", "Math", Duration::days(7)).await;
        seed(&service, &t, "Now", "Math", Duration::zero()).await;
        seed(&service, &t, "Too far", "Math", Duration::days(7) + Duration::seconds(1)).await;
        seed(&service, &t, "Past", "Math", -Duration::seconds(1)).await;
        seed(&service, &t, "Tomorrow", "Math", Duration::days(1)).await;

        let items = service.list_upcoming(&student()).await.unwrap();
        assert_eq!(titles(&items), vec!["Now", "Tomorrow", "Week edge"]);
        assert_eq!(items[0].deadline_status, DeadlineStatus::DueToday);
        assert_eq!(items[1].deadline_status, DeadlineStatus::DueSoon);
        assert_eq!(items[2].deadline_status, DeadlineStatus::Upcoming);
    }

    #[tokio::test]
    async fn test_open_deadlines_have_no_upper_bound() {
        let (service, _) = service().await;
        let t = teacher();
        seed(&service, &t, "Next year", "Math", Duration::days(365)).await;
        seed(&service, &t, "Past", "Math", -Duration::days(1)).await;
        seed(&service, &t, "Soon", "Math", Duration::hours(2)).await;

        let items = service.list_open_deadlines(&student()).await.unwrap();
        assert_eq!(titles(&items), vec!["Soon", "Next year"]);
    }

    #[tokio::test]
    async fn test_teacher_cannot_query_deadlines() {
        let (service, _) = service().await;
        let t = teacher();
        assert_eq!(service.list_upcoming(&t).await.unwrap_err().code(), "E102");
        assert_eq!(
            service.list_open_deadlines(&t).await.unwrap_err().code(),
            "E102"
        );
    }
}
