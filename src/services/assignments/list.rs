use std::collections::BTreeSet;

use super::{AssignmentService, to_view};
use crate::errors::{Result, TrackerError};
use crate::models::assignments::requests::AssignmentListParams;
use crate::models::assignments::responses::AssignmentListResponse;
use crate::models::auth::entities::Principal;
use crate::policies::{AssignmentFilter, FilterContext, Operation, correlate};

pub async fn list_assignments(
    service: &AssignmentService,
    principal: &Principal,
    params: AssignmentListParams,
) -> Result<AssignmentListResponse> {
    service.access.check(Operation::ListAssignments, principal)?;

    let mut filter = AssignmentFilter::all()
        .text(params.search.as_deref().unwrap_or_default())
        .subject(params.subject.as_deref().unwrap_or_default());
    if let Some(category) = params.status {
        filter = filter.category(category);
    }

    if filter.requires_progress() && !principal.is_student() {
        return Err(TrackerError::validation_failed(
            "completed、pending、overdue 仅适用于学生",
        ));
    }

    let now = service.now();
    let mut visible = service.visible_assignments(principal).await?;
    visible.sort_by(|a, b| a.deadline.cmp(&b.deadline));

    let subjects: Vec<String> = visible
        .iter()
        .map(|a| a.subject.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // 学生视角附带完成状态
    let progress = if principal.is_student() {
        let submissions = service
            .storage
            .list_submissions_by_student(&principal.subject)
            .await?;
        Some(correlate(&principal.subject, &visible, &submissions, now))
    } else {
        None
    };

    let ctx = FilterContext {
        now,
        progress: progress.as_ref(),
    };
    let items = filter
        .apply(visible, &ctx)
        .into_iter()
        .map(|a| {
            let status = progress.as_ref().and_then(|p| p.status_of(&a.id));
            to_view(a, now, status)
        })
        .collect();

    Ok(AssignmentListResponse { items, subjects })
}
