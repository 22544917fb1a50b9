use super::AssignmentService;
use crate::errors::Result;
use crate::models::assignments::entities::ProgressStatus;
use crate::models::assignments::responses::{AssignmentProgress, StudentProgressResponse};
use crate::models::auth::entities::Principal;
use crate::policies::{Operation, correlate};

/// 学生在全部可见作业上的完成情况与统计
pub async fn student_progress(
    service: &AssignmentService,
    principal: &Principal,
) -> Result<StudentProgressResponse> {
    service.access.check(Operation::StudentProgress, principal)?;

    let now = service.now();
    let mut visible = service.visible_assignments(principal).await?;
    visible.sort_by(|a, b| a.deadline.cmp(&b.deadline));
    let submissions = service
        .storage
        .list_submissions_by_student(&principal.subject)
        .await?;

    let report = correlate(&principal.subject, &visible, &submissions, now);
    let items = visible
        .into_iter()
        .map(|a| AssignmentProgress {
            status: report.status_of(&a.id).unwrap_or(ProgressStatus::Pending),
            assignment_id: a.id,
            title: a.title,
            subject: a.subject,
            deadline: a.deadline,
        })
        .collect();

    Ok(StudentProgressResponse {
        stats: report.stats(),
        items,
    })
}
