use super::SubmissionService;
use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::submissions::entities::Submission;
use crate::policies::Operation;

/// 最新的提交在前
pub async fn list_mine(
    service: &SubmissionService,
    principal: &Principal,
) -> Result<Vec<Submission>> {
    service.access.check(Operation::ListMySubmissions, principal)?;

    let mut submissions = service
        .storage
        .list_submissions_by_student(&principal.subject)
        .await?;
    submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(submissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::services::submissions::test_support::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_lists_only_own_submissions() {
        let (assignments, submissions) = services(Default::default()).await;
        let t = teacher();
        let a1 = seed(&assignments, &t, "A1", "Math", Duration::days(2)).await;
        let a2 = seed(&assignments, &t, "A2", "Math", Duration::days(3)).await;
        let me = student();
        let other = student();

        for (who, id) in [(&me, &a1.id), (&me, &a2.id), (&other, &a1.id)] {
            submissions
                .submit(
                    who,
                    CreateSubmissionRequest {
                        assignment_id: id.to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let mine = submissions.list_mine(&me).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|s| s.student_id == me.subject));
    }

    #[tokio::test]
    async fn test_teacher_forbidden() {
        let (_, submissions) = services(Default::default()).await;
        let err = submissions.list_mine(&teacher()).await.unwrap_err();
        assert_eq!(err.code(), "E102");
    }
}
