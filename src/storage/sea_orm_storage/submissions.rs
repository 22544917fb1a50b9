//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{Result, TrackerError};
use crate::models::{
    SubmissionId, UserId,
    submissions::entities::{NewSubmission, Submission},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            id: Set(SubmissionId::generate().to_string()),
            assignment_id: Set(req.assignment_id.to_string()),
            student_id: Set(req.student_id.to_string()),
            submitted_at: Set(req.submitted_at.timestamp_millis()),
            status: Set(req.status.to_string()),
            grade: Set(req.grade),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                TrackerError::validation_failed("该作业已提交")
            }
            _ => TrackerError::database_operation(format!("创建提交失败: {e}")),
        })?;

        result.into_submission()
    }

    /// 列出学生的提交（最新的在前）
    pub async fn list_submissions_by_student_impl(&self, student: &UserId) -> Result<Vec<Submission>> {
        Submissions::find()
            .filter(Column::StudentId.eq(student.as_str()))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("查询提交列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_submission())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssignmentId;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_create_and_list_by_student() {
        let storage = memory_storage().await;
        let student = UserId::generate();
        let other = UserId::generate();
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();

        let first = storage
            .create_submission_impl(NewSubmission {
                assignment_id: AssignmentId::generate(),
                student_id: student.clone(),
                submitted_at: base,
                status: SubmissionStatus::Graded,
                grade: Some(88.5),
            })
            .await
            .unwrap();
        let second = storage
            .create_submission_impl(NewSubmission {
                assignment_id: AssignmentId::generate(),
                student_id: student.clone(),
                submitted_at: base + Duration::hours(1),
                status: SubmissionStatus::Submitted,
                grade: None,
            })
            .await
            .unwrap();
        storage
            .create_submission_impl(NewSubmission {
                assignment_id: first.assignment_id.clone(),
                student_id: other,
                submitted_at: base,
                status: SubmissionStatus::Submitted,
                grade: None,
            })
            .await
            .unwrap();

        let mine = storage
            .list_submissions_by_student_impl(&student)
            .await
            .unwrap();
        assert_eq!(mine, vec![second, first.clone()]);
        assert_eq!(first.status, SubmissionStatus::Graded);
        assert_eq!(first.grade, Some(88.5));
    }

    #[tokio::test]
    async fn test_second_submission_for_same_assignment_rejected() {
        let storage = memory_storage().await;
        let student = UserId::generate();
        let assignment = AssignmentId::generate();
        let submission = || NewSubmission {
            assignment_id: assignment.clone(),
            student_id: student.clone(),
            submitted_at: Utc::now(),
            status: SubmissionStatus::Submitted,
            grade: None,
        };

        storage.create_submission_impl(submission()).await.unwrap();
        let err = storage
            .create_submission_impl(submission())
            .await
            .unwrap_err();
        assert_eq!(err, TrackerError::validation_failed("该作业已提交"));

        let mine = storage
            .list_submissions_by_student_impl(&student)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
    }
}
