//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{Result, TrackerError};
use crate::models::{
    AssignmentId, UserId,
    assignments::entities::{Assignment, AssignmentChanges, NewAssignment},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

fn ids_to_json(ids: &[UserId]) -> Result<String> {
    let raw: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    Ok(serde_json::to_string(&raw)?)
}

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: NewAssignment) -> Result<Assignment> {
        let created_at = req.created_at.timestamp_millis();

        let model = ActiveModel {
            id: Set(AssignmentId::generate().to_string()),
            title: Set(req.title),
            description: Set(req.description),
            deadline: Set(req.deadline.timestamp_millis()),
            subject: Set(req.subject),
            max_score: Set(req.max_score),
            attachments: Set(serde_json::to_string(&req.attachments)?),
            created_by: Set(req.created_by.to_string()),
            assigned_to: Set(ids_to_json(&req.assigned_to)?),
            created_at: Set(created_at),
            updated_at: Set(created_at),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("创建作业失败: {e}")))?;

        result.into_assignment()
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: &AssignmentId) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("查询作业失败: {e}")))?;

        result.map(|m| m.into_assignment()).transpose()
    }

    /// 列出全部作业（按截止时间升序）
    pub async fn list_all_assignments_impl(&self) -> Result<Vec<Assignment>> {
        Assignments::find()
            .order_by_asc(Column::Deadline)
            .all(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("查询作业列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assignment())
            .collect()
    }

    /// 列出某个用户创建的作业（按截止时间升序）
    pub async fn list_assignments_by_owner_impl(&self, owner: &UserId) -> Result<Vec<Assignment>> {
        Assignments::find()
            .filter(Column::CreatedBy.eq(owner.as_str()))
            .order_by_asc(Column::Deadline)
            .all(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("查询作业列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assignment())
            .collect()
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        id: &AssignmentId,
        changes: AssignmentChanges,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("查询作业失败: {e}")))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(deadline) = changes.deadline {
            active.deadline = Set(deadline.timestamp_millis());
        }
        if let Some(subject) = changes.subject {
            active.subject = Set(subject);
        }
        if let Some(max_score) = changes.max_score {
            active.max_score = Set(max_score);
        }
        if let Some(attachments) = changes.attachments {
            active.attachments = Set(serde_json::to_string(&attachments)?);
        }
        if let Some(assigned_to) = changes.assigned_to {
            active.assigned_to = Set(ids_to_json(&assigned_to)?);
        }
        active.updated_at = Set(changes.updated_at.timestamp_millis());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("更新作业失败: {e}")))?;

        updated.into_assignment().map(Some)
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: &AssignmentId) -> Result<bool> {
        let result = Assignments::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use chrono::{Duration, TimeZone, Utc};

    fn new_assignment(owner: &UserId, title: &str, deadline_days: i64) -> NewAssignment {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();
        NewAssignment {
            title: title.to_string(),
            description: String::new(),
            deadline: now + Duration::days(deadline_days),
            subject: "Physics".to_string(),
            max_score: 100.0,
            attachments: vec!["https://example.com/sheet.pdf".to_string()],
            created_by: owner.clone(),
            assigned_to: vec![],
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = memory_storage().await;
        let owner = UserId::generate();
        let student = UserId::generate();
        let mut req = new_assignment(&owner, "Kinematics", 3);
        req.assigned_to = vec![student.clone()];

        let created = storage.create_assignment_impl(req.clone()).await.unwrap();
        assert_eq!(created.title, "Kinematics");
        assert_eq!(created.created_by, owner);
        assert_eq!(created.deadline, req.deadline);
        assert_eq!(created.assigned_to, vec![student]);
        assert_eq!(created.attachments, req.attachments);

        let fetched = storage
            .get_assignment_by_id_impl(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);

        let missing = storage
            .get_assignment_by_id_impl(&AssignmentId::generate())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_by_owner_sorted_by_deadline() {
        let storage = memory_storage().await;
        let t1 = UserId::generate();
        let t2 = UserId::generate();
        storage
            .create_assignment_impl(new_assignment(&t1, "Later", 5))
            .await
            .unwrap();
        storage
            .create_assignment_impl(new_assignment(&t1, "Sooner", 1))
            .await
            .unwrap();
        storage
            .create_assignment_impl(new_assignment(&t2, "Other", 2))
            .await
            .unwrap();

        let mine = storage.list_assignments_by_owner_impl(&t1).await.unwrap();
        let titles: Vec<_> = mine.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);

        let all = storage.list_all_assignments_impl().await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields_and_owner() {
        let storage = memory_storage().await;
        let owner = UserId::generate();
        let created = storage
            .create_assignment_impl(new_assignment(&owner, "Draft", 3))
            .await
            .unwrap();

        let later = created.created_at + Duration::hours(1);
        let updated = storage
            .update_assignment_impl(
                &created.id,
                AssignmentChanges {
                    title: Some("Final".to_string()),
                    updated_at: later,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.subject, created.subject);
        assert_eq!(updated.deadline, created.deadline);
        assert_eq!(updated.created_by, owner);
        assert_eq!(updated.updated_at, later);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let storage = memory_storage().await;
        let id = AssignmentId::generate();

        let updated = storage
            .update_assignment_impl(&id, AssignmentChanges::default())
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!storage.delete_assignment_impl(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = memory_storage().await;
        let created = storage
            .create_assignment_impl(new_assignment(&UserId::generate(), "Temp", 1))
            .await
            .unwrap();

        assert!(storage.delete_assignment_impl(&created.id).await.unwrap());
        assert!(
            storage
                .get_assignment_by_id_impl(&created.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
