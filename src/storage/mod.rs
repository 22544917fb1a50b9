use std::sync::Arc;

use crate::models::{
    AssignmentId, UserId,
    assignments::entities::{Assignment, AssignmentChanges, NewAssignment},
    submissions::entities::{NewSubmission, Submission},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 作业与提交记录的存储接口
///
/// 只负责读写，不做任何权限判断。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: &AssignmentId) -> Result<Option<Assignment>>;
    // 列出全部作业
    async fn list_all_assignments(&self) -> Result<Vec<Assignment>>;
    // 列出某个用户创建的作业
    async fn list_assignments_by_owner(&self, owner: &UserId) -> Result<Vec<Assignment>>;
    // 更新作业字段，不存在时返回 None
    async fn update_assignment(
        &self,
        id: &AssignmentId,
        changes: AssignmentChanges,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, id: &AssignmentId) -> Result<bool>;

    /// 提交管理方法
    // 创建提交
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    // 列出某个学生的全部提交
    async fn list_submissions_by_student(&self, student: &UserId) -> Result<Vec<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
