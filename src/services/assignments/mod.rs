//! 作业服务
//!
//! 每个操作都以已认证的 `Principal` 为入口，依次执行角色门禁、
//! 归属校验或可见范围，再调用存储层。

pub mod create;
pub mod delete;
pub mod list;
pub mod progress;
pub mod recent;
pub mod update;
pub mod upcoming;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::models::AssignmentId;
use crate::models::assignments::entities::{Assignment, ProgressStatus};
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::assignments::responses::{
    AssignmentListResponse, AssignmentView, StudentProgressResponse,
};
use crate::models::auth::entities::Principal;
use crate::policies::{AccessControl, AssignmentScope, VisibilityPolicy, classify, days_left};
use crate::storage::Storage;
use crate::utils::Clock;

pub struct AssignmentService {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    access: Arc<AccessControl>,
    visibility: VisibilityPolicy,
    recent_limit: usize,
}

impl AssignmentService {
    pub fn new(
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
        access: Arc<AccessControl>,
        visibility: VisibilityPolicy,
        recent_limit: usize,
    ) -> Self {
        Self {
            storage,
            clock,
            access,
            visibility,
            recent_limit,
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// 读取主体可见的全部作业
    ///
    /// 教师只查询自己的作业；学生按策略查询后再次经过范围过滤。
    pub(crate) async fn visible_assignments(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Assignment>> {
        let scope = AssignmentScope::for_principal(principal, self.visibility);
        let assignments = match &scope {
            AssignmentScope::OwnedBy(owner) => {
                self.storage.list_assignments_by_owner(owner).await?
            }
            AssignmentScope::All | AssignmentScope::AssignedTo(_) => {
                self.storage.list_all_assignments().await?
            }
        };
        Ok(scope.apply(assignments))
    }

    pub async fn create_assignment(
        &self,
        principal: &Principal,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        create::create_assignment(self, principal, req).await
    }

    pub async fn list_assignments(
        &self,
        principal: &Principal,
        params: AssignmentListParams,
    ) -> Result<AssignmentListResponse> {
        list::list_assignments(self, principal, params).await
    }

    pub async fn update_assignment(
        &self,
        principal: &Principal,
        id: &AssignmentId,
        req: UpdateAssignmentRequest,
    ) -> Result<Assignment> {
        update::update_assignment(self, principal, id, req).await
    }

    pub async fn delete_assignment(&self, principal: &Principal, id: &AssignmentId) -> Result<()> {
        delete::delete_assignment(self, principal, id).await
    }

    pub async fn list_upcoming(&self, principal: &Principal) -> Result<Vec<AssignmentView>> {
        upcoming::list_upcoming(self, principal).await
    }

    pub async fn list_open_deadlines(&self, principal: &Principal) -> Result<Vec<AssignmentView>> {
        upcoming::list_open_deadlines(self, principal).await
    }

    pub async fn list_recent(&self, principal: &Principal) -> Result<Vec<AssignmentView>> {
        recent::list_recent(self, principal).await
    }

    pub async fn student_progress(&self, principal: &Principal) -> Result<StudentProgressResponse> {
        progress::student_progress(self, principal).await
    }
}

/// 附加派生状态
pub(crate) fn to_view(
    assignment: Assignment,
    now: DateTime<Utc>,
    progress: Option<ProgressStatus>,
) -> AssignmentView {
    AssignmentView {
        deadline_status: classify(assignment.deadline, now),
        days_left: days_left(assignment.deadline, now),
        progress,
        assignment,
    }
}
