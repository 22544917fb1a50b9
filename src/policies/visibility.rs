//! 可见范围
//!
//! 教师只能看到自己创建的作业。学生的可见范围由策略开关决定：
//! 默认 `open` 下可以看到所有作业（不参考 `assigned_to`）；
//! `assigned` 下只能看到未指定学生或指定了自己的作业。

use serde::{Deserialize, Serialize};

use crate::models::UserId;
use crate::models::assignments::entities::Assignment;
use crate::models::auth::entities::{Principal, Role};

/// 学生可见范围策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityPolicy {
    /// 所有作业对学生可见（默认）
    #[default]
    Open,
    /// 按 assigned_to 限制
    Assigned,
}

/// 某个主体可读的作业范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentScope {
    OwnedBy(UserId),
    All,
    AssignedTo(UserId),
}

impl AssignmentScope {
    pub fn for_principal(principal: &Principal, policy: VisibilityPolicy) -> Self {
        match (principal.role, policy) {
            (Role::Teacher, _) => AssignmentScope::OwnedBy(principal.subject.clone()),
            (Role::Student, VisibilityPolicy::Open) => AssignmentScope::All,
            (Role::Student, VisibilityPolicy::Assigned) => {
                AssignmentScope::AssignedTo(principal.subject.clone())
            }
        }
    }

    pub fn matches(&self, assignment: &Assignment) -> bool {
        match self {
            AssignmentScope::OwnedBy(owner) => assignment.is_owned_by(owner),
            AssignmentScope::All => true,
            AssignmentScope::AssignedTo(student) => assignment.is_assigned_to(student),
        }
    }

    pub fn apply(&self, assignments: Vec<Assignment>) -> Vec<Assignment> {
        assignments.into_iter().filter(|a| self.matches(a)).collect()
    }
}
