//! 角色门禁
//!
//! 每个受保护操作对应一组固定、非空的允许角色。空集合在构造时即被拒绝，
//! 属于配置错误，不会拖到请求阶段才暴露。

use tracing::info;

use crate::errors::{Result, TrackerError};
use crate::models::auth::entities::{Principal, Role};

/// 受保护的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAssignment,
    ListAssignments,
    UpdateAssignment,
    DeleteAssignment,
    ListUpcoming,
    ListOpenDeadlines,
    ListRecent,
    StudentProgress,
    SubmitAssignment,
    ListMySubmissions,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::CreateAssignment,
        Operation::ListAssignments,
        Operation::UpdateAssignment,
        Operation::DeleteAssignment,
        Operation::ListUpcoming,
        Operation::ListOpenDeadlines,
        Operation::ListRecent,
        Operation::StudentProgress,
        Operation::SubmitAssignment,
        Operation::ListMySubmissions,
    ];

    /// 操作的允许角色表
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Operation::CreateAssignment
            | Operation::UpdateAssignment
            | Operation::DeleteAssignment => &[Role::Teacher],
            Operation::ListAssignments => &[Role::Teacher, Role::Student],
            Operation::ListUpcoming
            | Operation::ListOpenDeadlines
            | Operation::ListRecent
            | Operation::StudentProgress
            | Operation::SubmitAssignment
            | Operation::ListMySubmissions => &[Role::Student],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateAssignment => "create_assignment",
            Operation::ListAssignments => "list_assignments",
            Operation::UpdateAssignment => "update_assignment",
            Operation::DeleteAssignment => "delete_assignment",
            Operation::ListUpcoming => "list_upcoming",
            Operation::ListOpenDeadlines => "list_open_deadlines",
            Operation::ListRecent => "list_recent",
            Operation::StudentProgress => "student_progress",
            Operation::SubmitAssignment => "submit_assignment",
            Operation::ListMySubmissions => "list_my_submissions",
        }
    }
}

/// 单个操作的角色门禁
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    operation: Operation,
    allowed: Vec<Role>,
}

impl RoleGate {
    /// 创建门禁，允许角色为空时返回配置错误
    pub fn new(operation: Operation, allowed: &[Role]) -> Result<Self> {
        if allowed.is_empty() {
            return Err(TrackerError::configuration(format!(
                "操作 {} 的允许角色列表为空",
                operation.name()
            )));
        }

        Ok(Self {
            operation,
            allowed: allowed.to_vec(),
        })
    }

    /// 按角色表创建门禁
    pub fn for_operation(operation: Operation) -> Result<Self> {
        Self::new(operation, operation.allowed_roles())
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    pub fn check(&self, principal: &Principal) -> Result<()> {
        if self.permits(principal.role) {
            return Ok(());
        }

        info!(
            "Access denied for user {} (role: {}) on {}. Allowed roles: {:?}",
            principal.subject,
            principal.role,
            self.operation.name(),
            self.allowed
        );
        Err(TrackerError::forbidden("当前角色无权执行该操作"))
    }
}

/// 全部操作的门禁表，在启动时一次性构建并校验
#[derive(Debug, Clone)]
pub struct AccessControl {
    gates: Vec<RoleGate>,
}

impl AccessControl {
    pub fn from_table() -> Result<Self> {
        let gates = Operation::ALL
            .iter()
            .map(|op| RoleGate::for_operation(*op))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { gates })
    }

    pub fn gate(&self, operation: Operation) -> &RoleGate {
        // gates 按 Operation::ALL 的顺序构建
        &self.gates[operation as usize]
    }

    pub fn check(&self, operation: Operation, principal: &Principal) -> Result<()> {
        self.gate(operation).check(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::fixtures::principal;

    #[test]
    fn test_empty_allow_list_is_configuration_error() {
        let err = RoleGate::new(Operation::CreateAssignment, &[]).unwrap_err();
        assert_eq!(err.code(), TrackerError::configuration("").code());
    }

    #[test]
    fn test_table_has_no_empty_entries() {
        for op in Operation::ALL {
            assert!(!op.allowed_roles().is_empty(), "{}", op.name());
        }
        assert!(AccessControl::from_table().is_ok());
    }

    #[test]
    fn test_gate_lookup_matches_operation() {
        let access = AccessControl::from_table().unwrap();
        for op in Operation::ALL {
            assert_eq!(access.gate(op).operation(), op);
        }
    }

    #[test]
    fn test_teacher_only_operations() {
        let access = AccessControl::from_table().unwrap();
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);

        for op in [
            Operation::CreateAssignment,
            Operation::UpdateAssignment,
            Operation::DeleteAssignment,
        ] {
            assert!(access.check(op, &teacher).is_ok());
            let err = access.check(op, &student).unwrap_err();
            assert_eq!(err, TrackerError::forbidden("当前角色无权执行该操作"));
        }
    }

    #[test]
    fn test_student_only_operations() {
        let access = AccessControl::from_table().unwrap();
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);

        for op in [
            Operation::ListUpcoming,
            Operation::ListOpenDeadlines,
            Operation::ListRecent,
            Operation::StudentProgress,
            Operation::SubmitAssignment,
            Operation::ListMySubmissions,
        ] {
            assert!(access.check(op, &student).is_ok());
            assert!(access.check(op, &teacher).is_err());
        }
    }

    #[test]
    fn test_listing_open_to_both_roles() {
        let access = AccessControl::from_table().unwrap();
        assert!(
            access
                .check(Operation::ListAssignments, &principal(Role::Teacher))
                .is_ok()
        );
        assert!(
            access
                .check(Operation::ListAssignments, &principal(Role::Student))
                .is_ok()
        );
    }
}
