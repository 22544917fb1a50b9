//! 授权与可见性核心
//!
//! 每个请求依次经过：令牌校验（`utils::jwt::TokenAuthorizer`）→ 角色门禁
//! （`role_gate`）→ 归属校验（`ownership`，仅写操作）或可见范围（`visibility`，
//! 读操作）。读结果再按需经过截止窗口、状态分类、提交关联与筛选。
//!
//! 除角色门禁表外，本模块全部是纯函数，时间由调用方传入。

pub mod correlator;
pub mod deadline;
pub mod filter;
pub mod ownership;
pub mod role_gate;
pub mod status;
pub mod visibility;

pub use correlator::{ProgressReport, correlate};
pub use deadline::{DeadlineWindow, parse_deadline};
pub use filter::{AssignmentFilter, FilterContext, Predicate};
pub use ownership::{ensure_owner, ensure_owner_of_existing};
pub use role_gate::{AccessControl, Operation, RoleGate};
pub use status::{classify, days_left};
pub use visibility::{AssignmentScope, VisibilityPolicy};
