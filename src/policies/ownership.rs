//! 归属校验：只有作业的创建者可以修改或删除它

use tracing::info;

use crate::errors::{Result, TrackerError};
use crate::models::AssignmentId;
use crate::models::assignments::entities::Assignment;
use crate::models::auth::entities::Principal;

pub fn ensure_owner(principal: &Principal, assignment: &Assignment) -> Result<()> {
    if assignment.is_owned_by(&principal.subject) {
        return Ok(());
    }

    info!(
        "Ownership check failed: user {} is not the creator of assignment {}",
        principal.subject, assignment.id
    );
    Err(TrackerError::forbidden("只能修改自己创建的作业"))
}

/// 先确认作业存在，再校验归属
///
/// 不存在时按 ID 返回 NotFound，不会被误报成 Forbidden。
pub fn ensure_owner_of_existing(
    principal: &Principal,
    id: &AssignmentId,
    found: Option<Assignment>,
) -> Result<Assignment> {
    let assignment =
        found.ok_or_else(|| TrackerError::not_found(format!("作业不存在: {id}")))?;
    ensure_owner(principal, &assignment)?;
    Ok(assignment)
}
