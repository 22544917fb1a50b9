use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::policies::{AccessControl, Operation};
use crate::services::{AssignmentService, SubmissionService};
use crate::utils::{Clock, SystemClock, TokenAuthorizer};

pub struct StartupContext {
    pub access: Arc<AccessControl>,
    pub authorizer: Arc<TokenAuthorizer>,
    pub assignments: Arc<AssignmentService>,
    pub submissions: Arc<SubmissionService>,
}

/// 构建角色门禁表，任何操作的允许角色为空都会中止启动
fn build_access_control() -> Result<AccessControl> {
    let access = AccessControl::from_table()?;
    for op in Operation::ALL {
        debug!(
            "Role gate {}: {:?}",
            op.name(),
            access.gate(op).allowed_roles()
        );
    }
    Ok(access)
}

/// 准备服务器启动的上下文
/// 包括门禁表、令牌校验器、存储与业务服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let access = Arc::new(build_access_control()?);
    warn!("Role gates validated for {} operations", Operation::ALL.len());

    let authorizer = Arc::new(TokenAuthorizer::new(&config.jwt)?);

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let visibility = config.tracker.student_visibility;
    warn!("Student visibility policy: {:?}", visibility);

    let assignments = Arc::new(AssignmentService::new(
        storage.clone(),
        clock.clone(),
        access.clone(),
        visibility,
        config.tracker.recent_limit as usize,
    ));
    let submissions = Arc::new(SubmissionService::new(
        storage,
        clock,
        access.clone(),
        visibility,
    ));

    Ok(StartupContext {
        access,
        authorizer,
        assignments,
        submissions,
    })
}
