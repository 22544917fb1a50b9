pub mod mine;
pub mod submit;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::policies::{AccessControl, VisibilityPolicy};
use crate::storage::Storage;
use crate::utils::Clock;

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    access: Arc<AccessControl>,
    visibility: VisibilityPolicy,
}

impl SubmissionService {
    pub fn new(
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
        access: Arc<AccessControl>,
        visibility: VisibilityPolicy,
    ) -> Self {
        Self {
            storage,
            clock,
            access,
            visibility,
        }
    }

    /// 学生提交作业
    pub async fn submit(
        &self,
        principal: &Principal,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        submit::submit(self, principal, req).await
    }

    /// 学生自己的提交记录
    pub async fn list_mine(&self, principal: &Principal) -> Result<Vec<Submission>> {
        mine::list_mine(self, principal).await
    }
}
