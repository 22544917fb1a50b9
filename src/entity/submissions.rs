//! 提交实体

use sea_orm::entity::prelude::*;

use crate::errors::TrackerError;
use crate::models::submissions::entities::Submission;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub submitted_at: i64,
    pub status: String,
    #[sea_orm(nullable)]
    pub grade: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::errors::Result<Submission> {
        use crate::models::{AssignmentId, SubmissionId, UserId};

        let corrupt = |e: String| TrackerError::database_operation(format!("提交记录损坏: {e}"));

        Ok(Submission {
            id: SubmissionId::parse(&self.id).map_err(|e| corrupt(e.to_string()))?,
            assignment_id: AssignmentId::parse(&self.assignment_id)
                .map_err(|e| corrupt(e.to_string()))?,
            student_id: UserId::parse(&self.student_id).map_err(|e| corrupt(e.to_string()))?,
            submitted_at: super::assignments::from_millis(self.submitted_at),
            status: self.status.parse().map_err(corrupt)?,
            grade: self.grade,
        })
    }
}
