//! 作业实体

use sea_orm::entity::prelude::*;

use crate::errors::TrackerError;
use crate::models::assignments::entities::Assignment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub deadline: i64,
    pub subject: String,
    pub max_score: f64,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub attachments: String,
    pub created_by: String,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub assigned_to: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn from_millis(ms: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment(self) -> crate::errors::Result<Assignment> {
        use crate::models::{AssignmentId, UserId};

        let corrupt = |e: crate::models::IdParseError| {
            TrackerError::database_operation(format!("作业记录损坏: {e}"))
        };

        let assigned_to: Vec<String> = serde_json::from_str(&self.assigned_to)?;

        Ok(Assignment {
            id: AssignmentId::parse(&self.id).map_err(corrupt)?,
            title: self.title,
            description: self.description,
            deadline: from_millis(self.deadline),
            subject: self.subject,
            max_score: self.max_score,
            attachments: serde_json::from_str(&self.attachments)?,
            created_by: UserId::parse(&self.created_by).map_err(corrupt)?,
            assigned_to: assigned_to
                .iter()
                .map(|raw| UserId::parse(raw))
                .collect::<std::result::Result<_, _>>()
                .map_err(corrupt)?,
            created_at: from_millis(self.created_at),
            updated_at: from_millis(self.updated_at),
        })
    }
}
