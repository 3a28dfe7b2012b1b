//! `SeaORM` Entity for workflow_history table.
//!
//! Append-only: rows are inserted by workflow transitions and never updated
//! or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{HistoryAction, JbpStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "workflow_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub jbp_id: Uuid,
    pub action: HistoryAction,
    pub from_status: JbpStatus,
    pub to_status: JbpStatus,
    pub actor_id: Uuid,
    pub note: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::jbps::Entity",
        from = "Column::JbpId",
        to = "super::jbps::Column::Id"
    )]
    Jbps,
}

impl Related<super::jbps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jbps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
