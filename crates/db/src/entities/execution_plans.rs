//! `SeaORM` Entity for execution_plans table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ExecutionPlanStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "execution_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub jbp_id: Uuid,
    pub supplier_id: Uuid,
    pub retail_id: Option<Uuid>,
    pub name: String,
    pub status: ExecutionPlanStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::jbps::Entity",
        from = "Column::JbpId",
        to = "super::jbps::Column::Id"
    )]
    Jbps,
    #[sea_orm(has_many = "super::execution_tasks::Entity")]
    ExecutionTasks,
}

impl Related<super::execution_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExecutionTasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
