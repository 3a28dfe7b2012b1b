//! `SeaORM` Entity for execution_tasks table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ExecutionTaskStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "execution_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub execution_plan_id: Uuid,
    pub jbp_item_id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub status: ExecutionTaskStatus,
    pub checklist: String,
    pub deadline: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::execution_plans::Entity",
        from = "Column::ExecutionPlanId",
        to = "super::execution_plans::Column::Id"
    )]
    ExecutionPlans,
    #[sea_orm(
        belongs_to = "super::stores::Entity",
        from = "Column::StoreId",
        to = "super::stores::Column::Id"
    )]
    Stores,
}

impl Related<super::execution_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExecutionPlans.def()
    }
}

impl Related<super::stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
