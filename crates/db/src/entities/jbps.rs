//! `SeaORM` Entity for jbps (joint business plans) table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::JbpStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "jbps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub supplier_id: Uuid,
    pub retail_id: Uuid,
    pub title: String,
    pub status: JbpStatus,
    pub total_budget: Decimal,
    /// The wallet backing the reservation; null when no open wallet existed
    /// for the (supplier, year) at creation time.
    pub wallet_id: Option<Uuid>,
    pub start_date: Date,
    pub end_date: Date,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
    #[sea_orm(
        belongs_to = "super::retails::Entity",
        from = "Column::RetailId",
        to = "super::retails::Column::Id"
    )]
    Retails,
    #[sea_orm(has_many = "super::jbp_items::Entity")]
    JbpItems,
    #[sea_orm(has_many = "super::workflow_history::Entity")]
    WorkflowHistory,
}

impl Related<super::jbp_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JbpItems.def()
    }
}

impl Related<super::workflow_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkflowHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
