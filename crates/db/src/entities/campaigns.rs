//! `SeaORM` Entity for campaigns table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CampaignStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub jbp_id: Uuid,
    pub supplier_id: Uuid,
    /// Null until the campaign is assigned to a specific retail; a null
    /// retail is visible to everyone in scope.
    pub retail_id: Option<Uuid>,
    pub name: String,
    pub status: CampaignStatus,
    /// Runs over the source plan's period.
    pub start_date: Date,
    pub end_date: Date,
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
    #[sea_orm(has_many = "super::campaign_items::Entity")]
    CampaignItems,
}

impl Related<super::campaign_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
