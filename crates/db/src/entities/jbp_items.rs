//! `SeaORM` Entity for jbp_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "jbp_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub jbp_id: Uuid,
    pub name: String,
    pub asset_id: Option<Uuid>,
    pub budget: Decimal,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
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
    #[sea_orm(
        belongs_to = "super::assets::Entity",
        from = "Column::AssetId",
        to = "super::assets::Column::Id"
    )]
    Assets,
    #[sea_orm(has_many = "super::jbp_item_stores::Entity")]
    JbpItemStores,
}

impl Related<super::jbps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jbps.def()
    }
}

impl Related<super::jbp_item_stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JbpItemStores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
