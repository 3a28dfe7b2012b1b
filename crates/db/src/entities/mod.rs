//! `SeaORM` entity definitions.

pub mod sea_orm_active_enums;

pub mod assets;
pub mod campaign_items;
pub mod campaigns;
pub mod execution_plans;
pub mod execution_tasks;
pub mod jbp_item_stores;
pub mod jbp_items;
pub mod jbps;
pub mod partnerships;
pub mod retails;
pub mod stores;
pub mod suppliers;
pub mod tenants;
pub mod users;
pub mod wallets;
pub mod workflow_history;
