//! `SeaORM` active enums mirroring the Postgres enum types, with
//! conversions to and from the core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use tradelink_core::budget::WalletStatus as CoreWalletStatus;
use tradelink_core::scope::PartnershipStatus as CorePartnershipStatus;
use tradelink_core::workflow::{
    AssetKind, HistoryAction as CoreHistoryAction, JbpStatus as CoreJbpStatus,
};

/// Partnership status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "partnership_status")]
#[serde(rename_all = "lowercase")]
pub enum PartnershipStatus {
    /// Data sharing authorized.
    #[sea_orm(string_value = "active")]
    Active,
    /// Temporarily suspended.
    #[sea_orm(string_value = "suspended")]
    Suspended,
    /// Permanently ended.
    #[sea_orm(string_value = "ended")]
    Ended,
}

impl From<PartnershipStatus> for CorePartnershipStatus {
    fn from(status: PartnershipStatus) -> Self {
        match status {
            PartnershipStatus::Active => Self::Active,
            PartnershipStatus::Suspended => Self::Suspended,
            PartnershipStatus::Ended => Self::Ended,
        }
    }
}

/// Wallet status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "wallet_status")]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    /// Accepting movements.
    #[sea_orm(string_value = "open")]
    Open,
    /// Closed for the year.
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl From<WalletStatus> for CoreWalletStatus {
    fn from(status: WalletStatus) -> Self {
        match status {
            WalletStatus::Open => Self::Open,
            WalletStatus::Closed => Self::Closed,
        }
    }
}

/// JBP lifecycle status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "jbp_status")]
#[serde(rename_all = "lowercase")]
pub enum JbpStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Under negotiation.
    #[sea_orm(string_value = "negotiation")]
    Negotiation,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Execution underway.
    #[sea_orm(string_value = "executing")]
    Executing,
}

impl From<JbpStatus> for CoreJbpStatus {
    fn from(status: JbpStatus) -> Self {
        match status {
            JbpStatus::Draft => Self::Draft,
            JbpStatus::Negotiation => Self::Negotiation,
            JbpStatus::Approved => Self::Approved,
            JbpStatus::Executing => Self::Executing,
        }
    }
}

impl From<CoreJbpStatus> for JbpStatus {
    fn from(status: CoreJbpStatus) -> Self {
        match status {
            CoreJbpStatus::Draft => Self::Draft,
            CoreJbpStatus::Negotiation => Self::Negotiation,
            CoreJbpStatus::Approved => Self::Approved,
            CoreJbpStatus::Executing => Self::Executing,
        }
    }
}

/// Asset type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "asset_type")]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// In-store or online banner.
    #[sea_orm(string_value = "banner")]
    Banner,
    /// Video creative.
    #[sea_orm(string_value = "video")]
    Video,
    /// Social post.
    #[sea_orm(string_value = "post")]
    Post,
    /// Printed material.
    #[sea_orm(string_value = "print")]
    Print,
    /// Shelf display hardware.
    #[sea_orm(string_value = "display")]
    Display,
    /// Product sampling stock.
    #[sea_orm(string_value = "sampling")]
    Sampling,
}

impl From<AssetType> for AssetKind {
    fn from(kind: AssetType) -> Self {
        match kind {
            AssetType::Banner => Self::Banner,
            AssetType::Video => Self::Video,
            AssetType::Post => Self::Post,
            AssetType::Print => Self::Print,
            AssetType::Display => Self::Display,
            AssetType::Sampling => Self::Sampling,
        }
    }
}

/// Campaign lifecycle status enum. Cascade-created campaigns start planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "campaign_status")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Materialized but not yet running.
    #[sea_orm(string_value = "planned")]
    Planned,
    /// Running.
    #[sea_orm(string_value = "active")]
    Active,
    /// Finished.
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Campaign item approval status enum. Cascade-created items start as drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "campaign_item_status")]
#[serde(rename_all = "lowercase")]
pub enum CampaignItemStatus {
    /// Awaiting review.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Cleared to run.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected during review.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Execution plan status enum. Cascade-created plans start executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "execution_plan_status")]
#[serde(rename_all = "lowercase")]
pub enum ExecutionPlanStatus {
    /// Tasks underway.
    #[sea_orm(string_value = "executing")]
    Executing,
    /// All tasks done.
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Execution task status enum. Cascade-created tasks start pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "execution_task_status")]
#[serde(rename_all = "lowercase")]
pub enum ExecutionTaskStatus {
    /// Not yet worked.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Completed in store.
    #[sea_orm(string_value = "done")]
    Done,
}

/// Workflow history action enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "history_action")]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// Plan created.
    #[sea_orm(string_value = "created")]
    Created,
    /// Sent into negotiation.
    #[sea_orm(string_value = "submitted")]
    Submitted,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Pulled back into negotiation.
    #[sea_orm(string_value = "reopened")]
    Reopened,
    /// Execution started.
    #[sea_orm(string_value = "started")]
    Started,
}

impl From<CoreHistoryAction> for HistoryAction {
    fn from(action: CoreHistoryAction) -> Self {
        match action {
            CoreHistoryAction::Created => Self::Created,
            CoreHistoryAction::Submitted => Self::Submitted,
            CoreHistoryAction::Approved => Self::Approved,
            CoreHistoryAction::Reopened => Self::Reopened,
            CoreHistoryAction::Started => Self::Started,
        }
    }
}
