//! JBP approval workflow.
//!
//! The state machine and the cascade planner are pure; the data layer runs
//! an approval as a single transaction that applies the transition, writes
//! the history row, and materializes the cascade plan.

pub mod cascade;
pub mod error;
pub mod service;
pub mod types;

pub use cascade::{
    AssetKind, CampaignDraft, CampaignItemDraft, CascadeItem, CascadePlan, ExecutionPlanDraft,
    TASK_CHECKLIST, TaskDraft, build_cascade,
};
pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{HistoryAction, JbpStatus};
