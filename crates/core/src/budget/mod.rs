//! Budget ledger domain logic.
//!
//! A wallet is the annual budget envelope of one supplier. All money math is
//! `rust_decimal`; the ledger never touches floats. The planning functions
//! here are pure; the data layer executes the plans as atomic conditional
//! updates.

pub mod error;
pub mod service;
pub mod types;

pub use error::BudgetError;
pub use service::{AdjustPlan, BudgetService};
pub use types::{Wallet, WalletStatus};
