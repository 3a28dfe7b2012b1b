//! Repository abstractions for data access.

pub mod jbp;
pub mod partnership;
pub mod scope;
pub mod wallet;

#[cfg(test)]
#[path = "workflow_integration_tests.rs"]
mod workflow_integration_tests;

pub use jbp::{CreateJbpInput, CreateJbpItemInput, JbpError, JbpRepository, UpdateJbpInput};
pub use partnership::PartnershipRepository;
pub use scope::ScopeRepository;
pub use wallet::{WalletError, WalletRepository};
