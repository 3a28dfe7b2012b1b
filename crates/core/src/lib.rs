//! Core business logic for Tradelink.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `scope` - Row-level multi-tenant scope resolution and query-filter composition
//! - `budget` - Wallet (budget ledger) math and reservation planning
//! - `workflow` - JBP approval state machine and cascade planning

pub mod budget;
pub mod scope;
pub mod workflow;
