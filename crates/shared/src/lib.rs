//! Shared configuration and auth primitives for Tradelink.
//!
//! This crate provides common pieces used across all other crates:
//! - Configuration management
//! - JWT claims and token handling for authenticated principals

pub mod auth;
pub mod config;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
