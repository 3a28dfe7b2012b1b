//! Row-level multi-tenant scope resolution and query-filter composition.
//!
//! A `Principal` is classified into a `ScopeStrategy` (pure rule table),
//! the data layer executes the lookups the strategy names and assembles an
//! `AccessScope`, and the filter composer folds that scope into arbitrary
//! entity queries without leaking the existence of out-of-scope rows.

pub mod error;
pub mod filter;
pub mod policy;
pub mod resolver;
pub mod types;

#[cfg(test)]
#[path = "filter_props.rs"]
mod filter_props;

pub use error::ScopeError;
pub use filter::{BaseFilter, Clause, FieldValue, ScopeFields, ScopedFilter, apply_scope};
pub use policy::{Module, PermissionLevel, permission_for};
pub use resolver::{ScopeResolver, ScopeStrategy};
pub use types::{AccessChannel, AccessScope, PartnershipStatus, PartnershipTerms, Principal, UserRole};
