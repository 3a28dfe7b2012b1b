//! Permission policy table.
//!
//! A pure lookup from (role, channel, module) to a permission level. The
//! table is the single source of truth for coarse module access; row-level
//! visibility is always enforced separately by the scope filter.

use serde::{Deserialize, Serialize};

use crate::scope::types::{AccessChannel, UserRole};

/// A functional area of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// Joint business plans and their workflow.
    Jbp,
    /// Budget wallets.
    Wallet,
    /// Supplier/retail partnerships.
    Partnership,
    /// Campaigns materialized from approved plans.
    Campaign,
    /// In-store execution plans and tasks.
    Execution,
}

/// Coarse permission level for a module.
///
/// Levels are ordered; `allows` compares against a required minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    /// No access at all.
    None,
    /// Read-only access.
    Read,
    /// Read and write.
    Write,
    /// Write plus administrative actions (approve, close, manage).
    Full,
}

impl PermissionLevel {
    /// Returns true if this level satisfies the required minimum.
    #[must_use]
    pub fn allows(self, required: Self) -> bool {
        self >= required
    }
}

/// Looks up the permission level for a role/channel pair on a module.
///
/// Platform and tenant administrators get full access to every module; the
/// standard role is differentiated by channel. Unknown role or channel
/// strings never reach this table (the resolver already classifies them as
/// deny-all), so callers pass parsed values.
#[must_use]
pub fn permission_for(role: UserRole, channel: AccessChannel, module: Module) -> PermissionLevel {
    use AccessChannel as C;
    use Module as M;
    use PermissionLevel as P;

    match role {
        UserRole::PlatformAdmin | UserRole::TenantAdmin => P::Full,
        UserRole::Standard => match (channel, module) {
            // Industry users author plans and campaigns for their supplier.
            (C::Industry, M::Jbp | M::Campaign) => P::Write,
            (C::Industry, M::Wallet | M::Partnership | M::Execution) => P::Read,
            // Retail users negotiate plans and run in-store execution.
            (C::Retail, M::Jbp | M::Execution) => P::Write,
            (C::Retail, M::Partnership | M::Campaign) => P::Read,
            (C::Retail, M::Wallet) => P::None,
            // Internal staff observe everything within their tenant.
            (C::Internal, _) => P::Read,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admins_have_full_access_everywhere() {
        for role in [UserRole::PlatformAdmin, UserRole::TenantAdmin] {
            for module in [
                Module::Jbp,
                Module::Wallet,
                Module::Partnership,
                Module::Campaign,
                Module::Execution,
            ] {
                assert_eq!(
                    permission_for(role, AccessChannel::Internal, module),
                    PermissionLevel::Full
                );
            }
        }
    }

    #[test]
    fn test_retail_standard_cannot_see_wallets() {
        let level = permission_for(UserRole::Standard, AccessChannel::Retail, Module::Wallet);
        assert_eq!(level, PermissionLevel::None);
        assert!(!level.allows(PermissionLevel::Read));
    }

    #[test]
    fn test_industry_standard_writes_jbps_reads_wallets() {
        assert_eq!(
            permission_for(UserRole::Standard, AccessChannel::Industry, Module::Jbp),
            PermissionLevel::Write
        );
        assert_eq!(
            permission_for(UserRole::Standard, AccessChannel::Industry, Module::Wallet),
            PermissionLevel::Read
        );
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(PermissionLevel::Full.allows(PermissionLevel::Write));
        assert!(PermissionLevel::Write.allows(PermissionLevel::Read));
        assert!(!PermissionLevel::Read.allows(PermissionLevel::Write));
        assert!(PermissionLevel::None.allows(PermissionLevel::None));
    }
}
