//! Scope resolution rules.
//!
//! Classification is pure and ordered: the first matching rule wins. The
//! data layer executes whatever lookups the resulting strategy names (all
//! independent, safe to run in parallel) and assembles the final
//! [`AccessScope`] through the constructors below.

use uuid::Uuid;

use crate::scope::types::{AccessChannel, AccessScope, Principal, UserRole};

/// The lookup plan a principal's claims resolve to.
///
/// `Unrestricted` and `DenyAll` are terminal; the other variants name the
/// queries needed to build a `Scoped` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeStrategy {
    /// No filtering (platform administrator only).
    Unrestricted,
    /// Every scoped query yields zero rows.
    DenyAll,
    /// All suppliers and retails of the tenant (two independent lookups).
    TenantWide {
        /// The tenant boundary.
        tenant_id: Uuid,
    },
    /// One supplier plus the retail side of its currently active partnerships.
    SupplierChannel {
        /// The tenant boundary.
        tenant_id: Uuid,
        /// The supplier the principal represents.
        supplier_id: Uuid,
    },
    /// One retail plus the supplier side of its currently active partnerships.
    RetailChannel {
        /// The tenant boundary.
        tenant_id: Uuid,
        /// The retail the principal represents.
        retail_id: Uuid,
    },
    /// Tenant-only visibility with empty party sets.
    TenantOnly {
        /// The tenant boundary.
        tenant_id: Uuid,
    },
}

/// Stateless resolver mapping a principal to a scope strategy.
pub struct ScopeResolver;

impl ScopeResolver {
    /// Classifies a principal. First matching rule wins:
    ///
    /// 1. Platform admin → `Unrestricted`.
    /// 2. Tenant admin with no party id → `TenantWide`.
    /// 3. Industry channel with a supplier id → `SupplierChannel`.
    /// 4. Retail channel with a retail id → `RetailChannel`.
    /// 5. Internal channel with a tenant id → `TenantOnly`.
    /// 6. Anything else (missing ids, unrecognized role or channel) → `DenyAll`.
    ///
    /// Tenant isolation is not bypassable: no role other than the platform
    /// administrator ever resolves outside its own tenant.
    #[must_use]
    pub fn strategy_for(principal: &Principal) -> ScopeStrategy {
        let role = UserRole::parse(&principal.role);
        let channel = AccessChannel::parse(&principal.channel);

        if role == Some(UserRole::PlatformAdmin) {
            return ScopeStrategy::Unrestricted;
        }

        if role == Some(UserRole::TenantAdmin)
            && principal.supplier_id.is_none()
            && principal.retail_id.is_none()
            && let Some(tenant_id) = principal.tenant_id
        {
            return ScopeStrategy::TenantWide { tenant_id };
        }

        match (channel, principal.tenant_id) {
            (Some(AccessChannel::Industry), Some(tenant_id)) => {
                if let Some(supplier_id) = principal.supplier_id {
                    return ScopeStrategy::SupplierChannel {
                        tenant_id,
                        supplier_id,
                    };
                }
            }
            (Some(AccessChannel::Retail), Some(tenant_id)) => {
                if let Some(retail_id) = principal.retail_id {
                    return ScopeStrategy::RetailChannel {
                        tenant_id,
                        retail_id,
                    };
                }
            }
            (Some(AccessChannel::Internal), Some(tenant_id)) => {
                return ScopeStrategy::TenantOnly { tenant_id };
            }
            _ => {}
        }

        ScopeStrategy::DenyAll
    }

    /// Assembles the scope for a tenant-wide administrator.
    #[must_use]
    pub fn tenant_wide_scope(
        tenant_id: Uuid,
        supplier_ids: impl IntoIterator<Item = Uuid>,
        retail_ids: impl IntoIterator<Item = Uuid>,
    ) -> AccessScope {
        AccessScope::scoped(tenant_id, supplier_ids, retail_ids)
    }

    /// Assembles the scope for an industry-channel principal: their own
    /// supplier plus the retail side of the active partnerships.
    #[must_use]
    pub fn supplier_channel_scope(
        tenant_id: Uuid,
        supplier_id: Uuid,
        partner_retail_ids: impl IntoIterator<Item = Uuid>,
    ) -> AccessScope {
        AccessScope::scoped(tenant_id, [supplier_id], partner_retail_ids)
    }

    /// Assembles the scope for a retail-channel principal: their own retail
    /// plus the supplier side of the active partnerships.
    #[must_use]
    pub fn retail_channel_scope(
        tenant_id: Uuid,
        retail_id: Uuid,
        partner_supplier_ids: impl IntoIterator<Item = Uuid>,
    ) -> AccessScope {
        AccessScope::scoped(tenant_id, partner_supplier_ids, [retail_id])
    }

    /// Assembles the tenant-only scope (entities keyed directly by tenant).
    #[must_use]
    pub fn tenant_only_scope(tenant_id: Uuid) -> AccessScope {
        AccessScope::scoped(tenant_id, [], [])
    }
}
