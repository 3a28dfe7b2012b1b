//! Scope domain types: principals, channels, partnerships, and access scopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// User role in the platform hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform-wide administrator; the only role exempt from scoping.
    PlatformAdmin,
    /// Administrator of a single tenant; full breadth within that tenant only.
    TenantAdmin,
    /// Standard user; scoped to the party they represent.
    Standard,
}

impl UserRole {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "platform_admin" => Some(Self::PlatformAdmin),
            "tenant_admin" => Some(Self::TenantAdmin),
            "standard" => Some(Self::Standard),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlatformAdmin => "platform_admin",
            Self::TenantAdmin => "tenant_admin",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The channel a principal acts through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessChannel {
    /// Industry side: the principal represents a supplier.
    Industry,
    /// Retail side: the principal represents a retail chain.
    Retail,
    /// Internal: tenant staff with no trading-party affiliation.
    Internal,
}

impl AccessChannel {
    /// Parse a channel from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "industry" => Some(Self::Industry),
            "retail" => Some(Self::Retail),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }

    /// Returns the string representation of the channel.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Industry => "industry",
            Self::Retail => "retail",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for AccessChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated principal as supplied by the identity layer.
///
/// Role and channel are kept as raw strings; the resolver parses them and
/// treats anything unrecognized as deny-all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// User ID.
    pub id: Uuid,
    /// Role string (see [`UserRole`]).
    pub role: String,
    /// Access channel string (see [`AccessChannel`]).
    pub channel: String,
    /// The tenant the principal belongs to.
    pub tenant_id: Option<Uuid>,
    /// Supplier the principal represents, if any.
    pub supplier_id: Option<Uuid>,
    /// Retail the principal represents, if any.
    pub retail_id: Option<Uuid>,
}

/// Partnership status between a supplier and a retail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnershipStatus {
    /// Data sharing is authorized (subject to the validity window).
    Active,
    /// Temporarily suspended by an administrator.
    Suspended,
    /// Permanently ended.
    Ended,
}

impl PartnershipStatus {
    /// Parse a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "ended" => Some(Self::Ended),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Ended => "ended",
        }
    }
}

/// The status and validity window of a partnership.
///
/// Partnerships are never expired by a background job; activity is evaluated
/// lazily at query time against this window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipTerms {
    /// Partnership status.
    pub status: PartnershipStatus,
    /// Start of the validity window (open-ended if `None`).
    pub valid_from: Option<DateTime<Utc>>,
    /// End of the validity window (open-ended if `None`).
    pub valid_to: Option<DateTime<Utc>>,
}

impl PartnershipTerms {
    /// Returns true if the partnership is active at the given instant.
    ///
    /// Active means `status == Active` and the instant falls inside the
    /// validity window; an absent bound is treated as always satisfied.
    #[must_use]
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.status == PartnershipStatus::Active
            && self.valid_from.is_none_or(|from| from <= at)
            && self.valid_to.is_none_or(|to| to >= at)
    }
}

/// The computed visibility of a principal over tenant/supplier/retail rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessScope {
    /// No filtering at all. Reserved for the platform administrator.
    Unrestricted,
    /// Every scoped query yields zero rows.
    DenyAll,
    /// Restricted to a tenant plus explicit supplier/retail id sets.
    Scoped {
        /// The tenant boundary.
        tenant_id: Uuid,
        /// Visible supplier ids (may be empty for tenant-only visibility).
        supplier_ids: BTreeSet<Uuid>,
        /// Visible retail ids (may be empty for tenant-only visibility).
        retail_ids: BTreeSet<Uuid>,
    },
}

impl AccessScope {
    /// Builds a scoped descriptor from id iterators.
    #[must_use]
    pub fn scoped(
        tenant_id: Uuid,
        supplier_ids: impl IntoIterator<Item = Uuid>,
        retail_ids: impl IntoIterator<Item = Uuid>,
    ) -> Self {
        Self::Scoped {
            tenant_id,
            supplier_ids: supplier_ids.into_iter().collect(),
            retail_ids: retail_ids.into_iter().collect(),
        }
    }

    /// Returns true if every scoped query must yield zero rows.
    #[must_use]
    pub const fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }

    /// Returns true if no filtering applies.
    #[must_use]
    pub const fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("platform_admin"), Some(UserRole::PlatformAdmin));
        assert_eq!(UserRole::parse("TENANT_ADMIN"), Some(UserRole::TenantAdmin));
        assert_eq!(UserRole::parse("Standard"), Some(UserRole::Standard));
        assert_eq!(UserRole::parse("super_admin"), None);
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(AccessChannel::parse("industry"), Some(AccessChannel::Industry));
        assert_eq!(AccessChannel::parse("RETAIL"), Some(AccessChannel::Retail));
        assert_eq!(AccessChannel::parse("internal"), Some(AccessChannel::Internal));
        assert_eq!(AccessChannel::parse("partner"), None);
    }

    #[test]
    fn test_partnership_active_inside_window() {
        let now = Utc::now();
        let terms = PartnershipTerms {
            status: PartnershipStatus::Active,
            valid_from: Some(now - Duration::days(10)),
            valid_to: Some(now + Duration::days(10)),
        };
        assert!(terms.is_active_at(now));
    }

    #[test]
    fn test_partnership_not_yet_active() {
        let now = Utc::now();
        let terms = PartnershipTerms {
            status: PartnershipStatus::Active,
            valid_from: Some(now + Duration::days(1)),
            valid_to: None,
        };
        assert!(!terms.is_active_at(now));
    }

    #[test]
    fn test_partnership_expired() {
        let now = Utc::now();
        let terms = PartnershipTerms {
            status: PartnershipStatus::Active,
            valid_from: None,
            valid_to: Some(now - Duration::seconds(1)),
        };
        assert!(!terms.is_active_at(now));
    }

    #[test]
    fn test_partnership_open_ended_both_sides() {
        let terms = PartnershipTerms {
            status: PartnershipStatus::Active,
            valid_from: None,
            valid_to: None,
        };
        assert!(terms.is_active_at(Utc::now()));
    }

    #[test]
    fn test_partnership_inactive_status_wins_over_window() {
        let terms = PartnershipTerms {
            status: PartnershipStatus::Suspended,
            valid_from: None,
            valid_to: None,
        };
        assert!(!terms.is_active_at(Utc::now()));
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let now = Utc::now();
        let terms = PartnershipTerms {
            status: PartnershipStatus::Active,
            valid_from: Some(now),
            valid_to: Some(now),
        };
        assert!(terms.is_active_at(now));
    }
}
