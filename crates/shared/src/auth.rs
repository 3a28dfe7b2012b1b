//! Authentication claims carried by access tokens.
//!
//! The identity layer issues a token describing the authenticated principal:
//! who they are, which tenant they belong to, which channel they act through,
//! and which trading party (supplier or retail) they represent, if any.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Tenant ID (isolation boundary for this principal).
    pub tenant: Option<Uuid>,
    /// The principal's role (e.g. `platform_admin`, `tenant_admin`, `standard`).
    pub role: String,
    /// The access channel the principal acts through (`industry`, `retail`, `internal`).
    pub channel: String,
    /// Supplier the principal represents, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<Uuid>,
    /// Retail the principal represents, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_id: Option<Uuid>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a principal.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        tenant_id: Option<Uuid>,
        role: &str,
        channel: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            tenant: tenant_id,
            role: role.to_string(),
            channel: channel.to_string(),
            supplier_id: None,
            retail_id: None,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Sets the supplier the principal represents.
    #[must_use]
    pub const fn with_supplier(mut self, supplier_id: Uuid) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    /// Sets the retail the principal represents.
    #[must_use]
    pub const fn with_retail(mut self, retail_id: Uuid) -> Self {
        self.retail_id = Some(retail_id);
        self
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the tenant ID from claims.
    #[must_use]
    pub const fn tenant_id(&self) -> Option<Uuid> {
        self.tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_builder() {
        let user = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let supplier = Uuid::new_v4();
        let claims = Claims::new(
            user,
            Some(tenant),
            "standard",
            "industry",
            Utc::now() + Duration::minutes(15),
        )
        .with_supplier(supplier);

        assert_eq!(claims.user_id(), user);
        assert_eq!(claims.tenant_id(), Some(tenant));
        assert_eq!(claims.supplier_id, Some(supplier));
        assert_eq!(claims.retail_id, None);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_claims_serde_roundtrip_omits_absent_party() {
        let claims = Claims::new(
            Uuid::new_v4(),
            None,
            "platform_admin",
            "internal",
            Utc::now() + Duration::minutes(5),
        );
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("supplier_id"));
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, "platform_admin");
        assert_eq!(back.supplier_id, None);
    }
}
