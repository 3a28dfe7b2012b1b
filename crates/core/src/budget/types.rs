//! Wallet types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wallet lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    /// Accepting reservations and releases.
    Open,
    /// Closed for the year; no further movement.
    Closed,
}

impl WalletStatus {
    /// Parse a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// The annual budget envelope of one supplier.
///
/// Invariant: `0 <= consumed_budget <= total_budget` while the wallet is
/// open; the data layer enforces the upper bound with a conditional update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Wallet ID.
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// The supplier this envelope belongs to.
    pub supplier_id: Uuid,
    /// Calendar year the envelope covers.
    pub year: i32,
    /// Total allocated budget for the year.
    pub total_budget: Decimal,
    /// Sum of all active reservations.
    pub consumed_budget: Decimal,
    /// Lifecycle status.
    pub status: WalletStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// The amount still available for reservation.
    #[must_use]
    pub fn available(&self) -> Decimal {
        self.total_budget - self.consumed_budget
    }

    /// Returns true if the wallet accepts movements.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == WalletStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn wallet(total: Decimal, consumed: Decimal) -> Wallet {
        Wallet {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            year: 2026,
            total_budget: total,
            consumed_budget: consumed,
            status: WalletStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_available_is_total_minus_consumed() {
        let w = wallet(dec!(100_000), dec!(37_500.25));
        assert_eq!(w.available(), dec!(62_499.75));
    }

    #[test]
    fn test_fully_consumed_wallet_has_zero_available() {
        let w = wallet(dec!(500), dec!(500));
        assert_eq!(w.available(), dec!(0));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(WalletStatus::parse("open"), Some(WalletStatus::Open));
        assert_eq!(WalletStatus::parse("CLOSED"), Some(WalletStatus::Closed));
        assert_eq!(WalletStatus::parse("frozen"), None);
    }
}
