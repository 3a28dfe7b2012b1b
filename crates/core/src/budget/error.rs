//! Budget ledger errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by wallet operations.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// The requested amount exceeds what the wallet has left.
    #[error("insufficient budget: requested {requested}, available {available}")]
    InsufficientBudget {
        /// The amount the caller asked to reserve.
        requested: Decimal,
        /// What the wallet can still cover.
        available: Decimal,
    },

    /// The wallet is closed for the year.
    #[error("wallet for year {year} is closed")]
    WalletClosed {
        /// The year of the closed wallet.
        year: i32,
    },

    /// Budget amounts must be non-negative.
    #[error("amount must not be negative: {amount}")]
    NegativeAmount {
        /// The offending amount.
        amount: Decimal,
    },
}

impl BudgetError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InsufficientBudget { .. } | Self::WalletClosed { .. } => 409,
            Self::NegativeAmount { .. } => 400,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientBudget { .. } => "INSUFFICIENT_BUDGET",
            Self::WalletClosed { .. } => "WALLET_CLOSED",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
        }
    }
}
