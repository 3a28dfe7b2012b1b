//! Wallet reservation checks and adjustment planning.

use rust_decimal::Decimal;

use crate::budget::error::BudgetError;
use crate::budget::types::Wallet;

/// How a budget change maps onto wallet movements.
///
/// The data layer executes each movement as a single atomic conditional
/// update; `MoveWallet` is two ordered movements inside one transaction, so
/// a failed reserve rolls the release back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustPlan {
    /// Nothing to move.
    NoOp,
    /// Apply one signed delta to the wallet the reservation already lives in.
    /// A negative delta is a release and always succeeds.
    SameWallet {
        /// New amount minus old amount.
        delta: Decimal,
    },
    /// The reservation moves to a different wallet (year changed): release
    /// the old amount from the old wallet, then reserve the new amount
    /// against the new wallet.
    MoveWallet {
        /// Amount to release from the old wallet.
        release: Decimal,
        /// Amount to reserve against the new wallet.
        reserve: Decimal,
    },
}

/// Stateless wallet logic. Pure; the repository executes the results.
pub struct BudgetService;

impl BudgetService {
    /// Rejects negative amounts before any wallet movement is attempted.
    pub fn validate_amount(amount: Decimal) -> Result<(), BudgetError> {
        if amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount { amount });
        }
        Ok(())
    }

    /// Checks that a wallet can cover a reservation.
    ///
    /// This is an advisory pre-check for error reporting; the authoritative
    /// guard is the conditional update the repository issues, so a
    /// concurrent reservation can never oversubscribe the wallet.
    pub fn check_reservation(wallet: &Wallet, amount: Decimal) -> Result<(), BudgetError> {
        Self::validate_amount(amount)?;
        if !wallet.is_open() {
            return Err(BudgetError::WalletClosed { year: wallet.year });
        }
        if amount > wallet.available() {
            return Err(BudgetError::InsufficientBudget {
                requested: amount,
                available: wallet.available(),
            });
        }
        Ok(())
    }

    /// Plans the wallet movements for a budget or year change.
    ///
    /// `same_wallet` is whether the old and new reservations land in the
    /// same (supplier, year) envelope.
    pub fn plan_adjustment(
        old_amount: Decimal,
        new_amount: Decimal,
        same_wallet: bool,
    ) -> Result<AdjustPlan, BudgetError> {
        Self::validate_amount(old_amount)?;
        Self::validate_amount(new_amount)?;

        if same_wallet {
            let delta = new_amount - old_amount;
            if delta.is_zero() {
                return Ok(AdjustPlan::NoOp);
            }
            return Ok(AdjustPlan::SameWallet { delta });
        }

        Ok(AdjustPlan::MoveWallet {
            release: old_amount,
            reserve: new_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::WalletStatus;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn wallet(total: Decimal, consumed: Decimal, status: WalletStatus) -> Wallet {
        Wallet {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            year: 2026,
            total_budget: total,
            consumed_budget: consumed,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reservation_within_available_passes() {
        let w = wallet(dec!(1000), dec!(400), WalletStatus::Open);
        assert!(BudgetService::check_reservation(&w, dec!(600)).is_ok());
    }

    #[test]
    fn test_reservation_over_available_fails_with_amounts() {
        let w = wallet(dec!(1000), dec!(400), WalletStatus::Open);
        let err = BudgetService::check_reservation(&w, dec!(600.01)).unwrap_err();
        match err {
            BudgetError::InsufficientBudget {
                requested,
                available,
            } => {
                assert_eq!(requested, dec!(600.01));
                assert_eq!(available, dec!(600));
            }
            other => panic!("expected InsufficientBudget, got {other:?}"),
        }
    }

    #[test]
    fn test_reservation_boundary_on_partially_consumed_wallet() {
        let w = wallet(dec!(1000), dec!(200), WalletStatus::Open);
        assert!(BudgetService::check_reservation(&w, dec!(700)).is_ok());

        let err = BudgetService::check_reservation(&w, dec!(900)).unwrap_err();
        match err {
            BudgetError::InsufficientBudget {
                requested,
                available,
            } => {
                assert_eq!(requested, dec!(900));
                assert_eq!(available, dec!(800));
            }
            other => panic!("expected InsufficientBudget, got {other:?}"),
        }
    }

    #[test]
    fn test_reservation_against_closed_wallet_fails() {
        let w = wallet(dec!(1000), dec!(0), WalletStatus::Closed);
        let err = BudgetService::check_reservation(&w, dec!(1)).unwrap_err();
        assert!(matches!(err, BudgetError::WalletClosed { year: 2026 }));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let w = wallet(dec!(1000), dec!(0), WalletStatus::Open);
        let err = BudgetService::check_reservation(&w, dec!(-5)).unwrap_err();
        assert!(matches!(err, BudgetError::NegativeAmount { .. }));
    }

    #[test]
    fn test_zero_reservation_is_allowed() {
        let w = wallet(dec!(1000), dec!(1000), WalletStatus::Open);
        assert!(BudgetService::check_reservation(&w, dec!(0)).is_ok());
    }

    #[test]
    fn test_same_wallet_adjustment_is_a_delta() {
        let plan = BudgetService::plan_adjustment(dec!(300), dec!(500), true).unwrap();
        assert_eq!(plan, AdjustPlan::SameWallet { delta: dec!(200) });
    }

    #[test]
    fn test_same_wallet_decrease_is_a_negative_delta() {
        let plan = BudgetService::plan_adjustment(dec!(500), dec!(300), true).unwrap();
        assert_eq!(plan, AdjustPlan::SameWallet { delta: dec!(-200) });
    }

    #[test]
    fn test_unchanged_amount_is_a_noop() {
        let plan = BudgetService::plan_adjustment(dec!(500), dec!(500), true).unwrap();
        assert_eq!(plan, AdjustPlan::NoOp);
    }

    #[test]
    fn test_year_change_releases_then_reserves() {
        let plan = BudgetService::plan_adjustment(dec!(500), dec!(750), false).unwrap();
        assert_eq!(
            plan,
            AdjustPlan::MoveWallet {
                release: dec!(500),
                reserve: dec!(750),
            }
        );
    }
}
