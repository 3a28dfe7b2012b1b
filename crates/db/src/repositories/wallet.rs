//! Wallet repository.
//!
//! All movements of `consumed_budget` go through single conditional UPDATE
//! statements, so two concurrent reservations can never oversubscribe a
//! wallet: the database applies the increments serially and the guard
//! `consumed + X <= total` is re-evaluated on the committed value.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use tradelink_core::budget::{AdjustPlan, BudgetError, BudgetService, Wallet, WalletStatus};

use crate::entities::{sea_orm_active_enums, wallets};

/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Wallet not found.
    #[error("wallet not found: {0}")]
    NotFound(Uuid),

    /// Budget rule violation.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Wallet repository for balance reads and atomic budget movements.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    db: DatabaseConnection,
}

impl WalletRepository {
    /// Creates a new wallet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the open wallet for a (supplier, year), if one exists.
    ///
    /// No open wallet means budget for that year is unconstrained; callers
    /// treat the reservation as a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_open<C: ConnectionTrait>(
        &self,
        conn: &C,
        supplier_id: Uuid,
        year: i32,
    ) -> Result<Option<wallets::Model>, WalletError> {
        let wallet = wallets::Entity::find()
            .filter(wallets::Column::SupplierId.eq(supplier_id))
            .filter(wallets::Column::Year.eq(year))
            .filter(wallets::Column::Status.eq(sea_orm_active_enums::WalletStatus::Open))
            .one(conn)
            .await?;
        Ok(wallet)
    }

    /// Loads a wallet by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the wallet does not exist.
    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        wallet_id: Uuid,
    ) -> Result<wallets::Model, WalletError> {
        wallets::Entity::find_by_id(wallet_id)
            .one(conn)
            .await?
            .ok_or(WalletError::NotFound(wallet_id))
    }

    /// Reserves an amount against a wallet.
    ///
    /// The reservation is one conditional UPDATE:
    /// `consumed = consumed + X WHERE id = .. AND status = open AND
    /// consumed + X <= total`. Zero rows affected means the guard failed;
    /// the wallet is then reloaded to report an accurate error.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBudget`, `WalletClosed`, or `NotFound`.
    pub async fn reserve<C: ConnectionTrait>(
        &self,
        conn: &C,
        wallet_id: Uuid,
        amount: Decimal,
    ) -> Result<(), WalletError> {
        BudgetService::validate_amount(amount)?;
        if amount.is_zero() {
            return Ok(());
        }

        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::ConsumedBudget,
                Expr::col(wallets::Column::ConsumedBudget).add(amount),
            )
            .col_expr(wallets::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(wallets::Column::Id.eq(wallet_id))
            .filter(wallets::Column::Status.eq(sea_orm_active_enums::WalletStatus::Open))
            .filter(
                Expr::col(wallets::Column::ConsumedBudget)
                    .add(amount)
                    .lte(Expr::col(wallets::Column::TotalBudget)),
            )
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            // The guard failed; reload to tell the caller why. If the
            // reloaded snapshot would pass (a concurrent release just freed
            // room), still report the balance the update saw.
            let wallet = to_core(&self.get(conn, wallet_id).await?);
            let err = BudgetService::check_reservation(&wallet, amount).err().map_or(
                BudgetError::InsufficientBudget {
                    requested: amount,
                    available: wallet.available(),
                },
                |e| e,
            );
            return Err(WalletError::Budget(err));
        }
        Ok(())
    }

    /// Releases an amount from a wallet, clamping `consumed` at zero.
    ///
    /// Releases succeed regardless of wallet status so that deleting an old
    /// plan always frees its budget.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the wallet does not exist.
    pub async fn release<C: ConnectionTrait>(
        &self,
        conn: &C,
        wallet_id: Uuid,
        amount: Decimal,
    ) -> Result<(), WalletError> {
        BudgetService::validate_amount(amount)?;
        if amount.is_zero() {
            return Ok(());
        }

        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::ConsumedBudget,
                Expr::cust_with_values("GREATEST(consumed_budget - ?, 0)", [amount]),
            )
            .col_expr(wallets::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(wallets::Column::Id.eq(wallet_id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(WalletError::NotFound(wallet_id));
        }
        Ok(())
    }

    /// Applies a planned adjustment.
    ///
    /// `MoveWallet` executes as release-then-reserve in that order. Callers
    /// run this inside their transaction, so a failed reserve aborts the
    /// whole transaction and the release never becomes visible.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the underlying movements.
    pub async fn apply_adjustment<C: ConnectionTrait>(
        &self,
        conn: &C,
        plan: AdjustPlan,
        old_wallet: Option<Uuid>,
        new_wallet: Option<Uuid>,
    ) -> Result<(), WalletError> {
        match plan {
            AdjustPlan::NoOp => Ok(()),
            AdjustPlan::SameWallet { delta } => {
                let Some(wallet_id) = old_wallet else {
                    return Ok(());
                };
                if delta > Decimal::ZERO {
                    self.reserve(conn, wallet_id, delta).await
                } else {
                    self.release(conn, wallet_id, -delta).await
                }
            }
            AdjustPlan::MoveWallet { release, reserve } => {
                if let Some(wallet_id) = old_wallet {
                    self.release(conn, wallet_id, release).await?;
                }
                if let Some(wallet_id) = new_wallet {
                    self.reserve(conn, wallet_id, reserve).await?;
                }
                Ok(())
            }
        }
    }

    /// The available balance of a supplier's wallet for a year, if an open
    /// wallet exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance(
        &self,
        supplier_id: Uuid,
        year: i32,
    ) -> Result<Option<Wallet>, WalletError> {
        let wallet = self.find_open(&self.db, supplier_id, year).await?;
        Ok(wallet.map(|w| to_core(&w)))
    }
}

/// Maps a wallet row onto the core domain type.
#[must_use]
pub fn to_core(model: &wallets::Model) -> Wallet {
    Wallet {
        id: model.id,
        tenant_id: model.tenant_id,
        supplier_id: model.supplier_id,
        year: model.year,
        total_budget: model.total_budget,
        consumed_budget: model.consumed_budget,
        status: WalletStatus::from(model.status),
        created_at: model.created_at.to_utc(),
        updated_at: model.updated_at.to_utc(),
    }
}
