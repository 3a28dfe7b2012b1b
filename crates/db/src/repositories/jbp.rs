//! JBP repository: plan CRUD driving the budget ledger, and the approval
//! workflow with its transactional cascade.
//!
//! Every scoped read goes through the filter composer, so a plan outside
//! the caller's scope is indistinguishable from a nonexistent one.

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use tradelink_core::budget::{BudgetError, BudgetService};
use tradelink_core::scope::{AccessScope, BaseFilter};
use tradelink_core::workflow::{
    AssetKind, CascadeItem, HistoryAction, JbpStatus, WorkflowError, WorkflowService,
    build_cascade,
};

use crate::entities::{
    assets, campaign_items, campaigns, execution_plans, execution_tasks, jbp_item_stores,
    jbp_items, jbps, retails, sea_orm_active_enums, stores, suppliers, workflow_history,
};
use crate::repositories::scope::{JBP_SCOPE, scoped_condition};
use crate::repositories::wallet::{WalletError, WalletRepository};

/// Error types for JBP operations.
#[derive(Debug, thiserror::Error)]
pub enum JbpError {
    /// Plan not found, or outside the caller's scope.
    #[error("plan not found: {0}")]
    NotFound(Uuid),

    /// The caller may not write to this plan's parties.
    #[error("access denied")]
    AccessDenied,

    /// Workflow rule violation.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Budget rule violation.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Wallet operation failure.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for one plan item.
#[derive(Debug, Clone)]
pub struct CreateJbpItemInput {
    /// Item name.
    pub name: String,
    /// Linked marketing asset, if any.
    pub asset_id: Option<Uuid>,
    /// Item budget (informational; the wallet reservation covers the plan
    /// total).
    pub budget: Decimal,
    /// Item activity start.
    pub start_date: Option<chrono::NaiveDate>,
    /// Item activity end.
    pub end_date: Option<chrono::NaiveDate>,
    /// Stores the item runs in.
    pub store_ids: Vec<Uuid>,
}

/// Input for creating a plan.
#[derive(Debug, Clone)]
pub struct CreateJbpInput {
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Supplier party.
    pub supplier_id: Uuid,
    /// Retail party.
    pub retail_id: Uuid,
    /// Plan title.
    pub title: String,
    /// Total budget to reserve.
    pub total_budget: Decimal,
    /// Plan start.
    pub start_date: chrono::NaiveDate,
    /// Plan end.
    pub end_date: chrono::NaiveDate,
    /// Plan items.
    pub items: Vec<CreateJbpItemInput>,
}

/// Input for updating a plan. Only draft and negotiation plans are editable.
#[derive(Debug, Clone, Default)]
pub struct UpdateJbpInput {
    /// New title.
    pub title: Option<String>,
    /// New total budget.
    pub total_budget: Option<Decimal>,
    /// New start date (a year change moves the reservation between wallets).
    pub start_date: Option<chrono::NaiveDate>,
    /// New end date.
    pub end_date: Option<chrono::NaiveDate>,
}

/// A plan item with its store links.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JbpItemWithStores {
    /// Item record.
    pub item: jbp_items::Model,
    /// Linked store ids.
    pub store_ids: Vec<Uuid>,
}

/// A plan with its parties and items.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JbpAggregate {
    /// Plan record.
    pub jbp: jbps::Model,
    /// The supplier party.
    pub supplier: suppliers::Model,
    /// The retail party.
    pub retail: retails::Model,
    /// Items with store links.
    pub items: Vec<JbpItemWithStores>,
}

/// JBP repository.
#[derive(Debug, Clone)]
pub struct JbpRepository {
    db: DatabaseConnection,
    wallets: WalletRepository,
}

impl JbpRepository {
    /// Creates a new JBP repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let wallets = WalletRepository::new(db.clone());
        Self { db, wallets }
    }

    /// Creates a plan, reserving its budget against the supplier's wallet
    /// for the start year. No open wallet means the budget is unconstrained
    /// and no wallet backing is recorded.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied`, `InvalidReference`, `InsufficientBudget`, or
    /// a database error. Any failure rolls the whole creation back.
    pub async fn create(
        &self,
        scope: &AccessScope,
        actor_id: Uuid,
        input: CreateJbpInput,
    ) -> Result<JbpAggregate, JbpError> {
        ensure_writable(scope, input.tenant_id, input.supplier_id, input.retail_id)?;

        let txn = self.db.begin().await?;

        self.validate_assets(&txn, input.tenant_id, &input.items).await?;
        self.validate_stores(&txn, input.tenant_id, input.retail_id, &input.items)
            .await?;

        let year = input.start_date.year();
        let wallet_id = match self
            .wallets
            .find_open(&txn, input.supplier_id, year)
            .await?
        {
            Some(wallet) => {
                self.wallets
                    .reserve(&txn, wallet.id, input.total_budget)
                    .await?;
                Some(wallet.id)
            }
            None => {
                BudgetService::validate_amount(input.total_budget)?;
                None
            }
        };

        let now = Utc::now().into();
        let jbp_id = Uuid::new_v4();

        let jbp = jbps::ActiveModel {
            id: Set(jbp_id),
            tenant_id: Set(input.tenant_id),
            supplier_id: Set(input.supplier_id),
            retail_id: Set(input.retail_id),
            title: Set(input.title),
            status: Set(sea_orm_active_enums::JbpStatus::Draft),
            total_budget: Set(input.total_budget),
            wallet_id: Set(wallet_id),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_by: Set(actor_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        jbp.insert(&txn).await?;

        for item_input in input.items {
            let item_id = Uuid::new_v4();
            let item = jbp_items::ActiveModel {
                id: Set(item_id),
                jbp_id: Set(jbp_id),
                name: Set(item_input.name),
                asset_id: Set(item_input.asset_id),
                budget: Set(item_input.budget),
                start_date: Set(item_input.start_date),
                end_date: Set(item_input.end_date),
                created_at: Set(now),
                updated_at: Set(now),
            };
            item.insert(&txn).await?;

            for store_id in item_input.store_ids {
                let link = jbp_item_stores::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    jbp_item_id: Set(item_id),
                    store_id: Set(store_id),
                    created_at: Set(now),
                };
                link.insert(&txn).await?;
            }
        }

        record_history(
            &txn,
            jbp_id,
            HistoryAction::Created,
            JbpStatus::Draft,
            JbpStatus::Draft,
            actor_id,
        )
        .await?;

        txn.commit().await?;
        self.get(scope, jbp_id).await
    }

    /// Gets a plan by id within the caller's scope.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for both nonexistent and out-of-scope plans.
    pub async fn get(&self, scope: &AccessScope, jbp_id: Uuid) -> Result<JbpAggregate, JbpError> {
        let jbp = load_scoped(&self.db, scope, jbp_id).await?;

        let supplier = suppliers::Entity::find_by_id(jbp.supplier_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("supplier {}", jbp.supplier_id)))?;
        let retail = retails::Entity::find_by_id(jbp.retail_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("retail {}", jbp.retail_id)))?;

        let items = jbp_items::Entity::find()
            .filter(jbp_items::Column::JbpId.eq(jbp_id))
            .order_by_asc(jbp_items::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let item_ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        let links = jbp_item_stores::Entity::find()
            .filter(jbp_item_stores::Column::JbpItemId.is_in(item_ids))
            .all(&self.db)
            .await?;

        let mut stores_by_item: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in links {
            stores_by_item
                .entry(link.jbp_item_id)
                .or_default()
                .push(link.store_id);
        }

        let items = items
            .into_iter()
            .map(|item| {
                let store_ids = stores_by_item.remove(&item.id).unwrap_or_default();
                JbpItemWithStores { item, store_ids }
            })
            .collect();

        Ok(JbpAggregate {
            jbp,
            supplier,
            retail,
            items,
        })
    }

    /// Lists plans within the caller's scope, optionally by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: &AccessScope,
        status: Option<JbpStatus>,
    ) -> Result<Vec<jbps::Model>, JbpError> {
        let mut query = jbps::Entity::find()
            .filter(scoped_condition(BaseFilter::new(), scope, &JBP_SCOPE))
            .order_by_desc(jbps::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(
                jbps::Column::Status.eq(sea_orm_active_enums::JbpStatus::from(status)),
            );
        }

        Ok(query.all(&self.db).await?)
    }

    /// Updates a plan, adjusting the wallet reservation.
    ///
    /// A budget change within the same start year is one signed delta on
    /// the backing wallet. A year change moves the reservation: release
    /// from the old wallet, then reserve against the new year's wallet,
    /// both inside this transaction so a failed reserve undoes the release.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidTransition` for non-editable statuses,
    /// `InsufficientBudget`, or a database error.
    pub async fn update(
        &self,
        scope: &AccessScope,
        jbp_id: Uuid,
        input: UpdateJbpInput,
    ) -> Result<JbpAggregate, JbpError> {
        let txn = self.db.begin().await?;

        let jbp = load_scoped(&txn, scope, jbp_id).await?;
        let status = JbpStatus::from(jbp.status);
        if !matches!(status, JbpStatus::Draft | JbpStatus::Negotiation) {
            return Err(WorkflowError::InvalidTransition {
                from: status,
                action: "edit",
            }
            .into());
        }

        let old_budget = jbp.total_budget;
        let new_budget = input.total_budget.unwrap_or(old_budget);
        let old_year = jbp.start_date.year();
        let new_start = input.start_date.unwrap_or(jbp.start_date);
        let new_year = new_start.year();
        let same_wallet = old_year == new_year;

        let old_wallet = jbp.wallet_id;
        let new_wallet = if same_wallet {
            old_wallet
        } else {
            self.wallets
                .find_open(&txn, jbp.supplier_id, new_year)
                .await?
                .map(|w| w.id)
        };

        let plan = BudgetService::plan_adjustment(old_budget, new_budget, same_wallet)?;
        self.wallets
            .apply_adjustment(&txn, plan, old_wallet, new_wallet)
            .await?;

        let mut active: jbps::ActiveModel = jbp.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        active.total_budget = Set(new_budget);
        active.start_date = Set(new_start);
        if let Some(end_date) = input.end_date {
            active.end_date = Set(end_date);
        }
        active.wallet_id = Set(new_wallet);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;
        self.get(scope, jbp_id).await
    }

    /// Deletes a draft or negotiation plan, releasing its reservation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidTransition` for approved/executing
    /// plans, or a database error.
    pub async fn delete(&self, scope: &AccessScope, jbp_id: Uuid) -> Result<(), JbpError> {
        let txn = self.db.begin().await?;

        let jbp = load_scoped(&txn, scope, jbp_id).await?;
        let status = JbpStatus::from(jbp.status);
        if !matches!(status, JbpStatus::Draft | JbpStatus::Negotiation) {
            return Err(WorkflowError::InvalidTransition {
                from: status,
                action: "delete",
            }
            .into());
        }

        if let Some(wallet_id) = jbp.wallet_id {
            self.wallets
                .release(&txn, wallet_id, jbp.total_budget)
                .await?;
        }

        jbps::Entity::delete_by_id(jbp_id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Submits a draft plan into negotiation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidTransition`.
    pub async fn submit(
        &self,
        scope: &AccessScope,
        jbp_id: Uuid,
        actor_id: Uuid,
    ) -> Result<JbpAggregate, JbpError> {
        self.transition(scope, jbp_id, actor_id, HistoryAction::Submitted, |s| {
            WorkflowService::submit(s)
        })
        .await
    }

    /// Approves a plan: state transition, one history row, and the full
    /// cascade, all in a single transaction. Any failure leaves no partial
    /// state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyApproved` for plans no longer in
    /// draft/negotiation, or a database error.
    pub async fn approve(
        &self,
        scope: &AccessScope,
        jbp_id: Uuid,
        actor_id: Uuid,
    ) -> Result<JbpAggregate, JbpError> {
        let txn = self.db.begin().await?;

        let jbp = load_scoped(&txn, scope, jbp_id).await?;
        let from = JbpStatus::from(jbp.status);
        let to = WorkflowService::approve(from)?;

        let cascade_items = self.load_cascade_items(&txn, &jbp).await?;
        let plan = build_cascade(jbp.id, &jbp.title, jbp.end_date, &cascade_items);

        let now = Utc::now().into();

        if let Some(campaign) = plan.campaign {
            let campaign_id = Uuid::new_v4();
            let row = campaigns::ActiveModel {
                id: Set(campaign_id),
                tenant_id: Set(jbp.tenant_id),
                jbp_id: Set(jbp.id),
                supplier_id: Set(jbp.supplier_id),
                retail_id: Set(Some(jbp.retail_id)),
                name: Set(campaign.name),
                status: Set(sea_orm_active_enums::CampaignStatus::Planned),
                start_date: Set(jbp.start_date),
                end_date: Set(jbp.end_date),
                created_at: Set(now),
                updated_at: Set(now),
            };
            row.insert(&txn).await?;

            for item in campaign.items {
                let row = campaign_items::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    campaign_id: Set(campaign_id),
                    jbp_item_id: Set(item.jbp_item_id),
                    title: Set(item.title),
                    notes: Set(item.notes),
                    status: Set(sea_orm_active_enums::CampaignItemStatus::Draft),
                    created_at: Set(now),
                };
                row.insert(&txn).await?;
            }
        }

        if let Some(execution) = plan.execution {
            let plan_id = Uuid::new_v4();
            let row = execution_plans::ActiveModel {
                id: Set(plan_id),
                tenant_id: Set(jbp.tenant_id),
                jbp_id: Set(jbp.id),
                supplier_id: Set(jbp.supplier_id),
                retail_id: Set(Some(jbp.retail_id)),
                name: Set(execution.name),
                status: Set(sea_orm_active_enums::ExecutionPlanStatus::Executing),
                created_at: Set(now),
                updated_at: Set(now),
            };
            row.insert(&txn).await?;

            for task in execution.tasks {
                let row = execution_tasks::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    execution_plan_id: Set(plan_id),
                    jbp_item_id: Set(task.jbp_item_id),
                    store_id: Set(task.store_id),
                    name: Set(task.name),
                    status: Set(sea_orm_active_enums::ExecutionTaskStatus::Pending),
                    checklist: Set(task.checklist),
                    deadline: Set(task.deadline),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                row.insert(&txn).await?;
            }
        }

        record_history(&txn, jbp.id, HistoryAction::Approved, from, to, actor_id).await?;

        let mut active: jbps::ActiveModel = jbp.into();
        active.status = Set(to.into());
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;
        self.get(scope, jbp_id).await
    }

    /// Reopens an approved plan into negotiation. Writes its own history
    /// row; the materialized cascade is left in place.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidTransition`.
    pub async fn reopen(
        &self,
        scope: &AccessScope,
        jbp_id: Uuid,
        actor_id: Uuid,
    ) -> Result<JbpAggregate, JbpError> {
        self.transition(scope, jbp_id, actor_id, HistoryAction::Reopened, |s| {
            WorkflowService::reopen(s)
        })
        .await
    }

    /// Moves an approved plan into execution.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidTransition`.
    pub async fn start_execution(
        &self,
        scope: &AccessScope,
        jbp_id: Uuid,
        actor_id: Uuid,
    ) -> Result<JbpAggregate, JbpError> {
        self.transition(scope, jbp_id, actor_id, HistoryAction::Started, |s| {
            WorkflowService::start_execution(s)
        })
        .await
    }

    /// Lists the workflow history of a plan, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is not visible to the caller.
    pub async fn history(
        &self,
        scope: &AccessScope,
        jbp_id: Uuid,
    ) -> Result<Vec<workflow_history::Model>, JbpError> {
        load_scoped(&self.db, scope, jbp_id).await?;

        Ok(workflow_history::Entity::find()
            .filter(workflow_history::Column::JbpId.eq(jbp_id))
            .order_by_asc(workflow_history::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Runs a cascade-free transition: guard, status update, history row.
    async fn transition(
        &self,
        scope: &AccessScope,
        jbp_id: Uuid,
        actor_id: Uuid,
        action: HistoryAction,
        step: impl Fn(JbpStatus) -> Result<JbpStatus, WorkflowError>,
    ) -> Result<JbpAggregate, JbpError> {
        let txn = self.db.begin().await?;

        let jbp = load_scoped(&txn, scope, jbp_id).await?;
        let from = JbpStatus::from(jbp.status);
        let to = step(from)?;

        record_history(&txn, jbp.id, action, from, to, actor_id).await?;

        let mut active: jbps::ActiveModel = jbp.into();
        active.status = Set(to.into());
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;
        self.get(scope, jbp_id).await
    }

    /// Loads the items of a plan with asset kinds and store links resolved.
    async fn load_cascade_items<C: ConnectionTrait>(
        &self,
        conn: &C,
        jbp: &jbps::Model,
    ) -> Result<Vec<CascadeItem>, JbpError> {
        let items = jbp_items::Entity::find()
            .filter(jbp_items::Column::JbpId.eq(jbp.id))
            .order_by_asc(jbp_items::Column::CreatedAt)
            .all(conn)
            .await?;

        let asset_ids: Vec<Uuid> = items.iter().filter_map(|i| i.asset_id).collect();
        let kind_by_asset: HashMap<Uuid, AssetKind> = assets::Entity::find()
            .filter(assets::Column::Id.is_in(asset_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|a| (a.id, AssetKind::from(a.asset_type)))
            .collect();

        let item_ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        let links = jbp_item_stores::Entity::find()
            .filter(jbp_item_stores::Column::JbpItemId.is_in(item_ids))
            .all(conn)
            .await?;

        let mut stores_by_item: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in links {
            stores_by_item
                .entry(link.jbp_item_id)
                .or_default()
                .push(link.store_id);
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let asset_kind = item.asset_id.and_then(|id| kind_by_asset.get(&id).copied());
                let store_ids = stores_by_item.remove(&item.id).unwrap_or_default();
                CascadeItem {
                    item_id: item.id,
                    name: item.name,
                    asset_kind,
                    end_date: item.end_date,
                    store_ids,
                }
            })
            .collect())
    }

    /// Checks that every referenced asset exists within the tenant.
    async fn validate_assets<C: ConnectionTrait>(
        &self,
        conn: &C,
        tenant_id: Uuid,
        items: &[CreateJbpItemInput],
    ) -> Result<(), JbpError> {
        let asset_ids: Vec<Uuid> = items.iter().filter_map(|i| i.asset_id).collect();
        if asset_ids.is_empty() {
            return Ok(());
        }

        let known: Vec<Uuid> = assets::Entity::find()
            .filter(assets::Column::Id.is_in(asset_ids.clone()))
            .filter(assets::Column::TenantId.eq(tenant_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        for asset_id in asset_ids {
            if !known.contains(&asset_id) {
                return Err(WorkflowError::InvalidReference {
                    what: format!("asset {asset_id}"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Checks that every referenced store belongs to the tenant and to the
    /// plan's retail.
    async fn validate_stores<C: ConnectionTrait>(
        &self,
        conn: &C,
        tenant_id: Uuid,
        retail_id: Uuid,
        items: &[CreateJbpItemInput],
    ) -> Result<(), JbpError> {
        let store_ids: Vec<Uuid> = items.iter().flat_map(|i| i.store_ids.clone()).collect();
        if store_ids.is_empty() {
            return Ok(());
        }

        let known: Vec<Uuid> = stores::Entity::find()
            .filter(stores::Column::Id.is_in(store_ids.clone()))
            .filter(stores::Column::TenantId.eq(tenant_id))
            .filter(stores::Column::RetailId.eq(retail_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        for store_id in store_ids {
            if !known.contains(&store_id) {
                return Err(WorkflowError::InvalidReference {
                    what: format!("store {store_id}"),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Loads a plan through the composed scope filter. Zero rows means not
/// found, whether the plan is missing or merely out of scope.
async fn load_scoped<C: ConnectionTrait>(
    conn: &C,
    scope: &AccessScope,
    jbp_id: Uuid,
) -> Result<jbps::Model, JbpError> {
    jbps::Entity::find()
        .filter(jbps::Column::Id.eq(jbp_id))
        .filter(scoped_condition(BaseFilter::new(), scope, &JBP_SCOPE))
        .one(conn)
        .await?
        .ok_or(JbpError::NotFound(jbp_id))
}

/// Appends one immutable history row.
async fn record_history<C: ConnectionTrait>(
    conn: &C,
    jbp_id: Uuid,
    action: HistoryAction,
    from: JbpStatus,
    to: JbpStatus,
    actor_id: Uuid,
) -> Result<(), DbErr> {
    let row = workflow_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        jbp_id: Set(jbp_id),
        action: Set(action.into()),
        from_status: Set(from.into()),
        to_status: Set(to.into()),
        actor_id: Set(actor_id),
        note: Set(None),
        created_at: Set(Utc::now().into()),
    };
    row.insert(conn).await?;
    Ok(())
}

/// Write-side scope check: the plan's parties must be explicitly inside
/// the caller's scope. A tenant-only scope (empty party sets) cannot write.
fn ensure_writable(
    scope: &AccessScope,
    tenant_id: Uuid,
    supplier_id: Uuid,
    retail_id: Uuid,
) -> Result<(), JbpError> {
    match scope {
        AccessScope::Unrestricted => Ok(()),
        AccessScope::DenyAll => Err(JbpError::AccessDenied),
        AccessScope::Scoped {
            tenant_id: scope_tenant,
            supplier_ids,
            retail_ids,
        } => {
            if *scope_tenant == tenant_id
                && supplier_ids.contains(&supplier_id)
                && retail_ids.contains(&retail_id)
            {
                Ok(())
            } else {
                Err(JbpError::AccessDenied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writable_requires_both_parties_in_scope() {
        let tenant = Uuid::new_v4();
        let supplier = Uuid::new_v4();
        let retail = Uuid::new_v4();
        let scope = AccessScope::scoped(tenant, [supplier], [retail]);

        assert!(ensure_writable(&scope, tenant, supplier, retail).is_ok());
        assert!(ensure_writable(&scope, tenant, supplier, Uuid::new_v4()).is_err());
        assert!(ensure_writable(&scope, Uuid::new_v4(), supplier, retail).is_err());
    }

    #[test]
    fn test_tenant_only_scope_cannot_write() {
        let tenant = Uuid::new_v4();
        let scope = AccessScope::scoped(tenant, [], []);
        let result = ensure_writable(&scope, tenant, Uuid::new_v4(), Uuid::new_v4());
        assert!(matches!(result, Err(JbpError::AccessDenied)));
    }

    #[test]
    fn test_aggregate_carries_party_records() {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let tenant = Uuid::new_v4();
        let supplier = suppliers::Model {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            name: "Acme Foods".to_string(),
            created_at: now,
            updated_at: now,
        };
        let retail = retails::Model {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            name: "MegaMart".to_string(),
            created_at: now,
            updated_at: now,
        };
        let jbp = jbps::Model {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            supplier_id: supplier.id,
            retail_id: retail.id,
            title: "Spring push".to_string(),
            status: sea_orm_active_enums::JbpStatus::Approved,
            total_budget: Decimal::ZERO,
            wallet_id: None,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        let aggregate = JbpAggregate {
            jbp,
            supplier,
            retail,
            items: vec![],
        };
        let json = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(json["supplier"]["name"], "Acme Foods");
        assert_eq!(json["retail"]["name"], "MegaMart");
    }

    #[test]
    fn test_deny_all_scope_cannot_write() {
        let result = ensure_writable(
            &AccessScope::DenyAll,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert!(matches!(result, Err(JbpError::AccessDenied)));
    }
}
