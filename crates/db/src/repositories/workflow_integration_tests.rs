//! Integration tests for the approval workflow logic.
//!
//! Exercises the full path a repository drives: scope resolution, filter
//! composition, the state machine, wallet planning, and cascade building.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sea_orm::{EntityTrait, QueryFilter, QueryTrait};
    use uuid::Uuid;

    use tradelink_core::budget::{AdjustPlan, BudgetService};
    use tradelink_core::scope::{
        AccessScope, BaseFilter, Principal, ScopeResolver, ScopeStrategy, ScopedFilter,
        apply_scope,
    };
    use tradelink_core::workflow::{
        AssetKind, CascadeItem, JbpStatus, WorkflowError, WorkflowService, build_cascade,
    };

    use crate::repositories::scope::{JBP_SCOPE, condition_for, scoped_condition};

    fn supplier_principal(tenant: Uuid, supplier: Uuid) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            role: "standard".to_string(),
            channel: "industry".to_string(),
            tenant_id: Some(tenant),
            supplier_id: Some(supplier),
            retail_id: None,
        }
    }

    /// A supplier user's strategy names exactly the partnership lookup a
    /// repository must run, and the assembled scope composes into a filter
    /// that pins tenant and supplier.
    #[test]
    fn test_supplier_resolution_feeds_query_path() {
        let tenant = Uuid::new_v4();
        let supplier = Uuid::new_v4();
        let partner_retail = Uuid::new_v4();

        let principal = supplier_principal(tenant, supplier);
        let strategy = ScopeResolver::strategy_for(&principal);
        assert_eq!(
            strategy,
            ScopeStrategy::SupplierChannel {
                tenant_id: tenant,
                supplier_id: supplier,
            }
        );

        let scope = ScopeResolver::supplier_channel_scope(tenant, supplier, [partner_retail]);
        let filter = apply_scope(
            &ScopedFilter::Satisfiable(BaseFilter::new()),
            &scope,
            &JBP_SCOPE,
        );
        assert!(!filter.is_unsatisfiable());

        // A plan pinned to a non-partner retail must be invisible.
        let foreign = apply_scope(
            &ScopedFilter::Satisfiable(BaseFilter::new().eq("retail_id", Uuid::new_v4())),
            &scope,
            &JBP_SCOPE,
        );
        assert!(foreign.is_unsatisfiable());
    }

    /// Malformed claims end at a zero-row predicate, never at a missing
    /// filter.
    #[test]
    fn test_denied_principal_renders_zero_row_sql() {
        let mut principal = supplier_principal(Uuid::new_v4(), Uuid::new_v4());
        principal.tenant_id = None;
        assert_eq!(
            ScopeResolver::strategy_for(&principal),
            ScopeStrategy::DenyAll
        );

        let condition = scoped_condition(BaseFilter::new(), &AccessScope::DenyAll, &JBP_SCOPE);
        let sql = crate::entities::jbps::Entity::find()
            .filter(condition)
            .build(sea_orm::DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("1 = 0"));
    }

    /// The full approval pipeline: guard, then cascade counts.
    #[test]
    fn test_approval_guard_then_cascade() {
        // Guard first: a second approval never reaches cascade building.
        assert!(matches!(
            WorkflowService::approve(JbpStatus::Approved),
            Err(WorkflowError::AlreadyApproved)
        ));

        // Both pre-approval states go straight to approved.
        let to = WorkflowService::approve(JbpStatus::Negotiation).unwrap();
        assert_eq!(to, JbpStatus::Approved);
        assert_eq!(
            WorkflowService::approve(JbpStatus::Draft).unwrap(),
            JbpStatus::Approved
        );

        let jbp_id = Uuid::new_v4();
        let store_a = Uuid::new_v4();
        let store_b = Uuid::new_v4();
        let items = vec![
            CascadeItem {
                item_id: Uuid::new_v4(),
                name: "spring banner".to_string(),
                asset_kind: Some(AssetKind::Banner),
                end_date: None,
                store_ids: vec![store_a, store_b],
            },
            CascadeItem {
                item_id: Uuid::new_v4(),
                name: "shelf display".to_string(),
                asset_kind: Some(AssetKind::Display),
                end_date: NaiveDate::from_ymd_opt(2026, 6, 30),
                store_ids: vec![store_a],
            },
        ];
        let jbp_end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let plan = build_cascade(jbp_id, "Spring push", jbp_end, &items);

        let campaign = plan.campaign.expect("banner item yields a campaign");
        assert_eq!(campaign.items.len(), 1);
        assert!(campaign.items[0].notes.contains(&jbp_id.to_string()));

        let execution = plan.execution.expect("store links yield tasks");
        assert_eq!(execution.tasks.len(), 3);
        assert!(execution.tasks.iter().any(|t| t.deadline == jbp_end));
        assert!(execution
            .tasks
            .iter()
            .any(|t| Some(t.deadline) == NaiveDate::from_ymd_opt(2026, 6, 30)));
    }

    /// A budget update that crosses a year boundary plans a wallet move;
    /// one that stays put plans a single delta.
    #[test]
    fn test_budget_adjustment_planning_for_updates() {
        let same_year = BudgetService::plan_adjustment(dec!(10_000), dec!(12_500), true).unwrap();
        assert_eq!(same_year, AdjustPlan::SameWallet { delta: dec!(2_500) });

        let year_change = BudgetService::plan_adjustment(dec!(10_000), dec!(10_000), false).unwrap();
        assert_eq!(
            year_change,
            AdjustPlan::MoveWallet {
                release: dec!(10_000),
                reserve: dec!(10_000),
            }
        );
    }

    /// Re-rendering an already composed filter yields the same SQL.
    #[test]
    fn test_composed_condition_is_stable_under_reapplication() {
        let tenant = Uuid::new_v4();
        let scope = AccessScope::scoped(tenant, [Uuid::new_v4()], [Uuid::new_v4()]);

        let once = apply_scope(
            &ScopedFilter::Satisfiable(BaseFilter::new()),
            &scope,
            &JBP_SCOPE,
        );
        let twice = apply_scope(&once, &scope, &JBP_SCOPE);

        let render = |f: &ScopedFilter| {
            crate::entities::jbps::Entity::find()
                .filter(condition_for(f))
                .build(sea_orm::DbBackend::Postgres)
                .to_string()
        };
        assert_eq!(render(&once), render(&twice));
    }
}
