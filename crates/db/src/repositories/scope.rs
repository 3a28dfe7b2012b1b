//! Scope repository: resolves principals to access scopes and translates
//! composed filters into `SeaORM` conditions.

use chrono::Utc;
use sea_orm::sea_query::{Alias, Condition, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect, Value,
};
use uuid::Uuid;

use tradelink_core::scope::{
    AccessScope, BaseFilter, Clause, FieldValue, Principal, ScopeFields, ScopeResolver,
    ScopeStrategy, ScopedFilter, apply_scope,
};

use crate::entities::{partnerships, retails, suppliers};
use crate::repositories::partnership::PartnershipRepository;

/// Scope field mapping for the jbps table.
pub const JBP_SCOPE: ScopeFields = ScopeFields {
    tenant: Some("tenant_id"),
    supplier: Some("supplier_id"),
    retail: Some("retail_id"),
    allow_null_retail: false,
};

/// Scope field mapping for the campaigns table. An unassigned retail means
/// the campaign is visible to everyone in scope.
pub const CAMPAIGN_SCOPE: ScopeFields = ScopeFields {
    tenant: Some("tenant_id"),
    supplier: Some("supplier_id"),
    retail: Some("retail_id"),
    allow_null_retail: true,
};

/// Scope field mapping for the wallets table.
pub const WALLET_SCOPE: ScopeFields = ScopeFields {
    tenant: Some("tenant_id"),
    supplier: Some("supplier_id"),
    retail: None,
    allow_null_retail: false,
};

/// Scope repository resolving principals against the directory tables.
#[derive(Debug, Clone)]
pub struct ScopeRepository {
    db: DatabaseConnection,
}

impl ScopeRepository {
    /// Creates a new scope repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves a principal to its access scope.
    ///
    /// Classification is pure; this method only executes the lookups the
    /// resulting strategy names. The lookups within a strategy are
    /// independent and run concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup query fails.
    pub async fn resolve(&self, principal: &Principal) -> Result<AccessScope, DbErr> {
        match ScopeResolver::strategy_for(principal) {
            ScopeStrategy::Unrestricted => Ok(AccessScope::Unrestricted),
            ScopeStrategy::DenyAll => Ok(AccessScope::DenyAll),
            ScopeStrategy::TenantWide { tenant_id } => {
                let supplier_ids = suppliers::Entity::find()
                    .filter(suppliers::Column::TenantId.eq(tenant_id))
                    .select_only()
                    .column(suppliers::Column::Id)
                    .into_tuple::<Uuid>()
                    .all(&self.db);
                let retail_ids = retails::Entity::find()
                    .filter(retails::Column::TenantId.eq(tenant_id))
                    .select_only()
                    .column(retails::Column::Id)
                    .into_tuple::<Uuid>()
                    .all(&self.db);

                let (supplier_ids, retail_ids) = tokio::try_join!(supplier_ids, retail_ids)?;
                Ok(ScopeResolver::tenant_wide_scope(
                    tenant_id,
                    supplier_ids,
                    retail_ids,
                ))
            }
            ScopeStrategy::SupplierChannel {
                tenant_id,
                supplier_id,
            } => {
                let partner_retail_ids = self
                    .partner_ids(
                        tenant_id,
                        partnerships::Column::SupplierId.eq(supplier_id),
                        partnerships::Column::RetailId,
                    )
                    .await?;
                Ok(ScopeResolver::supplier_channel_scope(
                    tenant_id,
                    supplier_id,
                    partner_retail_ids,
                ))
            }
            ScopeStrategy::RetailChannel {
                tenant_id,
                retail_id,
            } => {
                let partner_supplier_ids = self
                    .partner_ids(
                        tenant_id,
                        partnerships::Column::RetailId.eq(retail_id),
                        partnerships::Column::SupplierId,
                    )
                    .await?;
                Ok(ScopeResolver::retail_channel_scope(
                    tenant_id,
                    retail_id,
                    partner_supplier_ids,
                ))
            }
            ScopeStrategy::TenantOnly { tenant_id } => {
                Ok(ScopeResolver::tenant_only_scope(tenant_id))
            }
        }
    }

    /// The counterparty ids of the currently active partnerships matching
    /// `own_side`.
    async fn partner_ids(
        &self,
        tenant_id: Uuid,
        own_side: sea_orm::sea_query::SimpleExpr,
        counterparty: partnerships::Column,
    ) -> Result<Vec<Uuid>, DbErr> {
        partnerships::Entity::find()
            .filter(partnerships::Column::TenantId.eq(tenant_id))
            .filter(own_side)
            .filter(PartnershipRepository::active_at(Utc::now()))
            .select_only()
            .column(counterparty)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
    }
}

fn field_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Id(id) => (*id).into(),
        FieldValue::Text(s) => s.clone().into(),
        FieldValue::Bool(b) => (*b).into(),
    }
}

/// Translates a composed filter into a `SeaORM` condition.
///
/// The unsatisfiable sentinel becomes a predicate that matches zero rows;
/// it is never dropped.
#[must_use]
pub fn condition_for(filter: &ScopedFilter) -> Condition {
    let base = match filter {
        ScopedFilter::Unsatisfiable => {
            return Condition::all().add(Expr::cust("1 = 0"));
        }
        ScopedFilter::Satisfiable(base) => base,
    };

    let mut condition = Condition::all();
    for clause in &base.clauses {
        condition = condition.add(clause_expr(clause));
    }
    condition
}

fn clause_expr(clause: &Clause) -> Condition {
    match clause {
        Clause::Eq(field, value) => {
            Condition::all().add(Expr::col(Alias::new(field)).eq(field_value(value)))
        }
        Clause::In(field, values) => Condition::all().add(
            Expr::col(Alias::new(field)).is_in(values.iter().map(field_value)),
        ),
        Clause::InOrNull(field, values) => Condition::any()
            .add(Expr::col(Alias::new(field)).is_in(values.iter().map(field_value)))
            .add(Expr::col(Alias::new(field)).is_null()),
        Clause::IsNull(field) => Condition::all().add(Expr::col(Alias::new(field)).is_null()),
    }
}

/// Composes a base filter with a scope and returns the resulting condition.
#[must_use]
pub fn scoped_condition(base: BaseFilter, scope: &AccessScope, fields: &ScopeFields) -> Condition {
    condition_for(&apply_scope(
        &ScopedFilter::Satisfiable(base),
        scope,
        fields,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::jbps;
    use sea_orm::{DbBackend, QueryTrait};

    fn render(condition: Condition) -> String {
        jbps::Entity::find()
            .filter(condition)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_unsatisfiable_maps_to_zero_row_predicate() {
        let sql = render(condition_for(&ScopedFilter::Unsatisfiable));
        assert!(sql.contains("1 = 0"));
    }

    #[test]
    fn test_deny_all_scope_yields_zero_row_predicate() {
        let sql = render(scoped_condition(
            BaseFilter::new(),
            &AccessScope::DenyAll,
            &JBP_SCOPE,
        ));
        assert!(sql.contains("1 = 0"));
    }

    #[test]
    fn test_scoped_filter_pins_tenant_and_parties() {
        let tenant = Uuid::new_v4();
        let supplier = Uuid::new_v4();
        let scope = AccessScope::scoped(tenant, [supplier], []);
        let sql = render(scoped_condition(BaseFilter::new(), &scope, &JBP_SCOPE));

        assert!(sql.contains(&format!(r#""tenant_id" = '{tenant}'"#)));
        assert!(sql.contains(&format!(r#""supplier_id" = '{supplier}'"#)));
    }

    #[test]
    fn test_null_retail_relaxation_renders_or_is_null() {
        let tenant = Uuid::new_v4();
        let retail = Uuid::new_v4();
        let scope = AccessScope::scoped(tenant, [], [retail]);
        let sql = render(scoped_condition(BaseFilter::new(), &scope, &CAMPAIGN_SCOPE));

        assert!(sql.contains(r#""retail_id" IS NULL"#));
        assert!(sql.contains(&format!("'{retail}'")));
    }

    #[test]
    fn test_unrestricted_scope_passes_base_through() {
        let sql = render(scoped_condition(
            BaseFilter::new().eq("status", "draft"),
            &AccessScope::Unrestricted,
            &JBP_SCOPE,
        ));
        assert!(sql.contains(r#""status" = 'draft'"#));
        assert!(!sql.contains("1 = 0"));
    }
}
