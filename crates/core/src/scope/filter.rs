//! Query-filter composition.
//!
//! Folds an [`AccessScope`] into a caller-supplied base filter. The base
//! filter is a flat conjunction of clauses; composition narrows the clauses
//! on the configured tenant/supplier/retail fields and never widens them.
//! A `Scoped` descriptor that can apply no narrowing at all collapses to the
//! unsatisfiable sentinel rather than silently degrading to "no restriction".
//!
//! The composer is pure and idempotent: applying it twice to its own output
//! yields the same result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::scope::types::AccessScope;

/// A literal value in a filter clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// An entity id.
    Id(Uuid),
    /// A text value (e.g. a status).
    Text(String),
    /// A boolean flag.
    Bool(bool),
}

impl From<Uuid> for FieldValue {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl FieldValue {
    /// Returns the id if this value is one.
    #[must_use]
    pub const fn as_id(&self) -> Option<Uuid> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }
}

/// A single conjunct of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clause {
    /// `field = value`.
    Eq(String, FieldValue),
    /// `field IN (values)`.
    In(String, Vec<FieldValue>),
    /// `field IN (values) OR field IS NULL`.
    InOrNull(String, Vec<FieldValue>),
    /// `field IS NULL`.
    IsNull(String),
}

impl Clause {
    /// The field this clause constrains.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Eq(f, _) | Self::In(f, _) | Self::InOrNull(f, _) | Self::IsNull(f) => f,
        }
    }
}

/// A flat conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFilter {
    /// The conjuncts; an empty list matches every row.
    pub clauses: Vec<Clause>,
}

impl BaseFilter {
    /// Creates an empty filter (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality clause.
    #[must_use]
    pub fn eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.clauses.push(Clause::Eq(field.to_string(), value.into()));
        self
    }

    /// Adds a membership clause.
    #[must_use]
    pub fn is_in(mut self, field: &str, values: impl IntoIterator<Item = Uuid>) -> Self {
        self.clauses.push(Clause::In(
            field.to_string(),
            values.into_iter().map(FieldValue::Id).collect(),
        ));
        self
    }

    /// Adds an `IS NULL` clause.
    #[must_use]
    pub fn is_null(mut self, field: &str) -> Self {
        self.clauses.push(Clause::IsNull(field.to_string()));
        self
    }
}

/// Per-entity configuration naming which fields carry scope semantics.
///
/// Not every entity has all three fields; `allow_null_retail` marks entities
/// whose unassigned-retail rows are visible to everyone in scope (e.g. a
/// campaign with no retail assigned yet).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeFields {
    /// Field holding the tenant id, if the entity has one.
    pub tenant: Option<&'static str>,
    /// Field holding the supplier id, if the entity has one.
    pub supplier: Option<&'static str>,
    /// Field holding the retail id, if the entity has one.
    pub retail: Option<&'static str>,
    /// Whether a null retail value means "visible to everyone in scope".
    pub allow_null_retail: bool,
}

/// A composed filter: either a conjunction or the unsatisfiable sentinel.
///
/// The sentinel must be translated by the data layer into a predicate that
/// matches zero rows; it must never be dropped or echoed as the base filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopedFilter {
    /// Matches zero rows, regardless of any other clause.
    Unsatisfiable,
    /// A satisfiable conjunction.
    Satisfiable(BaseFilter),
}

impl ScopedFilter {
    /// Returns true if this filter matches zero rows.
    #[must_use]
    pub const fn is_unsatisfiable(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }
}

impl From<BaseFilter> for ScopedFilter {
    fn from(base: BaseFilter) -> Self {
        Self::Satisfiable(base)
    }
}

/// The membership constraint accumulated for one governed field.
struct FieldConstraint {
    /// Intersection of all id sets pinned by the base filter, if any.
    ids: Option<BTreeSet<Uuid>>,
    /// All set-bearing clauses tolerate null (only `InOrNull` seen).
    null_tolerant: bool,
    /// The base filter pins the field to null.
    pinned_null: bool,
    /// A non-id literal was pinned on the field (never satisfiable here).
    non_id_pin: bool,
}

fn extract_constraint(clauses: &[Clause], field: &str) -> FieldConstraint {
    let mut ids: Option<BTreeSet<Uuid>> = None;
    let mut null_tolerant = true;
    let mut pinned_null = false;
    let mut non_id_pin = false;

    for clause in clauses.iter().filter(|c| c.field() == field) {
        match clause {
            Clause::IsNull(_) => pinned_null = true,
            Clause::Eq(_, value) => {
                null_tolerant = false;
                match value.as_id() {
                    Some(id) => intersect(&mut ids, [id]),
                    None => non_id_pin = true,
                }
            }
            Clause::In(_, values) => {
                null_tolerant = false;
                intersect(&mut ids, values.iter().filter_map(FieldValue::as_id));
            }
            Clause::InOrNull(_, values) => {
                intersect(&mut ids, values.iter().filter_map(FieldValue::as_id));
            }
        }
    }

    FieldConstraint {
        ids,
        null_tolerant,
        pinned_null,
        non_id_pin,
    }
}

fn intersect(acc: &mut Option<BTreeSet<Uuid>>, other: impl IntoIterator<Item = Uuid>) {
    let other: BTreeSet<Uuid> = other.into_iter().collect();
    *acc = Some(match acc.take() {
        Some(existing) => existing.intersection(&other).copied().collect(),
        None => other,
    });
}

/// Builds the narrowed clause for one governed field, or `None` when the
/// combination of base pins and scope set cannot match any row.
fn narrow_field(
    field: &str,
    allowed: &BTreeSet<Uuid>,
    constraint: &FieldConstraint,
    allow_null: bool,
) -> Option<Vec<Clause>> {
    if constraint.non_id_pin {
        return None;
    }

    if constraint.pinned_null {
        // A null pin is only in scope when the null relaxation applies, and
        // then it is already the narrowest possible constraint.
        if allow_null && constraint.ids.is_none() {
            return Some(vec![Clause::IsNull(field.to_string())]);
        }
        return None;
    }

    let narrowed: BTreeSet<Uuid> = match &constraint.ids {
        Some(pinned) => pinned.intersection(allowed).copied().collect(),
        None => allowed.clone(),
    };
    if narrowed.is_empty() {
        return None;
    }

    // The null relaxation survives only while the base filter has not pinned
    // the field to concrete ids with a strict clause.
    let keep_null = allow_null && constraint.null_tolerant;
    let values: Vec<FieldValue> = narrowed.iter().copied().map(FieldValue::Id).collect();

    let clause = if keep_null {
        Clause::InOrNull(field.to_string(), values)
    } else if let [value] = values.as_slice() {
        Clause::Eq(field.to_string(), value.clone())
    } else {
        Clause::In(field.to_string(), values)
    };
    Some(vec![clause])
}

/// Composes a base filter with an access scope for one entity type.
///
/// - `DenyAll` yields the unsatisfiable sentinel regardless of the base.
/// - `Unrestricted` returns the base unchanged.
/// - `Scoped` pins the tenant field and intersects the supplier/retail
///   constraints with the scope sets; a pinned id outside the allowed set,
///   an empty intersection, or a scope carrying no narrowing information
///   for this entity all yield the unsatisfiable sentinel.
#[must_use]
pub fn apply_scope(filter: &ScopedFilter, scope: &AccessScope, fields: &ScopeFields) -> ScopedFilter {
    let base = match filter {
        ScopedFilter::Unsatisfiable => return ScopedFilter::Unsatisfiable,
        ScopedFilter::Satisfiable(base) => base,
    };

    let (tenant_id, supplier_ids, retail_ids) = match scope {
        AccessScope::DenyAll => return ScopedFilter::Unsatisfiable,
        AccessScope::Unrestricted => return filter.clone(),
        AccessScope::Scoped {
            tenant_id,
            supplier_ids,
            retail_ids,
        } => (*tenant_id, supplier_ids, retail_ids),
    };

    // Only the fields that actually get narrowed are rewritten; an empty
    // scope set leaves the field unconstrained by the scope, so any base
    // clauses on it must pass through untouched.
    let mut governed: Vec<&'static str> = Vec::with_capacity(3);
    if let Some(field) = fields.tenant {
        governed.push(field);
    }
    if let Some(field) = fields.supplier
        && !supplier_ids.is_empty()
    {
        governed.push(field);
    }
    if let Some(field) = fields.retail
        && !retail_ids.is_empty()
    {
        governed.push(field);
    }

    let mut clauses: Vec<Clause> = base
        .clauses
        .iter()
        .filter(|c| !governed.contains(&c.field()))
        .cloned()
        .collect();
    let mut narrowed = false;

    if let Some(field) = fields.tenant {
        let constraint = extract_constraint(&base.clauses, field);
        let allowed = BTreeSet::from([tenant_id]);
        match narrow_field(field, &allowed, &constraint, false) {
            Some(extra) => clauses.extend(extra),
            None => return ScopedFilter::Unsatisfiable,
        }
        narrowed = true;
    }

    if let Some(field) = fields.supplier
        && !supplier_ids.is_empty()
    {
        let constraint = extract_constraint(&base.clauses, field);
        match narrow_field(field, supplier_ids, &constraint, false) {
            Some(extra) => clauses.extend(extra),
            None => return ScopedFilter::Unsatisfiable,
        }
        narrowed = true;
    }

    if let Some(field) = fields.retail
        && !retail_ids.is_empty()
    {
        let constraint = extract_constraint(&base.clauses, field);
        match narrow_field(field, retail_ids, &constraint, fields.allow_null_retail) {
            Some(extra) => clauses.extend(extra),
            None => return ScopedFilter::Unsatisfiable,
        }
        narrowed = true;
    }

    if !narrowed {
        // The scope carries no narrowing information for this entity; a
        // Scoped descriptor must never degrade to "no restriction".
        return ScopedFilter::Unsatisfiable;
    }

    ScopedFilter::Satisfiable(BaseFilter { clauses })
}

#[cfg(test)]
mod tests {
    use super::*;

    const JBP_FIELDS: ScopeFields = ScopeFields {
        tenant: Some("tenant_id"),
        supplier: Some("supplier_id"),
        retail: Some("retail_id"),
        allow_null_retail: false,
    };

    const CAMPAIGN_FIELDS: ScopeFields = ScopeFields {
        tenant: Some("tenant_id"),
        supplier: Some("supplier_id"),
        retail: Some("retail_id"),
        allow_null_retail: true,
    };

    fn scoped(tenant: Uuid, suppliers: &[Uuid], retails: &[Uuid]) -> AccessScope {
        AccessScope::scoped(tenant, suppliers.iter().copied(), retails.iter().copied())
    }

    #[test]
    fn test_deny_all_always_unsatisfiable() {
        let base = ScopedFilter::from(BaseFilter::new().eq("status", "active"));
        let out = apply_scope(&base, &AccessScope::DenyAll, &JBP_FIELDS);
        assert!(out.is_unsatisfiable());

        // Even an empty base must not survive deny-all.
        let empty = ScopedFilter::from(BaseFilter::new());
        assert!(apply_scope(&empty, &AccessScope::DenyAll, &JBP_FIELDS).is_unsatisfiable());
    }

    #[test]
    fn test_unrestricted_returns_base_unchanged() {
        let base = ScopedFilter::from(BaseFilter::new().eq("status", "active"));
        let out = apply_scope(&base, &AccessScope::Unrestricted, &JBP_FIELDS);
        assert_eq!(out, base);
    }

    #[test]
    fn test_scoped_pins_tenant_and_constrains_parties() {
        let tenant = Uuid::new_v4();
        let s1 = Uuid::new_v4();
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let scope = scoped(tenant, &[s1], &[r1, r2]);

        let base = ScopedFilter::from(BaseFilter::new().eq("status", "draft"));
        let out = apply_scope(&base, &scope, &JBP_FIELDS);

        let ScopedFilter::Satisfiable(filter) = out else {
            panic!("expected satisfiable filter");
        };
        assert!(filter
            .clauses
            .contains(&Clause::Eq("tenant_id".into(), FieldValue::Id(tenant))));
        assert!(filter
            .clauses
            .contains(&Clause::Eq("supplier_id".into(), FieldValue::Id(s1))));
        assert!(filter.clauses.iter().any(|c| matches!(
            c,
            Clause::In(f, v) if f == "retail_id" && v.len() == 2
        )));
        assert!(filter
            .clauses
            .contains(&Clause::Eq("status".into(), FieldValue::Text("draft".into()))));
    }

    #[test]
    fn test_pinned_tenant_mismatch_is_unsatisfiable() {
        let scope = scoped(Uuid::new_v4(), &[], &[]);
        let base = ScopedFilter::from(BaseFilter::new().eq("tenant_id", Uuid::new_v4()));
        assert!(apply_scope(&base, &scope, &JBP_FIELDS).is_unsatisfiable());
    }

    #[test]
    fn test_pinned_supplier_outside_scope_is_unsatisfiable() {
        let tenant = Uuid::new_v4();
        let scope = scoped(tenant, &[Uuid::new_v4()], &[]);
        let base = ScopedFilter::from(BaseFilter::new().eq("supplier_id", Uuid::new_v4()));
        assert!(apply_scope(&base, &scope, &JBP_FIELDS).is_unsatisfiable());
    }

    #[test]
    fn test_pinned_supplier_inside_scope_kept() {
        let tenant = Uuid::new_v4();
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let scope = scoped(tenant, &[s1, s2], &[]);
        let base = ScopedFilter::from(BaseFilter::new().eq("supplier_id", s2));
        let out = apply_scope(&base, &scope, &JBP_FIELDS);

        let ScopedFilter::Satisfiable(filter) = out else {
            panic!("expected satisfiable filter");
        };
        assert!(filter
            .clauses
            .contains(&Clause::Eq("supplier_id".into(), FieldValue::Id(s2))));
    }

    #[test]
    fn test_null_retail_relaxation() {
        let tenant = Uuid::new_v4();
        let r1 = Uuid::new_v4();
        let scope = scoped(tenant, &[], &[r1]);
        let base = ScopedFilter::from(BaseFilter::new());
        let out = apply_scope(&base, &scope, &CAMPAIGN_FIELDS);

        let ScopedFilter::Satisfiable(filter) = out else {
            panic!("expected satisfiable filter");
        };
        assert!(filter.clauses.iter().any(|c| matches!(
            c,
            Clause::InOrNull(f, v) if f == "retail_id" && v == &vec![FieldValue::Id(r1)]
        )));
    }

    #[test]
    fn test_null_pin_without_relaxation_is_unsatisfiable() {
        let tenant = Uuid::new_v4();
        let scope = scoped(tenant, &[], &[Uuid::new_v4()]);
        let base = ScopedFilter::from(BaseFilter::new().is_null("retail_id"));
        assert!(apply_scope(&base, &scope, &JBP_FIELDS).is_unsatisfiable());
    }

    #[test]
    fn test_null_pin_with_relaxation_kept() {
        let tenant = Uuid::new_v4();
        let scope = scoped(tenant, &[], &[Uuid::new_v4()]);
        let base = ScopedFilter::from(BaseFilter::new().is_null("retail_id"));
        let out = apply_scope(&base, &scope, &CAMPAIGN_FIELDS);

        let ScopedFilter::Satisfiable(filter) = out else {
            panic!("expected satisfiable filter");
        };
        assert!(filter.clauses.contains(&Clause::IsNull("retail_id".into())));
    }

    #[test]
    fn test_scope_with_no_narrowing_information_is_unsatisfiable() {
        // Entity keyed by supplier/retail only, scope with empty party sets.
        let fields = ScopeFields {
            tenant: None,
            supplier: Some("supplier_id"),
            retail: Some("retail_id"),
            allow_null_retail: false,
        };
        let scope = scoped(Uuid::new_v4(), &[], &[]);
        let base = ScopedFilter::from(BaseFilter::new().eq("status", "active"));
        assert!(apply_scope(&base, &scope, &fields).is_unsatisfiable());
    }

    #[test]
    fn test_tenant_only_entity_with_tenant_only_scope() {
        let fields = ScopeFields {
            tenant: Some("tenant_id"),
            supplier: None,
            retail: None,
            allow_null_retail: false,
        };
        let tenant = Uuid::new_v4();
        let scope = scoped(tenant, &[], &[]);
        let base = ScopedFilter::from(BaseFilter::new());
        let out = apply_scope(&base, &scope, &fields);

        let ScopedFilter::Satisfiable(filter) = out else {
            panic!("expected satisfiable filter");
        };
        assert_eq!(
            filter.clauses,
            vec![Clause::Eq("tenant_id".into(), FieldValue::Id(tenant))]
        );
    }

    #[test]
    fn test_empty_scope_set_keeps_base_party_clause() {
        // A tenant-wide-but-empty supplier set leaves the supplier field to
        // the base filter; the caller's own pin must survive.
        let tenant = Uuid::new_v4();
        let supplier = Uuid::new_v4();
        let scope = scoped(tenant, &[], &[]);
        let base = ScopedFilter::from(BaseFilter::new().eq("supplier_id", supplier));
        let out = apply_scope(&base, &scope, &JBP_FIELDS);

        let ScopedFilter::Satisfiable(filter) = out else {
            panic!("expected satisfiable filter");
        };
        assert!(filter
            .clauses
            .contains(&Clause::Eq("supplier_id".into(), FieldValue::Id(supplier))));
        assert!(filter
            .clauses
            .contains(&Clause::Eq("tenant_id".into(), FieldValue::Id(tenant))));
    }

    #[test]
    fn test_idempotent_on_typical_scope() {
        let tenant = Uuid::new_v4();
        let scope = scoped(tenant, &[Uuid::new_v4()], &[Uuid::new_v4(), Uuid::new_v4()]);
        let base = ScopedFilter::from(BaseFilter::new().eq("status", "negotiation"));

        let once = apply_scope(&base, &scope, &CAMPAIGN_FIELDS);
        let twice = apply_scope(&once, &scope, &CAMPAIGN_FIELDS);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unsatisfiable_input_stays_unsatisfiable() {
        let scope = scoped(Uuid::new_v4(), &[Uuid::new_v4()], &[]);
        let out = apply_scope(&ScopedFilter::Unsatisfiable, &scope, &JBP_FIELDS);
        assert!(out.is_unsatisfiable());
    }
}
