//! Property tests for the filter composer.

use proptest::prelude::*;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::scope::filter::{BaseFilter, Clause, FieldValue, ScopeFields, ScopedFilter, apply_scope};
use crate::scope::types::AccessScope;

const FIELDS: ScopeFields = ScopeFields {
    tenant: Some("tenant_id"),
    supplier: Some("supplier_id"),
    retail: Some("retail_id"),
    allow_null_retail: true,
};

// Boxed so the strategy stays cloneable when nested in collections.
fn arb_uuid() -> BoxedStrategy<Uuid> {
    any::<u128>().prop_map(Uuid::from_u128).boxed()
}

fn arb_id_set(max: usize) -> impl Strategy<Value = BTreeSet<Uuid>> {
    prop::collection::btree_set(arb_uuid(), 0..=max)
}

fn arb_scope() -> impl Strategy<Value = AccessScope> {
    prop_oneof![
        Just(AccessScope::Unrestricted),
        Just(AccessScope::DenyAll),
        (arb_uuid(), arb_id_set(4), arb_id_set(4)).prop_map(
            |(tenant_id, supplier_ids, retail_ids)| AccessScope::Scoped {
                tenant_id,
                supplier_ids,
                retail_ids,
            }
        ),
    ]
}

fn arb_clause() -> impl Strategy<Value = Clause> {
    let field = prop_oneof![
        Just("tenant_id".to_string()),
        Just("supplier_id".to_string()),
        Just("retail_id".to_string()),
        Just("status".to_string()),
    ];
    let ids = prop::collection::vec(arb_uuid().prop_map(FieldValue::Id), 0..4);
    prop_oneof![
        (field.clone(), arb_uuid()).prop_map(|(f, id)| Clause::Eq(f, FieldValue::Id(id))),
        (field.clone(), ids.clone()).prop_map(|(f, v)| Clause::In(f, v)),
        (field.clone(), ids).prop_map(|(f, v)| Clause::InOrNull(f, v)),
        field.prop_map(Clause::IsNull),
    ]
}

fn arb_base() -> impl Strategy<Value = BaseFilter> {
    prop::collection::vec(arb_clause(), 0..5).prop_map(|clauses| BaseFilter { clauses })
}

proptest! {
    /// Re-applying the same scope to a composed filter changes nothing.
    #[test]
    fn composition_is_idempotent(base in arb_base(), scope in arb_scope()) {
        let once = apply_scope(&ScopedFilter::Satisfiable(base), &scope, &FIELDS);
        let twice = apply_scope(&once, &scope, &FIELDS);
        prop_assert_eq!(once, twice);
    }

    /// A deny-all scope never lets any base filter through.
    #[test]
    fn deny_all_is_absorbing(base in arb_base()) {
        let out = apply_scope(
            &ScopedFilter::Satisfiable(base),
            &AccessScope::DenyAll,
            &FIELDS,
        );
        prop_assert!(out.is_unsatisfiable());
    }

    /// An unrestricted scope never alters the base filter.
    #[test]
    fn unrestricted_is_identity(base in arb_base()) {
        let input = ScopedFilter::Satisfiable(base);
        let out = apply_scope(&input, &AccessScope::Unrestricted, &FIELDS);
        prop_assert_eq!(out, input);
    }

    /// Every satisfiable output of a scoped composition pins the tenant.
    #[test]
    fn scoped_output_always_pins_tenant(
        base in arb_base(),
        tenant in arb_uuid(),
        suppliers in arb_id_set(4),
        retails in arb_id_set(4),
    ) {
        let scope = AccessScope::Scoped {
            tenant_id: tenant,
            supplier_ids: suppliers,
            retail_ids: retails,
        };
        let out = apply_scope(&ScopedFilter::Satisfiable(base), &scope, &FIELDS);
        if let ScopedFilter::Satisfiable(filter) = out {
            prop_assert!(filter
                .clauses
                .contains(&Clause::Eq("tenant_id".to_string(), FieldValue::Id(tenant))));
        }
    }
}
