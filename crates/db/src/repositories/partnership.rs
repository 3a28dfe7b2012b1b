//! Partnership repository.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Condition;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{partnerships, sea_orm_active_enums::PartnershipStatus};

/// Partnership repository for lookups and listings.
#[derive(Debug, Clone)]
pub struct PartnershipRepository {
    db: DatabaseConnection,
}

impl PartnershipRepository {
    /// Creates a new partnership repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Condition matching partnerships active at the given instant.
    ///
    /// Activity is evaluated lazily at query time: status is `active` and
    /// the instant falls inside the validity window, with an absent bound
    /// treated as always satisfied. No background job ever expires rows.
    #[must_use]
    pub fn active_at(at: DateTime<Utc>) -> Condition {
        Condition::all()
            .add(partnerships::Column::Status.eq(PartnershipStatus::Active))
            .add(
                Condition::any()
                    .add(partnerships::Column::ValidFrom.is_null())
                    .add(partnerships::Column::ValidFrom.lte(at)),
            )
            .add(
                Condition::any()
                    .add(partnerships::Column::ValidTo.is_null())
                    .add(partnerships::Column::ValidTo.gte(at)),
            )
    }

    /// Lists partnerships of a tenant, optionally only those active now.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        tenant_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<partnerships::Model>, DbErr> {
        let mut query = partnerships::Entity::find()
            .filter(partnerships::Column::TenantId.eq(tenant_id))
            .order_by_asc(partnerships::Column::CreatedAt);

        if active_only {
            query = query.filter(Self::active_at(Utc::now()));
        }

        query.all(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_active_condition_checks_status_and_window() {
        let sql = partnerships::Entity::find()
            .filter(PartnershipRepository::active_at(Utc::now()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("'active'"));
        assert!(sql.contains(r#""valid_from" IS NULL"#));
        assert!(sql.contains(r#""valid_to" IS NULL"#));
    }
}
