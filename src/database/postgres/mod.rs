//! Postgres-backed repositories.

mod complaints;
mod dashboard;
mod records;
mod settings;
mod users;

use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{Database, DatabaseError};
use super::repository::StorageHealth;

pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

#[async_trait]
impl StorageHealth for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.db.health_check().await
    }
}

/// Maps a failed INSERT/UPDATE on `table` to the storage taxonomy. Unique
/// violations name the column from the `<table>_<column>_key` constraint.
fn write_error(entity: &'static str, table: &'static str) -> impl FnOnce(sqlx::Error) -> DatabaseError {
    move |err| {
        let sqlx::Error::Database(db_err) = &err else {
            return DatabaseError::Sqlx(err);
        };

        if db_err.is_unique_violation() {
            let field = db_err
                .constraint()
                .and_then(|name| conflict_field(name, table))
                .unwrap_or("value");
            return DatabaseError::conflict(entity, field);
        }

        let code = db_err.code().map(|code| code.into_owned());
        match code.as_deref() {
            // string_data_right_truncation, numeric_value_out_of_range, check_violation
            Some("22001") | Some("22003") | Some("23514") => DatabaseError::Constraint(db_err.message().to_string()),
            _ => DatabaseError::Sqlx(err),
        }
    }
}

fn conflict_field<'a>(constraint: &'a str, table: &str) -> Option<&'a str> {
    constraint
        .strip_prefix(table)?
        .strip_prefix('_')?
        .strip_suffix("_key")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_field_reads_default_constraint_names() {
        assert_eq!(conflict_field("users_email_key", "users"), Some("email"));
        assert_eq!(conflict_field("housing_units_unit_number_key", "housing_units"), Some("unit_number"));
        assert_eq!(conflict_field("users_pkey", "users"), None);
        assert_eq!(conflict_field("other_email_key", "users"), None);
    }

    #[test]
    fn non_database_errors_stay_opaque() {
        let mapped = write_error("user", "users")(sqlx::Error::RowNotFound);
        assert!(matches!(mapped, DatabaseError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
