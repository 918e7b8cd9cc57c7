//! Shared database types for SQLite and PostgreSQL.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use suppliers_types::{RepoError, Supplier, SupplierId};

/// Supplier row from database.
#[derive(FromRow)]
pub struct DbSupplier {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub email: String,
    pub debt_local: f64,
    pub debt_foreign: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl DbSupplier {
    pub fn into_domain(self) -> Supplier {
        Supplier::from_parts(
            SupplierId::new(self.id),
            self.name,
            self.code,
            self.email,
            self.debt_local,
            self.debt_foreign,
            self.updated_at,
        )
    }
}

/// Maps a failed write, turning a unique-constraint violation into a conflict
/// on `code`.
pub fn write_error(err: sqlx::Error, code: &str) -> RepoError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return RepoError::Conflict(format!("Supplier code {} already exists", code));
        }
    }
    RepoError::Database(err.to_string())
}

pub fn read_error(err: sqlx::Error) -> RepoError {
    RepoError::Database(err.to_string())
}

pub fn tx_error(err: sqlx::Error) -> RepoError {
    RepoError::Transaction(err.to_string())
}

/// Builds a `%needle%` LIKE pattern in which `%`, `_` and `\` match literally.
/// Queries using it must declare `ESCAPE '\'`.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
