//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use suppliers_types::{
    NewSupplier, PageRequest, RepoError, Supplier, SupplierChanges, SupplierFilter, SupplierId,
    SupplierRepository,
};

use crate::types::{DbSupplier, like_pattern, read_error, tx_error, write_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// `LIKE` in SQLite only folds ASCII case, so search is case-insensitive for
/// ASCII letters.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives only as long as its connection.
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_suppliers.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl SupplierRepository for SqliteRepo {
    async fn create_supplier(&self, new: NewSupplier) -> Result<Supplier, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        let result = sqlx::query(
            r#"INSERT INTO suppliers (name, code, email, debt_local, debt_foreign, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&new.name)
        .bind(&new.code)
        .bind(&new.email)
        .bind(new.debt.local)
        .bind(new.debt.foreign)
        .bind(new.debt.recorded_at)
        .execute(&mut *db_tx)
        .await
        .map_err(|e| write_error(e, &new.code))?;

        db_tx.commit().await.map_err(tx_error)?;

        Ok(Supplier::from_parts(
            SupplierId::new(result.last_insert_rowid()),
            new.name,
            new.code,
            new.email,
            new.debt.local,
            Some(new.debt.foreign),
            new.debt.recorded_at,
        ))
    }

    async fn get_supplier(&self, id: SupplierId) -> Result<Option<Supplier>, RepoError> {
        let row: Option<DbSupplier> = sqlx::query_as(
            r#"SELECT id, name, code, email, debt_local, debt_foreign, updated_at
               FROM suppliers WHERE id = ?"#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(row.map(DbSupplier::into_domain))
    }

    async fn count_suppliers(&self) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM suppliers"#)
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)
    }

    async fn list_suppliers(&self, page: PageRequest) -> Result<Vec<Supplier>, RepoError> {
        let rows: Vec<DbSupplier> = sqlx::query_as(
            r#"SELECT id, name, code, email, debt_local, debt_foreign, updated_at
               FROM suppliers ORDER BY id LIMIT ? OFFSET ?"#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(rows.into_iter().map(DbSupplier::into_domain).collect())
    }

    async fn list_all_suppliers(&self) -> Result<Vec<Supplier>, RepoError> {
        let rows: Vec<DbSupplier> = sqlx::query_as(
            r#"SELECT id, name, code, email, debt_local, debt_foreign, updated_at
               FROM suppliers ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(rows.into_iter().map(DbSupplier::into_domain).collect())
    }

    async fn search_suppliers(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>, RepoError> {
        let name = filter.name.as_deref().map(like_pattern);
        let code = filter.code.as_deref().map(like_pattern);

        let rows: Vec<DbSupplier> = sqlx::query_as(
            r#"SELECT id, name, code, email, debt_local, debt_foreign, updated_at
               FROM suppliers
               WHERE (? IS NULL OR name LIKE ? ESCAPE '\')
                 AND (? IS NULL OR code LIKE ? ESCAPE '\')
               ORDER BY id"#,
        )
        .bind(&name)
        .bind(&name)
        .bind(&code)
        .bind(&code)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(rows.into_iter().map(DbSupplier::into_domain).collect())
    }

    async fn update_supplier(
        &self,
        id: SupplierId,
        changes: SupplierChanges,
    ) -> Result<Supplier, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        let row: Option<DbSupplier> = sqlx::query_as(
            r#"SELECT id, name, code, email, debt_local, debt_foreign, updated_at
               FROM suppliers WHERE id = ?"#,
        )
        .bind(id.get())
        .fetch_optional(&mut *db_tx)
        .await
        .map_err(read_error)?;

        let mut supplier = row.ok_or(RepoError::NotFound)?.into_domain();
        supplier.apply(changes);

        sqlx::query(
            r#"UPDATE suppliers
               SET name = ?, code = ?, email = ?, debt_local = ?, debt_foreign = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&supplier.name)
        .bind(&supplier.code)
        .bind(&supplier.email)
        .bind(supplier.debt_local)
        .bind(supplier.debt_foreign)
        .bind(supplier.updated_at)
        .bind(id.get())
        .execute(&mut *db_tx)
        .await
        .map_err(|e| write_error(e, &supplier.code))?;

        db_tx.commit().await.map_err(tx_error)?;

        Ok(supplier)
    }

    async fn delete_supplier(&self, id: SupplierId) -> Result<bool, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        let result = sqlx::query(r#"DELETE FROM suppliers WHERE id = ?"#)
            .bind(id.get())
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        db_tx.commit().await.map_err(tx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
