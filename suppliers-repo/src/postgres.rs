//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use suppliers_types::{
    NewSupplier, PageRequest, RepoError, Supplier, SupplierChanges, SupplierFilter, SupplierId,
    SupplierRepository,
};

use crate::types::{DbSupplier, like_pattern, read_error, tx_error, write_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository with row-level locking.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_suppliers_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl SupplierRepository for PostgresRepo {
    async fn create_supplier(&self, new: NewSupplier) -> Result<Supplier, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        let row: DbSupplier = sqlx::query_as(
            r#"INSERT INTO suppliers (name, code, email, debt_local, debt_foreign, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, name, code, email, debt_local, debt_foreign, updated_at"#,
        )
        .bind(&new.name)
        .bind(&new.code)
        .bind(&new.email)
        .bind(new.debt.local)
        .bind(new.debt.foreign)
        .bind(new.debt.recorded_at)
        .fetch_one(&mut *db_tx)
        .await
        .map_err(|e| write_error(e, &new.code))?;

        db_tx.commit().await.map_err(tx_error)?;

        Ok(row.into_domain())
    }

    async fn get_supplier(&self, id: SupplierId) -> Result<Option<Supplier>, RepoError> {
        let row: Option<DbSupplier> = sqlx::query_as(
            r#"SELECT id, name, code, email, debt_local, debt_foreign, updated_at
               FROM suppliers WHERE id = $1"#,
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
               FROM suppliers ORDER BY id LIMIT $1 OFFSET $2"#,
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
               WHERE ($1::TEXT IS NULL OR name ILIKE $1 ESCAPE '\')
                 AND ($2::TEXT IS NULL OR code ILIKE $2 ESCAPE '\')
               ORDER BY id"#,
        )
        .bind(&name)
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

        // Lock the row for the read-modify-write
        let row: Option<DbSupplier> = sqlx::query_as(
            r#"SELECT id, name, code, email, debt_local, debt_foreign, updated_at
               FROM suppliers WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id.get())
        .fetch_optional(&mut *db_tx)
        .await
        .map_err(read_error)?;

        let mut supplier = row.ok_or(RepoError::NotFound)?.into_domain();
        supplier.apply(changes);

        sqlx::query(
            r#"UPDATE suppliers
               SET name = $1, code = $2, email = $3, debt_local = $4, debt_foreign = $5, updated_at = $6
               WHERE id = $7"#,
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

        let result = sqlx::query(r#"DELETE FROM suppliers WHERE id = $1"#)
            .bind(id.get())
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        db_tx.commit().await.map_err(tx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
