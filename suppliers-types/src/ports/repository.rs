//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use crate::domain::{
    NewSupplier, PageRequest, Supplier, SupplierChanges, SupplierFilter, SupplierId,
};
use crate::error::RepoError;

/// The repository port for supplier records.
///
/// Every mutating operation MUST be atomic: on error nothing is written.
/// Every multi-row read returns rows in id (insertion) order.
#[async_trait::async_trait]
pub trait SupplierRepository: Send + Sync + 'static {
    /// Inserts a supplier. A duplicate code is a `RepoError::Conflict`.
    async fn create_supplier(&self, new: NewSupplier) -> Result<Supplier, RepoError>;

    /// Gets a supplier by ID.
    async fn get_supplier(&self, id: SupplierId) -> Result<Option<Supplier>, RepoError>;

    /// Counts all suppliers.
    async fn count_suppliers(&self) -> Result<i64, RepoError>;

    /// Lists one page of suppliers.
    async fn list_suppliers(&self, page: PageRequest) -> Result<Vec<Supplier>, RepoError>;

    /// Lists every supplier.
    async fn list_all_suppliers(&self) -> Result<Vec<Supplier>, RepoError>;

    /// Case-insensitive substring search on name and/or code.
    async fn search_suppliers(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>, RepoError>;

    /// Applies changes to an existing supplier and returns the stored result.
    ///
    /// Fails with `RepoError::NotFound` for an unknown id and
    /// `RepoError::Conflict` when the new code is taken.
    async fn update_supplier(
        &self,
        id: SupplierId,
        changes: SupplierChanges,
    ) -> Result<Supplier, RepoError>;

    /// Deletes a supplier. Returns `false` when no row had that id.
    async fn delete_supplier(&self, id: SupplierId) -> Result<bool, RepoError>;
}
