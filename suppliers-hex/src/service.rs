//! Supplier Application Service
//!
//! Orchestrates domain operations through the repository, exchange-rate and
//! mirror ports. Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use tokio::sync::Mutex;

use suppliers_types::{
    AppError, CreateSupplierRequest, DebtSnapshot, ExchangeRateProvider, ListParams, MirrorError,
    MirrorWriter, PageRequest, SearchParams, SellRate, Supplier, SupplierChanges, SupplierId,
    SupplierPage, SupplierRepository, UpdateSupplierRequest, domain::page::DEFAULT_MAX_PER_PAGE,
};

/// Outcome of the mirror export that follows a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorStatus {
    Synced,
    Failed,
}

impl MirrorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorStatus::Synced => "synced",
            MirrorStatus::Failed => "failed",
        }
    }
}

/// Result of a committed write, together with the mirror outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub mirror: MirrorStatus,
}

/// Application service for supplier operations.
///
/// Generic over `R: SupplierRepository` - the adapter is injected at compile time.
/// The rate source and the mirror are trait objects, picked at startup.
pub struct SupplierService<R: SupplierRepository> {
    repo: R,
    rates: Arc<dyn ExchangeRateProvider>,
    mirror: Arc<dyn MirrorWriter>,
    /// Held across "read all rows -> write file" so exports never interleave.
    export_lock: Mutex<()>,
    max_per_page: u32,
}

impl<R: SupplierRepository> SupplierService<R> {
    /// Creates a new supplier service.
    pub fn new(
        repo: R,
        rates: Arc<dyn ExchangeRateProvider>,
        mirror: Arc<dyn MirrorWriter>,
    ) -> Self {
        Self {
            repo,
            rates,
            mirror,
            export_lock: Mutex::new(()),
            max_per_page: DEFAULT_MAX_PER_PAGE,
        }
    }

    /// Overrides the largest page size a list request may ask for.
    pub fn with_max_per_page(mut self, max_per_page: u32) -> Self {
        self.max_per_page = max_per_page.max(1);
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a supplier by ID.
    pub async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, AppError> {
        self.repo
            .get_supplier(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Supplier {}", id))))
    }

    /// Lists one page of suppliers, ordered by id.
    pub async fn list_suppliers(&self, params: ListParams) -> Result<SupplierPage, AppError> {
        let page = PageRequest::new(params.page, params.per_page, self.max_per_page);

        let total = self.repo.count_suppliers().await?;
        let items = self.repo.list_suppliers(page).await?;

        Ok(SupplierPage {
            items,
            total,
            pages: page.total_pages(total),
            current_page: page.page(),
        })
    }

    /// Finds suppliers whose name and/or code contain the given text.
    pub async fn search_suppliers(&self, params: SearchParams) -> Result<Vec<Supplier>, AppError> {
        let filter = params.into_filter();
        if filter.is_empty() {
            return self.repo.list_all_suppliers().await.map_err(Into::into);
        }
        self.repo.search_suppliers(&filter).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a supplier, converting its debt at the current official rate.
    #[tracing::instrument(skip(self, req), fields(code = ?req.code))]
    pub async fn create_supplier(
        &self,
        req: CreateSupplierRequest,
    ) -> Result<Mutation<Supplier>, AppError> {
        let draft = req.validate()?;
        let rate = self.sell_rate().await?;

        let supplier = self.repo.create_supplier(draft.priced(rate)?).await?;
        tracing::info!(id = %supplier.id, code = %supplier.code, "Supplier created");

        let mirror = self.sync_mirror().await;
        Ok(Mutation {
            value: supplier,
            mirror,
        })
    }

    /// Applies a partial update. A new local debt is converted at the current
    /// official rate; other fields leave the conversion untouched.
    #[tracing::instrument(skip(self, req), fields(id = %id))]
    pub async fn update_supplier(
        &self,
        id: SupplierId,
        req: UpdateSupplierRequest,
    ) -> Result<Mutation<Supplier>, AppError> {
        self.get_supplier(id).await?;

        let patch = req.validate()?;
        let debt = match patch.debt_local {
            Some(local) => {
                let rate = self.sell_rate().await?;
                Some(DebtSnapshot::convert(local, rate)?)
            }
            None => None,
        };

        let changes = SupplierChanges {
            name: patch.name,
            code: patch.code,
            email: patch.email,
            debt,
        };
        let supplier = self.repo.update_supplier(id, changes).await?;
        tracing::info!(id = %supplier.id, "Supplier updated");

        let mirror = self.sync_mirror().await;
        Ok(Mutation {
            value: supplier,
            mirror,
        })
    }

    /// Deletes a supplier.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn delete_supplier(&self, id: SupplierId) -> Result<Mutation<()>, AppError> {
        if !self.repo.delete_supplier(id).await? {
            return Err(AppError::NotFound(format!("Supplier {}", id)));
        }
        tracing::info!(id = %id, "Supplier deleted");

        let mirror = self.sync_mirror().await;
        Ok(Mutation { value: (), mirror })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mirror
    // ─────────────────────────────────────────────────────────────────────────────

    /// Rewrites the mirror from the current contents of the store.
    pub async fn export_mirror(&self) -> Result<usize, MirrorError> {
        let _guard = self.export_lock.lock().await;

        let suppliers = self
            .repo
            .list_all_suppliers()
            .await
            .map_err(|e| MirrorError::Snapshot(e.to_string()))?;
        self.mirror.write_snapshot(&suppliers).await?;

        Ok(suppliers.len())
    }

    /// Exports after a committed write. A failure is logged, never propagated.
    async fn sync_mirror(&self) -> MirrorStatus {
        match self.export_mirror().await {
            Ok(_) => MirrorStatus::Synced,
            Err(e) => {
                tracing::error!(error = %e, "Mirror export failed");
                MirrorStatus::Failed
            }
        }
    }

    async fn sell_rate(&self) -> Result<SellRate, AppError> {
        self.rates.official_sell_rate().await.map_err(|e| {
            tracing::warn!(error = %e, "Exchange rate lookup failed");
            AppError::from(e)
        })
    }
}
