//! Domain models for the supplier ledger.

pub mod page;
pub mod supplier;

pub use page::PageRequest;
pub use supplier::{
    DebtSnapshot, NewSupplier, Supplier, SupplierChanges, SupplierDraft, SupplierFilter,
    SupplierId, SupplierPatch,
};
