//! # Suppliers Types
//!
//! Domain types and port traits for the supplier ledger service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Supplier, DebtSnapshot, PageRequest)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DebtSnapshot, NewSupplier, PageRequest, Supplier, SupplierChanges, SupplierDraft,
    SupplierFilter, SupplierId, SupplierPatch,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use exchange_rates::SellRate;
pub use ports::{
    ExchangeError, ExchangeRateProvider, MirrorError, MirrorWriter, SupplierRepository,
};
