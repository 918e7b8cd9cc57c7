//! # Suppliers Hex
//!
//! Application service layer and adapters for the supplier ledger.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - Exchange-rate adapters (HTTP source, fixed rate)
//!
//! The service is generic over `R: SupplierRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod service;


pub use service::{MirrorStatus, Mutation, SupplierService};
