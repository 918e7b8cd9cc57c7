//! Mirror writer port.
//!
//! The mirror is a derived, fully-overwritten flat export of the supplier table.

use crate::domain::Supplier;

/// Error type for mirror exports.
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("Mirror I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mirror encoding error: {0}")]
    Encode(String),

    #[error("Could not read suppliers for the mirror: {0}")]
    Snapshot(String),
}

/// Port trait for the mirror file.
#[async_trait::async_trait]
pub trait MirrorWriter: Send + Sync {
    /// Replaces the whole mirror with `suppliers`, in the given order.
    ///
    /// Implementations must never leave a partially written mirror behind.
    async fn write_snapshot(&self, suppliers: &[Supplier]) -> Result<(), MirrorError>;
}
