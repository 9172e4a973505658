//! Error types for wearlink-core

use wearlink_types::PeripheralAddress;

/// Result type alias for wearlink-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform stack failed to answer for a peripheral
    #[error("Peripheral link failed: {0}")]
    LinkFailed(String),

    /// Reachability probe did not finish in time
    #[error("Probe of {address} timed out after {millis}ms")]
    ProbeTimeout {
        address: PeripheralAddress,
        millis: u64,
    },
}
