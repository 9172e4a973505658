//! High-level error types

use wearlink_types::PeripheralAddress;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core error: {0}")]
    Core(#[from] wearlink_core::Error),
    
    #[error("Type error: {0}")]
    Types(#[from] wearlink_types::Error),
    
    #[error("Peripheral {0} is not registered")]
    NotRegistered(PeripheralAddress),
    
    #[error("Peripheral {0} is already registered")]
    AlreadyRegistered(PeripheralAddress),
    
    #[error("Registry is full ({max} devices)")]
    CapacityReached { max: usize },
}
