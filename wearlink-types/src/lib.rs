//! Type definitions for wearlink

pub mod address;
pub mod error;
pub mod record;
pub mod update;

pub use address::{Peripheral, PeripheralAddress};
pub use error::{Error, Result};
pub use record::DeviceRecord;
pub use update::TelemetryUpdate;
