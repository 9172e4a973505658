//! # wearlink-core
//!
//! Building blocks shared by everything that tracks wearable peripherals:
//! - [`PeripheralLink`], the async collaborator standing behind a handle
//! - [`SharedRecord`], a thread-safe device record with a revision counter
//! - core error types

pub mod error;
pub mod link;
pub mod shared;

pub use error::{Error, Result};
pub use link::{LinkHandle, PeripheralLink, StaticLink};
pub use shared::SharedRecord;

pub use wearlink_types::{DeviceRecord, Peripheral, PeripheralAddress, TelemetryUpdate};
