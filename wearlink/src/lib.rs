//! # wearlink
//!
//! Track Bluetooth wearables and their last-known telemetry.
//!
//! ## Features
//!
//! - Typed device records (heart rate, steps, distance, calories, battery, firmware)
//! - Thread-safe shared records with revision tracking
//! - A registry that owns records and re-validates peripheral handles
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use wearlink::{DeviceRegistry, PeripheralAddress, StaticLink, TelemetryUpdate};
//!
//! #[tokio::main]
//! async fn main() -> wearlink::Result<()> {
//!     let registry = DeviceRegistry::new();
//!
//!     // Track a peripheral
//!     let address: PeripheralAddress = "C0:FF:EE:00:00:01".parse()?;
//!     let record = registry.register(Arc::new(StaticLink::new(address)))?;
//!
//!     // Feed telemetry
//!     registry.apply(&address, TelemetryUpdate::HeartRate(72))?;
//!     println!("{}", record.snapshot());
//!
//!     // Drop peripherals that went away
//!     registry.revalidate().await;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod registry;

// Re-exports
pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use registry::{DeviceRegistry, TrackedRecord};

// Re-export core and types
pub use wearlink_core::{LinkHandle, PeripheralLink, SharedRecord, StaticLink};
pub use wearlink_types::{DeviceRecord, Peripheral, PeripheralAddress, TelemetryUpdate};
