//! Peripheral links
//!
//! The handle stored in a record belongs to the platform Bluetooth stack.
//! wearlink never assumes it stays valid between calls; instead it asks the
//! link again through [`PeripheralLink::is_reachable`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use wearlink_types::{Peripheral, PeripheralAddress};

use crate::error::Result;

/// External collaborator standing behind a peripheral handle
#[async_trait]
pub trait PeripheralLink: Peripheral + fmt::Debug + Send + Sync {
    /// Re-validate the handle against the platform stack
    ///
    /// `Ok(false)` means the peripheral is known to be gone. An error means
    /// the stack could not tell.
    async fn is_reachable(&self) -> Result<bool>;

    /// Advertised name, if the platform knows one
    fn name(&self) -> Option<String> {
        None
    }
}

/// Shared, type-erased link as stored in registries
pub type LinkHandle = Arc<dyn PeripheralLink>;

/// Link whose reachability is set by the owner
///
/// Useful when reachability is tracked elsewhere (e.g. from disconnect
/// callbacks) and for tests.
#[derive(Debug)]
pub struct StaticLink {
    address: PeripheralAddress,
    name: Option<String>,
    reachable: AtomicBool,
}

impl StaticLink {
    pub fn new(address: PeripheralAddress) -> Self {
        Self {
            address,
            name: None,
            reachable: AtomicBool::new(true),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::Release);
    }
}

impl Peripheral for StaticLink {
    fn address(&self) -> PeripheralAddress {
        self.address
    }
}

#[async_trait]
impl PeripheralLink for StaticLink {
    async fn is_reachable(&self) -> Result<bool> {
        Ok(self.reachable.load(Ordering::Acquire))
    }

    fn name(&self) -> Option<String> {
        self.name.clone()
    }
}
