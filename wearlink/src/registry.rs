//! Device registry
//!
//! The registry is the collection that owns device records. A record is
//! created when its peripheral is registered, updated in place as telemetry
//! arrives, and dropped once it is removed (or evicted after failing
//! revalidation) and the last [`SharedRecord`] clone goes away.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use wearlink_core::{LinkHandle, PeripheralLink, SharedRecord};
use wearlink_types::{Peripheral, PeripheralAddress, TelemetryUpdate};

use crate::config::RegistryConfig;
use crate::error::{Error, Result};

/// Record type stored by the registry
pub type TrackedRecord = SharedRecord<LinkHandle>;

/// Registry of tracked peripherals, keyed by address
///
/// All methods take `&self`; share the registry between tasks with an `Arc`.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use wearlink::{DeviceRegistry, PeripheralAddress, StaticLink, TelemetryUpdate};
///
/// #[tokio::main]
/// async fn main() -> wearlink::Result<()> {
///     let registry = DeviceRegistry::new();
///
///     let address: PeripheralAddress = "C0:FF:EE:00:00:01".parse()?;
///     registry.register(Arc::new(StaticLink::new(address)))?;
///
///     registry.apply(&address, TelemetryUpdate::HeartRate(72))?;
///
///     let gone = registry.revalidate().await;
///     println!("unreachable: {:?}", gone);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DeviceRegistry {
    config: RegistryConfig,
    records: RwLock<HashMap<PeripheralAddress, TrackedRecord>>,
}

impl DeviceRegistry {
    /// Create an empty registry with default settings
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Start tracking a peripheral
    ///
    /// The new record holds `link` as its handle with all telemetry zeroed.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - a peripheral with the same address is already registered
    /// - the registry already holds `max_devices` peripherals
    pub fn register(&self, link: LinkHandle) -> Result<TrackedRecord> {
        // Query the link before locking: it may call back into the registry
        let address = link.address();
        let name = link.name();

        let mut records = self.records.write();

        if records.contains_key(&address) {
            return Err(Error::AlreadyRegistered(address));
        }

        if records.len() >= self.config.max_devices {
            warn!(%address, max = self.config.max_devices, "Registry full, rejecting peripheral");
            return Err(Error::CapacityReached {
                max: self.config.max_devices,
            });
        }

        let record = SharedRecord::new(link);
        records.insert(address, record.clone());
        drop(records);

        info!(%address, name = name.as_deref().unwrap_or("-"), "Registered peripheral");

        Ok(record)
    }

    /// Stop tracking a peripheral
    pub fn remove(&self, address: &PeripheralAddress) -> Option<TrackedRecord> {
        let removed = self.records.write().remove(address);

        if removed.is_some() {
            info!(%address, "Removed peripheral");
        }

        removed
    }

    pub fn get(&self, address: &PeripheralAddress) -> Option<TrackedRecord> {
        self.records.read().get(address).cloned()
    }

    pub fn contains(&self, address: &PeripheralAddress) -> bool {
        self.records.read().contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Tracked addresses in ascending order
    pub fn addresses(&self) -> Vec<PeripheralAddress> {
        let mut addresses: Vec<_> = self.records.read().keys().copied().collect();
        addresses.sort();
        addresses
    }

    /// Tracked records ordered by address
    pub fn records(&self) -> Vec<TrackedRecord> {
        let records = self.records.read();
        let mut entries: Vec<_> = records.iter().collect();
        entries.sort_by_key(|(address, _)| **address);
        entries.into_iter().map(|(_, record)| record.clone()).collect()
    }

    /// Apply a telemetry update to a tracked peripheral
    ///
    /// Returns the record's new revision.
    pub fn apply(&self, address: &PeripheralAddress, update: TelemetryUpdate) -> Result<u64> {
        let record = self.get(address).ok_or(Error::NotRegistered(*address))?;
        let revision = record.apply(update);

        debug!(%address, revision, "Telemetry updated");

        Ok(revision)
    }

    /// Re-validate every tracked handle against its link
    ///
    /// Each probe is bounded by `probe_timeout`. A peripheral is unreachable
    /// when its probe returns `false`, fails or times out. Unreachable
    /// records are evicted when `evict_unreachable` is set.
    ///
    /// Returns the unreachable addresses in ascending order.
    pub async fn revalidate(&self) -> Vec<PeripheralAddress> {
        // Never hold the lock across a probe
        let tracked: Vec<(PeripheralAddress, TrackedRecord)> = self
            .records
            .read()
            .iter()
            .map(|(address, record)| (*address, record.clone()))
            .collect();

        let mut unreachable = Vec::new();

        for (address, record) in tracked {
            match self.probe(address, &record.device()).await {
                Ok(true) => debug!(%address, "Peripheral reachable"),
                Ok(false) => {
                    warn!(%address, "Peripheral no longer reachable");
                    unreachable.push((address, record));
                }
                Err(e) => {
                    warn!(%address, error = %e, "Peripheral probe failed");
                    unreachable.push((address, record));
                }
            }
        }

        if self.config.evict_unreachable && !unreachable.is_empty() {
            let mut records = self.records.write();

            for (address, probed) in &unreachable {
                // Skip records re-registered while probing
                let same = records.get(address).is_some_and(|current| current.ptr_eq(probed));
                if same {
                    records.remove(address);
                    info!(%address, "Evicted unreachable peripheral");
                }
            }
        }

        let mut addresses: Vec<_> = unreachable.into_iter().map(|(address, _)| address).collect();
        addresses.sort();
        addresses
    }

    async fn probe(&self, address: PeripheralAddress, link: &LinkHandle) -> wearlink_core::Result<bool> {
        match timeout(self.config.probe_timeout, link.is_reachable()).await {
            Ok(result) => result,
            Err(_) => Err(wearlink_core::Error::ProbeTimeout {
                address,
                millis: self.probe_timeout_millis(),
            }),
        }
    }

    fn probe_timeout_millis(&self) -> u64 {
        u64::try_from(self.config.probe_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
