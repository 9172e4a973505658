//! Registry configuration

use std::time::Duration;

/// Default maximum number of tracked peripherals
pub const DEFAULT_MAX_DEVICES: usize = 64;

/// Default reachability probe timeout
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Settings for a [`DeviceRegistry`](crate::DeviceRegistry)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of peripherals tracked at once
    pub max_devices: usize,

    /// Upper bound for a single `is_reachable` probe
    pub probe_timeout: Duration,

    /// Drop records whose peripheral failed revalidation
    pub evict_unreachable: bool,
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum number of tracked peripherals
    pub fn with_max_devices(mut self, max_devices: usize) -> Self {
        self.max_devices = max_devices;
        self
    }

    /// Set reachability probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Keep or drop unreachable peripherals on revalidation
    pub fn with_evict_unreachable(mut self, evict: bool) -> Self {
        self.evict_unreachable = evict;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_devices: DEFAULT_MAX_DEVICES,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            evict_unreachable: true,
        }
    }
}
