//! Shared device records
//!
//! A shared record lets several tasks observe and update the same peripheral.
//! It tracks:
//! - the record itself (behind a read/write lock)
//! - a revision counter (one tick per update)
//! - the time of the last update

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::trace;
use wearlink_types::{DeviceRecord, Peripheral, TelemetryUpdate};

/// Thread-safe device record
///
/// Cloning is cheap (Arc internally) and all clones see the same record.
/// Each [`apply`](Self::apply) is atomic on its own; nothing is promised
/// across two updates.
pub struct SharedRecord<H> {
    inner: Arc<SharedInner<H>>,
}

struct SharedInner<H> {
    record: RwLock<DeviceRecord<H>>,

    /// Updates applied so far
    revision: AtomicU64,

    updated_at: RwLock<Option<DateTime<Utc>>>,
}

impl<H> SharedRecord<H> {
    /// Wrap a fresh record for `device`
    pub fn new(device: H) -> Self {
        Self::from_record(DeviceRecord::new(device))
    }

    /// Wrap an existing record (revision starts at 0)
    pub fn from_record(record: DeviceRecord<H>) -> Self {
        Self {
            inner: Arc::new(SharedInner {
                record: RwLock::new(record),
                revision: AtomicU64::new(0),
                updated_at: RwLock::new(None),
            }),
        }
    }

    /// Number of updates applied so far
    pub fn revision(&self) -> u64 {
        self.inner.revision.load(Ordering::Acquire)
    }

    /// Time of the last update
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        *self.inner.updated_at.read()
    }

    /// Borrow the record for the duration of `f`
    pub fn read<R>(&self, f: impl FnOnce(&DeviceRecord<H>) -> R) -> R {
        f(&self.inner.record.read())
    }

    /// Check whether two handles point at the same shared record
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<H: Peripheral> SharedRecord<H> {
    /// Apply one telemetry update and return the new revision
    pub fn apply(&self, update: TelemetryUpdate) -> u64 {
        let mut record = self.inner.record.write();
        let address = record.device().address();

        trace!(%address, %update, "Applying telemetry update");

        record.apply(update);
        *self.inner.updated_at.write() = Some(Utc::now());

        self.inner.revision.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl<H: Clone> SharedRecord<H> {
    /// Copy of the current record
    pub fn snapshot(&self) -> DeviceRecord<H> {
        self.inner.record.read().clone()
    }

    /// Copy of the peripheral handle
    pub fn device(&self) -> H {
        self.inner.record.read().device().clone()
    }
}

impl<H> Clone for SharedRecord<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for SharedRecord<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRecord")
            .field("record", &*self.inner.record.read())
            .field("revision", &self.revision())
            .field("updated_at", &self.updated_at())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wearlink_types::PeripheralAddress;

    fn addr() -> PeripheralAddress {
        PeripheralAddress::from(0x00AA_0000_0001u64)
    }

    #[test]
    fn test_shared_new() {
        let shared = SharedRecord::new(addr());

        assert_eq!(shared.revision(), 0);
        assert_eq!(shared.updated_at(), None);
        assert_eq!(shared.snapshot(), DeviceRecord::new(addr()));
        assert_eq!(shared.device(), addr());
    }

    #[test]
    fn test_apply_bumps_revision() {
        let shared = SharedRecord::new(addr());

        assert_eq!(shared.apply(TelemetryUpdate::HeartRate(72)), 1);
        assert_eq!(shared.apply(TelemetryUpdate::Steps(100)), 2);

        assert_eq!(shared.revision(), 2);
        assert!(shared.updated_at().is_some());
        assert_eq!(
            shared.snapshot(),
            DeviceRecord::new(addr()).with_heart_rate_bpm(72).with_step_count(100)
        );
    }

    #[test]
    fn test_repeated_value_still_counts() {
        let shared = SharedRecord::new(addr());

        shared.apply(TelemetryUpdate::Battery(120));
        let first = shared.updated_at();
        shared.apply(TelemetryUpdate::Battery(120));

        assert_eq!(shared.revision(), 2);
        assert!(shared.updated_at() >= first);
        assert_eq!(shared.read(|r| r.battery_percent()), 120);
    }

    #[test]
    fn test_clones_share_state() {
        let a = SharedRecord::new(addr());
        let b = a.clone();

        a.apply(TelemetryUpdate::Firmware("3.0.1".into()));

        assert!(a.ptr_eq(&b));
        assert_eq!(b.read(|r| r.firmware_version().map(str::to_owned)), Some("3.0.1".into()));
        assert_eq!(b.revision(), 1);
    }

    #[test]
    fn test_independent_records_do_not_share() {
        let a = SharedRecord::new(addr());
        let b = SharedRecord::new(addr());

        a.apply(TelemetryUpdate::Calories(10));

        assert!(!a.ptr_eq(&b));
        assert_eq!(b.read(|r| r.calorie_count()), 0);
    }

    #[test]
    fn test_concurrent_updates_all_counted() {
        let shared = SharedRecord::new(addr());

        std::thread::scope(|s| {
            for t in 0..4u32 {
                let shared = shared.clone();
                s.spawn(move || {
                    for i in 0..250u32 {
                        shared.apply(TelemetryUpdate::Steps(t * 1000 + i));
                    }
                });
            }
        });

        assert_eq!(shared.revision(), 1000);
    }
}
