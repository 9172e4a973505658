//! Device record: a peripheral handle plus its last-known telemetry

use std::fmt;

use crate::address::Peripheral;
use crate::update::TelemetryUpdate;

/// Last-known telemetry snapshot of one peripheral
///
/// The handle `H` is owned by the platform Bluetooth stack. The record only
/// stores it: it is set once by [`DeviceRecord::new`] and never reassigned.
/// Telemetry fields are independent of each other and may transiently
/// disagree (e.g. steps vs. distance).
///
/// # Examples
///
/// ```
/// use wearlink_types::{DeviceRecord, PeripheralAddress};
///
/// let addr: PeripheralAddress = "C0:FF:EE:00:00:01".parse().unwrap();
/// let record = DeviceRecord::new(addr).with_heart_rate_bpm(72);
///
/// assert_eq!(record.heart_rate_bpm(), 72);
/// assert_eq!(record.step_count(), 0);
/// assert_eq!(record.firmware_version(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord<H> {
    device: H,
    firmware_version: Option<String>,
    heart_rate_bpm: u16,
    step_count: u32,
    distance_meters: u32,
    calorie_count: u32,
    battery_percent: u8,
}

impl<H> DeviceRecord<H> {
    pub fn new(device: H) -> Self {
        Self {
            device,
            firmware_version: None,
            heart_rate_bpm: 0,
            step_count: 0,
            distance_meters: 0,
            calorie_count: 0,
            battery_percent: 0,
        }
    }

    /// Peripheral handle
    pub fn device(&self) -> &H {
        &self.device
    }

    /// Consume the record and hand back the peripheral handle
    pub fn into_device(self) -> H {
        self.device
    }

    pub fn firmware_version(&self) -> Option<&str> {
        self.firmware_version.as_deref()
    }

    pub fn heart_rate_bpm(&self) -> u16 {
        self.heart_rate_bpm
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn distance_meters(&self) -> u32 {
        self.distance_meters
    }

    pub fn calorie_count(&self) -> u32 {
        self.calorie_count
    }

    pub fn battery_percent(&self) -> u8 {
        self.battery_percent
    }

    // In-place setters

    pub fn set_firmware_version(&mut self, version: impl Into<String>) {
        self.firmware_version = Some(version.into());
    }

    /// Forget the firmware version (e.g. after a firmware update)
    pub fn clear_firmware_version(&mut self) {
        self.firmware_version = None;
    }

    pub fn set_heart_rate_bpm(&mut self, bpm: u16) {
        self.heart_rate_bpm = bpm;
    }

    pub fn set_step_count(&mut self, steps: u32) {
        self.step_count = steps;
    }

    pub fn set_distance_meters(&mut self, meters: u32) {
        self.distance_meters = meters;
    }

    pub fn set_calorie_count(&mut self, calories: u32) {
        self.calorie_count = calories;
    }

    /// Stored as reported; out-of-range readings are kept as-is
    pub fn set_battery_percent(&mut self, percent: u8) {
        self.battery_percent = percent;
    }

    // Replacement ("with") style

    pub fn with_firmware_version(mut self, version: impl Into<String>) -> Self {
        self.set_firmware_version(version);
        self
    }

    pub fn with_heart_rate_bpm(mut self, bpm: u16) -> Self {
        self.set_heart_rate_bpm(bpm);
        self
    }

    pub fn with_step_count(mut self, steps: u32) -> Self {
        self.set_step_count(steps);
        self
    }

    pub fn with_distance_meters(mut self, meters: u32) -> Self {
        self.set_distance_meters(meters);
        self
    }

    pub fn with_calorie_count(mut self, calories: u32) -> Self {
        self.set_calorie_count(calories);
        self
    }

    pub fn with_battery_percent(mut self, percent: u8) -> Self {
        self.set_battery_percent(percent);
        self
    }

    /// Apply a single-field update in place
    ///
    /// Only the field targeted by `update` changes.
    pub fn apply(&mut self, update: TelemetryUpdate) {
        match update {
            TelemetryUpdate::HeartRate(bpm) => self.set_heart_rate_bpm(bpm),
            TelemetryUpdate::Steps(steps) => self.set_step_count(steps),
            TelemetryUpdate::Distance(meters) => self.set_distance_meters(meters),
            TelemetryUpdate::Calories(calories) => self.set_calorie_count(calories),
            TelemetryUpdate::Battery(percent) => self.set_battery_percent(percent),
            TelemetryUpdate::Firmware(version) => self.set_firmware_version(version),
        }
    }
}

impl<H: Peripheral> fmt::Display for DeviceRecord<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device[{}, FW: {}, HR: {} bpm, steps: {}, dist: {} m, cal: {}, batt: {}%]",
            self.device.address(),
            self.firmware_version.as_deref().unwrap_or("unknown"),
            self.heart_rate_bpm,
            self.step_count,
            self.distance_meters,
            self.calorie_count,
            self.battery_percent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PeripheralAddress;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn h1() -> PeripheralAddress {
        PeripheralAddress::from(0xC0FF_EE00_0001u64)
    }

    fn h2() -> PeripheralAddress {
        PeripheralAddress::from(0xC0FF_EE00_0002u64)
    }

    #[test]
    fn test_new_record_has_zeroed_telemetry() {
        let record = DeviceRecord::new(h1());

        assert_eq!(record.device(), &h1());
        assert_eq!(record.heart_rate_bpm(), 0);
        assert_eq!(record.step_count(), 0);
        assert_eq!(record.distance_meters(), 0);
        assert_eq!(record.calorie_count(), 0);
        assert_eq!(record.battery_percent(), 0);
        assert_eq!(record.firmware_version(), None);
    }

    #[test]
    fn test_set_heart_rate_changes_only_that_field() {
        let mut record = DeviceRecord::new(h1());
        record.set_heart_rate_bpm(72);

        let expected = DeviceRecord::new(h1()).with_heart_rate_bpm(72);
        assert_eq!(record, expected);
        assert_eq!(record.heart_rate_bpm(), 72);
        assert_eq!(record.step_count(), 0);
        assert_eq!(record.firmware_version(), None);
    }

    #[test]
    fn test_with_methods_build_full_snapshot() {
        let record = DeviceRecord::new(h1())
            .with_firmware_version("2.1.7")
            .with_heart_rate_bpm(64)
            .with_step_count(10_500)
            .with_distance_meters(7_300)
            .with_calorie_count(412)
            .with_battery_percent(88);

        assert_eq!(record.firmware_version(), Some("2.1.7"));
        assert_eq!(record.heart_rate_bpm(), 64);
        assert_eq!(record.step_count(), 10_500);
        assert_eq!(record.distance_meters(), 7_300);
        assert_eq!(record.calorie_count(), 412);
        assert_eq!(record.battery_percent(), 88);
    }

    #[test]
    fn test_with_matches_set() {
        let built = DeviceRecord::new(h2())
            .with_firmware_version("0.9.3")
            .with_heart_rate_bpm(55)
            .with_step_count(1)
            .with_distance_meters(2)
            .with_calorie_count(3)
            .with_battery_percent(4);

        let mut set = DeviceRecord::new(h2());
        set.set_firmware_version("0.9.3");
        set.set_heart_rate_bpm(55);
        set.set_step_count(1);
        set.set_distance_meters(2);
        set.set_calorie_count(3);
        set.set_battery_percent(4);

        assert_eq!(built, set);
    }

    #[test]
    fn test_battery_reading_stored_as_reported() {
        let mut record = DeviceRecord::new(h1()).with_step_count(9);
        record.set_battery_percent(40);
        assert_eq!(record.battery_percent(), 40);

        // No range check: whatever the device reports is kept
        record.set_battery_percent(101);
        assert_eq!(record.battery_percent(), 101);

        record.apply(TelemetryUpdate::Battery(255));
        assert_eq!(record, DeviceRecord::new(h1()).with_step_count(9).with_battery_percent(255));
    }

    #[test]
    fn test_firmware_version_can_be_cleared() {
        let mut record = DeviceRecord::new(h1()).with_firmware_version("1.0");
        record.clear_firmware_version();
        assert_eq!(record.firmware_version(), None);
    }

    #[test]
    fn test_distinct_handles_are_distinct_records() {
        let mut a = DeviceRecord::new(h1()).with_heart_rate_bpm(70);
        let b = DeviceRecord::new(h2()).with_heart_rate_bpm(70);

        // Same telemetry, different peripheral
        assert_ne!(a, b);

        a.set_heart_rate_bpm(90);
        assert_eq!(a.heart_rate_bpm(), 90);
        assert_eq!(b.heart_rate_bpm(), 70);
    }

    #[test]
    fn test_into_device_returns_original_handle() {
        let record = DeviceRecord::new(h2()).with_calorie_count(3);
        assert_eq!(record.into_device(), h2());
    }

    #[test]
    fn test_display() {
        let record = DeviceRecord::new(h1())
            .with_heart_rate_bpm(72)
            .with_battery_percent(50);

        assert_eq!(
            record.to_string(),
            "Device[C0:FF:EE:00:00:01, FW: unknown, HR: 72 bpm, steps: 0, dist: 0 m, cal: 0, batt: 50%]"
        );
    }

    fn any_update() -> impl Strategy<Value = TelemetryUpdate> {
        prop_oneof![
            any::<u16>().prop_map(TelemetryUpdate::HeartRate),
            any::<u32>().prop_map(TelemetryUpdate::Steps),
            any::<u32>().prop_map(TelemetryUpdate::Distance),
            any::<u32>().prop_map(TelemetryUpdate::Calories),
            any::<u8>().prop_map(TelemetryUpdate::Battery),
            "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,3}".prop_map(TelemetryUpdate::Firmware),
        ]
    }

    fn fields(r: &DeviceRecord<PeripheralAddress>) -> [String; 6] {
        [
            format!("{:?}", r.firmware_version()),
            r.heart_rate_bpm().to_string(),
            r.step_count().to_string(),
            r.distance_meters().to_string(),
            r.calorie_count().to_string(),
            r.battery_percent().to_string(),
        ]
    }

    fn field_index(update: &TelemetryUpdate) -> usize {
        match update {
            TelemetryUpdate::Firmware(_) => 0,
            TelemetryUpdate::HeartRate(_) => 1,
            TelemetryUpdate::Steps(_) => 2,
            TelemetryUpdate::Distance(_) => 3,
            TelemetryUpdate::Calories(_) => 4,
            TelemetryUpdate::Battery(_) => 5,
        }
    }

    proptest! {
        #[test]
        fn prop_update_touches_only_its_field(
            seed in proptest::collection::vec(any_update(), 0..8),
            update in any_update(),
        ) {
            let mut record = DeviceRecord::new(h1());
            for u in seed {
                record.apply(u);
            }

            let before = fields(&record);
            let target = field_index(&update);
            record.apply(update);
            let after = fields(&record);

            for i in 0..before.len() {
                if i != target {
                    prop_assert_eq!(&before[i], &after[i]);
                }
            }
            prop_assert_eq!(record.device(), &h1());
        }
    }
}
