//! Single-field telemetry updates

use std::fmt;

/// One telemetry value reported by a peripheral
///
/// Each variant targets exactly one field of a [`DeviceRecord`](crate::DeviceRecord).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TelemetryUpdate {
    /// Heart rate in beats per minute
    HeartRate(u16),

    /// Cumulative step count
    Steps(u32),

    /// Distance in meters
    Distance(u32),

    /// Calorie count
    Calories(u32),

    /// Battery level in percent
    Battery(u8),

    /// Firmware version string
    Firmware(String),
}

impl TelemetryUpdate {
    /// Name of the field this update targets
    pub fn field(&self) -> &'static str {
        match self {
            Self::HeartRate(_) => "heart_rate_bpm",
            Self::Steps(_) => "step_count",
            Self::Distance(_) => "distance_meters",
            Self::Calories(_) => "calorie_count",
            Self::Battery(_) => "battery_percent",
            Self::Firmware(_) => "firmware_version",
        }
    }
}

impl fmt::Display for TelemetryUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: &dyn fmt::Display = match self {
            Self::HeartRate(v) => v,
            Self::Steps(v) | Self::Distance(v) | Self::Calories(v) => v,
            Self::Battery(v) => v,
            Self::Firmware(v) => return write!(f, "{}={:?}", self.field(), v),
        };
        write!(f, "{}={}", self.field(), value)
    }
}
