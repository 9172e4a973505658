//! Track a couple of wearables, feed telemetry and revalidate handles

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use wearlink::{DeviceRegistry, PeripheralAddress, RegistryConfig, StaticLink, TelemetryUpdate};

#[tokio::main]
async fn main() -> wearlink::Result<()> {
    // RUST_LOG=wearlink=debug for per-update logs
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let registry = DeviceRegistry::with_config(
        RegistryConfig::new()
            .with_max_devices(8)
            .with_probe_timeout(Duration::from_millis(500)),
    );

    let wrist: PeripheralAddress = "C0:FF:EE:00:00:01".parse()?;
    let chest: PeripheralAddress = "C0:FF:EE:00:00:02".parse()?;

    let wrist_link = Arc::new(StaticLink::new(wrist).with_name("Wrist band"));
    let chest_link = Arc::new(StaticLink::new(chest).with_name("Chest strap"));

    registry.register(wrist_link.clone())?;
    registry.register(chest_link.clone())?;

    registry.apply(&wrist, TelemetryUpdate::Firmware("2.4.1".into()))?;
    registry.apply(&wrist, TelemetryUpdate::Steps(8_412))?;
    registry.apply(&wrist, TelemetryUpdate::Distance(6_120))?;
    registry.apply(&wrist, TelemetryUpdate::Battery(76))?;
    registry.apply(&chest, TelemetryUpdate::HeartRate(68))?;

    for record in registry.records() {
        println!("{} (rev {})", record.snapshot(), record.revision());
    }

    // Chest strap walks out of range
    chest_link.set_reachable(false);

    let gone = registry.revalidate().await;
    println!("Unreachable: {:?}", gone);
    println!("Still tracking: {:?}", registry.addresses());

    Ok(())
}
