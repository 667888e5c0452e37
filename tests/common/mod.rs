#![allow(dead_code)]

use gattwire::btuuid::{characteristics, descriptors, services};
use gattwire::{Characteristic, Descriptor, Device, DeviceId, DeviceType, Service, ServiceKind, Uuid};
use tracing::metadata::LevelFilter;

pub const SECONDARY: Uuid = Uuid::from_u128(0x6e400001_b5a3_f393_e0a9_e50e24dcca9e);
pub const SECONDARY_VALUE: Uuid = Uuid::from_u128(0x6e400002_b5a3_f393_e0a9_e50e24dcca9e);

pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .from_env_lossy(),
        )
        .try_init();
}

pub fn device() -> Device {
    Device::new(DeviceId::new("AB:CD:EF:01:23:45"), Some("sensor".into()), DeviceType::Le)
}

/// Heart rate (primary) including a vendor secondary service, plus a battery service.
pub fn tree() -> Vec<Service> {
    let mut secondary = Service::new(SECONDARY, ServiceKind::Secondary);
    secondary.add_characteristic(Characteristic::new(SECONDARY_VALUE, 0x0a).with_value(vec![7, 8, 9]));

    let mut measurement = Characteristic::new(characteristics::HEART_RATE_MEASUREMENT, 0x10);
    measurement.add_descriptor(
        Descriptor::new(descriptors::CLIENT_CHARACTERISTIC_CONFIGURATION).with_value(vec![0x01, 0x00]),
    );

    let mut heart_rate = Service::new(services::HEART_RATE, ServiceKind::Primary);
    heart_rate.add_characteristic(measurement);
    heart_rate.add_included_service(secondary);

    let mut battery = Service::new(services::BATTERY, ServiceKind::Primary);
    battery.add_characteristic(Characteristic::new(characteristics::BATTERY_LEVEL, 0x12).with_value(vec![]));

    vec![heart_rate, battery]
}
