//! `Uuid` extensions for Bluetooth UUIDs

use uuid::Uuid;

use crate::error::{Error, ErrorKind};

/// This is the Bluetooth Base UUID. It is used with 16-bit and 32-bit UUIDs
/// [defined](https://www.bluetooth.com/specifications/assigned-numbers/) by the Bluetooth SIG.
pub const BLUETOOTH_BASE_UUID: u128 = 0x00000000_0000_1000_8000_00805f9b34fb;

/// Const function to create a 16-bit Bluetooth UUID
pub const fn bluetooth_uuid_from_u16(uuid: u16) -> Uuid {
    Uuid::from_u128(((uuid as u128) << 96) | BLUETOOTH_BASE_UUID)
}

/// Const function to create a 32-bit Bluetooth UUID
pub const fn bluetooth_uuid_from_u32(uuid: u32) -> Uuid {
    Uuid::from_u128(((uuid as u128) << 96) | BLUETOOTH_BASE_UUID)
}

/// Extension trait for [uuid::Uuid] with helpers for the short UUID forms found in advertisements
pub trait BluetoothUuidExt: private::Sealed + Sized {
    /// Creates a 16-bit Bluetooth UUID
    fn from_u16(uuid: u16) -> Self;

    /// Creates a 32-bit Bluetooth UUID
    fn from_u32(uuid: u32) -> Self;

    /// Creates a UUID from `bytes` in over-the-air (little-endian) order.
    ///
    /// Fails with [`InvalidParameter`][ErrorKind::InvalidParameter] unless `bytes.len()` is one of 2, 4, or 16.
    fn try_from_le_bytes(bytes: &[u8]) -> Result<Self, Error>;
}

impl BluetoothUuidExt for Uuid {
    fn from_u16(uuid: u16) -> Self {
        bluetooth_uuid_from_u16(uuid)
    }

    fn from_u32(uuid: u32) -> Self {
        bluetooth_uuid_from_u32(uuid)
    }

    fn try_from_le_bytes(bytes: &[u8]) -> Result<Self, Error> {
        match bytes.len() {
            2 => Ok(Self::from_u16(u16::from_le_bytes([bytes[0], bytes[1]]))),
            4 => Ok(Self::from_u32(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))),
            16 => {
                let mut be = [0u8; 16];
                be.copy_from_slice(bytes);
                be.reverse();
                Ok(Self::from_bytes(be))
            }
            len => Err(Error::new(
                ErrorKind::InvalidParameter,
                None,
                format!("invalid slice length {len} for bluetooth UUID"),
            )),
        }
    }
}

mod private {
    use uuid::Uuid;

    pub trait Sealed {}

    impl Sealed for Uuid {}
}

/// Bluetooth GATT Service 16-bit UUIDs
pub mod services {
    #![allow(missing_docs)]

    use uuid::Uuid;

    use super::bluetooth_uuid_from_u16;

    pub const GENERIC_ACCESS: Uuid = bluetooth_uuid_from_u16(0x1800);
    pub const GENERIC_ATTRIBUTE: Uuid = bluetooth_uuid_from_u16(0x1801);
    pub const DEVICE_INFORMATION: Uuid = bluetooth_uuid_from_u16(0x180a);
    pub const HEART_RATE: Uuid = bluetooth_uuid_from_u16(0x180d);
    pub const BATTERY: Uuid = bluetooth_uuid_from_u16(0x180f);
}

/// Bluetooth GATT Characteristic 16-bit UUIDs
pub mod characteristics {
    #![allow(missing_docs)]

    use uuid::Uuid;

    use super::bluetooth_uuid_from_u16;

    pub const DEVICE_NAME: Uuid = bluetooth_uuid_from_u16(0x2a00);
    pub const APPEARANCE: Uuid = bluetooth_uuid_from_u16(0x2a01);
    pub const BATTERY_LEVEL: Uuid = bluetooth_uuid_from_u16(0x2a19);
    pub const MANUFACTURER_NAME_STRING: Uuid = bluetooth_uuid_from_u16(0x2a29);
    pub const HEART_RATE_MEASUREMENT: Uuid = bluetooth_uuid_from_u16(0x2a37);
}

/// Bluetooth GATT Descriptor 16-bit UUIDs
pub mod descriptors {
    #![allow(missing_docs)]

    use uuid::Uuid;

    use super::bluetooth_uuid_from_u16;

    pub const CHARACTERISTIC_USER_DESCRIPTION: Uuid = bluetooth_uuid_from_u16(0x2901);
    pub const CLIENT_CHARACTERISTIC_CONFIGURATION: Uuid = bluetooth_uuid_from_u16(0x2902);
}
