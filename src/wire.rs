//! Flat wire records exchanged with the transport layer.
//!
//! Records are self-contained: they hold no references to the platform graph, and every UUID is carried as its
//! lowercase hyphenated string form. Optional fields are `Option`s so that an unset field can always be told apart
//! from one set to zero or empty.

use std::collections::BTreeMap;

use crate::{CharacteristicProperties, ConnectionState, DeviceType};

/// A remote device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BluetoothDevice {
    /// Platform identifier of the device
    pub remote_id: String,
    /// Name reported by the platform
    pub name: Option<String>,
    /// Transport type
    pub device_type: DeviceType,
}

/// A GATT service with its characteristics and included services nested by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BluetoothService {
    /// Identifier of the remote device; unset for locally hosted services
    pub remote_id: Option<String>,
    /// Service UUID
    pub uuid: String,
    /// `true` for primary services
    pub is_primary: bool,
    /// Characteristics in platform order
    pub characteristics: Vec<BluetoothCharacteristic>,
    /// Included services in platform order
    pub included_services: Vec<BluetoothService>,
}

/// A GATT characteristic.
///
/// `service_uuid` names the primary service the characteristic lives under. When the characteristic belongs to a
/// secondary service included by that primary, `secondary_service_uuid` names the secondary service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BluetoothCharacteristic {
    /// Identifier of the remote device; unset for locally hosted characteristics
    pub remote_id: Option<String>,
    /// Characteristic UUID
    pub uuid: String,
    /// UUID of the owning primary service
    pub service_uuid: Option<String>,
    /// UUID of the directly owning secondary service, if any
    pub secondary_service_uuid: Option<String>,
    /// Descriptors in platform order
    pub descriptors: Vec<BluetoothDescriptor>,
    /// Decoded properties
    pub properties: CharacteristicProperties,
    /// Cached value
    pub value: Option<Vec<u8>>,
}

/// A GATT descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BluetoothDescriptor {
    /// Identifier of the remote device; unset for locally hosted descriptors
    pub remote_id: Option<String>,
    /// Descriptor UUID
    pub uuid: String,
    /// UUID of the service directly owning the characteristic
    pub service_uuid: String,
    /// UUID of the owning characteristic
    pub characteristic_uuid: String,
    /// Cached value
    pub value: Option<Vec<u8>>,
}

/// Data included in a Bluetooth advertisement or scan response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvertisementData {
    /// The (possibly shortened) local name of the device (CSS §A.1.2)
    pub local_name: Option<String>,
    /// Transmitted power level in dBm (CSS §A.1.5)
    pub tx_power_level: Option<i32>,
    /// Set for connectable advertising packets, when the platform reports it
    pub connectable: Option<bool>,
    /// Manufacturer specific data keyed by company identifier (CSS §A.1.4)
    pub manufacturer_data: BTreeMap<u16, Vec<u8>>,
    /// Service associated data keyed by service UUID (CSS §A.1.11)
    pub service_data: BTreeMap<String, Vec<u8>>,
    /// Advertised GATT service UUIDs in the order received (CSS §A.1.1)
    pub service_uuids: Vec<String>,
}

/// A device discovered during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanResult {
    /// The source of the advertisement
    pub device: BluetoothDevice,
    /// The advertisement data; every field is unset if there was no payload
    pub advertisement_data: AdvertisementData,
    /// The signal strength in dBm of the received advertisement packet
    pub rssi: i32,
}

/// A change in the connection state of a remote device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceStateResponse {
    /// Platform identifier of the device
    pub remote_id: String,
    /// The new state
    pub state: ConnectionState,
}
