#![warn(missing_docs)]

//! Gattwire maps the [Bluetooth Low Energy] attribute table exposed by a platform BLE stack to flat, self-contained
//! wire records, and maps those records back into an attribute graph that a local GATT server can host.
//!
//! The platform attribute table is a live graph: services own characteristics, characteristics own descriptors,
//! and primary services include secondary services. A characteristic only knows its *direct* owner, so a record
//! describing a characteristic inside an included service would lose the primary service it lives under. Gattwire
//! recovers that relationship when serializing, so a receiver can rebuild the tree without access to the original.
//!
//! [Bluetooth Low Energy]: https://www.bluetooth.com/specifications/specs/
//!
//! # Usage
//!
//! ```rust
//!# use gattwire::{Characteristic, Device, DeviceId, DeviceType, Service, ServiceKind};
//!# use gattwire::serialize::ClientSerializer;
//!# use gattwire::btuuid::{characteristics, services};
//!# fn main() -> Result<(), gattwire::Error> {
//!let device = Device::new(DeviceId::new("AB:CD:EF:01:23:45"), Some("sensor".into()), DeviceType::Le);
//!
//!let mut battery = Service::new(services::BATTERY, ServiceKind::Primary);
//!battery.add_characteristic(Characteristic::new(characteristics::BATTERY_LEVEL, 0x12));
//!let tree = vec![battery];
//!
//!let serializer = ClientSerializer::new(&device, &tree);
//!let record = serializer.service(&tree[0])?;
//!assert_eq!(record.characteristics[0].service_uuid.as_deref(), Some(record.uuid.as_str()));
//!assert!(record.characteristics[0].properties.notify);
//!#    Ok(())
//!# }
//! ```
//!
//! # Overview
//!
//! - [`CharacteristicProperties`] converts the platform properties bitmask to flags and back.
//! - [`AdvertisementData`][wire::AdvertisementData] is decoded either from
//!   [raw advertisement bytes][wire::AdvertisementData::from_raw] or from a
//!   [platform scan record][wire::AdvertisementData::from_scan_record].
//! - [`serialize`] turns devices, services, characteristics and descriptors into [`wire`] records, resolving the
//!   primary owner of characteristics that live inside included services with [`hierarchy`].
//! - [`reconstruct`] rebuilds a [`Service`] graph from [`wire`] records for hosting.
//!
//! Every conversion is a synchronous function of its arguments. Nothing is cached between calls and no global state
//! is consulted, so conversions may run on whichever thread the platform delivers its callbacks on.
//!
//! # Feature flags
//!
//! The `serde` feature derives `Serialize` and `Deserialize` for the [`wire`] records and the enums they contain.

pub mod advertisement;
pub mod btuuid;
pub mod error;
pub mod hierarchy;
pub mod reconstruct;
pub mod serialize;
pub mod wire;

mod characteristic;
mod descriptor;
mod device;
mod service;
mod types;

pub use advertisement::ScanRecord;
pub use btuuid::BluetoothUuidExt;
pub use characteristic::{Characteristic, ServiceRef};
pub use descriptor::Descriptor;
pub use device::{Device, DeviceId};
pub use error::Error;
pub use service::Service;
pub use types::{ConnectionState, DeviceType, ServiceKind};
pub use uuid::Uuid;

/// Convenience alias for a result with [`Error`]
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// GATT characteristic properties as defined in the Bluetooth Core Specification, Vol 3, Part G, §3.3.1.1, plus the
/// two encryption-required flags some platforms report in the upper bits of the same mask.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacteristicProperties {
    pub broadcast: bool,
    pub read: bool,
    pub write_without_response: bool,
    pub write: bool,
    pub notify: bool,
    pub indicate: bool,
    pub authenticated_signed_writes: bool,
    pub extended_properties: bool,
    pub notify_encryption_required: bool,
    pub indicate_encryption_required: bool,
}

impl CharacteristicProperties {
    /// Mask of the ten bits that carry a property flag.
    pub const MASK: u16 = 0x03ff;

    /// Raw transmutation from the platform bitmask.
    ///
    /// Bits above [`MASK`][Self::MASK] are ignored.
    pub fn from_bits(bits: u16) -> Self {
        CharacteristicProperties {
            broadcast: (bits & (1 << 0)) != 0,
            read: (bits & (1 << 1)) != 0,
            write_without_response: (bits & (1 << 2)) != 0,
            write: (bits & (1 << 3)) != 0,
            notify: (bits & (1 << 4)) != 0,
            indicate: (bits & (1 << 5)) != 0,
            authenticated_signed_writes: (bits & (1 << 6)) != 0,
            extended_properties: (bits & (1 << 7)) != 0,
            notify_encryption_required: (bits & (1 << 8)) != 0,
            indicate_encryption_required: (bits & (1 << 9)) != 0,
        }
    }

    /// Raw transmutation to the platform bitmask.
    ///
    /// The result never has bits above [`MASK`][Self::MASK] set, so `from_bits(m).to_bits() == m & MASK`.
    pub fn to_bits(self) -> u16 {
        u16::from(self.broadcast)
            | (u16::from(self.read) << 1)
            | (u16::from(self.write_without_response) << 2)
            | (u16::from(self.write) << 3)
            | (u16::from(self.notify) << 4)
            | (u16::from(self.indicate) << 5)
            | (u16::from(self.authenticated_signed_writes) << 6)
            | (u16::from(self.extended_properties) << 7)
            | (u16::from(self.notify_encryption_required) << 8)
            | (u16::from(self.indicate_encryption_required) << 9)
    }

    /// Size in bytes of these properties as a message in the wire schema: one tag byte and one value byte for
    /// each flag that is set.
    pub fn encoded_len(self) -> usize {
        2 * self.to_bits().count_ones() as usize
    }
}

impl From<u16> for CharacteristicProperties {
    fn from(bits: u16) -> Self {
        CharacteristicProperties::from_bits(bits)
    }
}

impl From<CharacteristicProperties> for u16 {
    fn from(properties: CharacteristicProperties) -> Self {
        properties.to_bits()
    }
}
