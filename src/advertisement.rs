//! Advertisement decoding.
//!
//! Platforms hand advertisements over in one of two shapes: the raw advertising payload (a sequence of AD
//! structures, Core Specification Vol 3, Part C, §11) or a record the platform has already parsed. Both decode to
//! the same [`AdvertisementData`].

use tracing::{trace, warn};

use crate::wire::AdvertisementData;
use crate::{BluetoothUuidExt, Uuid};

/// Value a platform reports for the tx power level when the advertisement did not include one.
pub const TX_POWER_NOT_PRESENT: i32 = i32::MIN;

/// Flags bit used to derive connectability when the platform does not report it directly.
const CONNECTABLE_FLAG: u8 = 0x02;

/// The type octet of an AD structure (Bluetooth Assigned Numbers §2.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdType(u8);

#[allow(missing_docs)]
impl AdType {
    pub const FLAGS: AdType = AdType(0x01);
    pub const INCOMPLETE_16_SERVICE_LIST: AdType = AdType(0x02);
    pub const COMPLETE_16_SERVICE_LIST: AdType = AdType(0x03);
    pub const INCOMPLETE_32_SERVICE_LIST: AdType = AdType(0x04);
    pub const COMPLETE_32_SERVICE_LIST: AdType = AdType(0x05);
    pub const INCOMPLETE_128_SERVICE_LIST: AdType = AdType(0x06);
    pub const COMPLETE_128_SERVICE_LIST: AdType = AdType(0x07);
    pub const SHORT_NAME: AdType = AdType(0x08);
    pub const FULL_NAME: AdType = AdType(0x09);
    pub const TX_POWER_LEVEL: AdType = AdType(0x0a);
    pub const SERVICE_DATA_16: AdType = AdType(0x16);
    pub const SERVICE_DATA_32: AdType = AdType(0x20);
    pub const SERVICE_DATA_128: AdType = AdType(0x21);
    pub const MANUFACTURER_SPECIFIC_DATA: AdType = AdType(0xff);

    /// The raw type octet
    pub const fn to_u8(self) -> u8 {
        self.0
    }
}

impl From<u8> for AdType {
    fn from(value: u8) -> Self {
        AdType(value)
    }
}

/// Iterator over the AD structures of a raw advertising payload.
///
/// Iteration ends at the end of the buffer, at a zero length octet, or at a structure whose declared length runs
/// past the end of the buffer.
#[derive(Debug, Clone)]
pub struct AdStructures<'a> {
    data: &'a [u8],
}

impl<'a> AdStructures<'a> {
    /// Iterates over the structures in `data`.
    pub fn new(data: &'a [u8]) -> Self {
        AdStructures { data }
    }
}

impl<'a> Iterator for AdStructures<'a> {
    type Item = (AdType, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.data.split_first()?;
        let len = usize::from(len);
        if len == 0 {
            self.data = &[];
            return None;
        }
        if len > rest.len() {
            warn!("AD structure length {} overruns the remaining {} bytes", len, rest.len());
            self.data = &[];
            return None;
        }
        let (structure, rest) = rest.split_at(len);
        self.data = rest;
        Some((AdType(structure[0]), &structure[1..]))
    }
}

/// A scan record the platform has already parsed.
///
/// This is the seam to the platform stack: glue code implements it over the platform's own record object.
pub trait ScanRecord {
    /// The advertising flags octet, if the advertisement carried one
    fn advertise_flags(&self) -> Option<u8>;

    /// The local name, if any
    fn device_name(&self) -> Option<String>;

    /// The tx power level, or [`TX_POWER_NOT_PRESENT`]
    fn tx_power_level(&self) -> i32;

    /// Manufacturer specific data entries as `(company id, payload)` in platform order
    fn manufacturer_specific_data(&self) -> Vec<(i32, Vec<u8>)>;

    /// Service data entries in platform order
    fn service_data(&self) -> Vec<(Uuid, Vec<u8>)>;

    /// Advertised service UUIDs, if the advertisement listed any
    fn service_uuids(&self) -> Option<Vec<Uuid>>;
}

impl AdvertisementData {
    /// Decodes a raw advertising payload.
    ///
    /// An empty payload yields a value with every field unset. Unrecognized AD types are skipped.
    pub fn from_raw(data: &[u8]) -> Self {
        let mut adv = AdvertisementData::default();
        let mut has_full_name = false;

        for (ad_type, payload) in AdStructures::new(data) {
            match ad_type {
                AdType::FLAGS => {
                    if let Some(&flags) = payload.first() {
                        adv.connectable = Some(flags & CONNECTABLE_FLAG != 0);
                    }
                }
                AdType::INCOMPLETE_16_SERVICE_LIST | AdType::COMPLETE_16_SERVICE_LIST => {
                    adv.push_service_uuids(payload, 2)
                }
                AdType::INCOMPLETE_32_SERVICE_LIST | AdType::COMPLETE_32_SERVICE_LIST => {
                    adv.push_service_uuids(payload, 4)
                }
                AdType::INCOMPLETE_128_SERVICE_LIST | AdType::COMPLETE_128_SERVICE_LIST => {
                    adv.push_service_uuids(payload, 16)
                }
                AdType::SHORT_NAME if !has_full_name => {
                    adv.local_name = Some(String::from_utf8_lossy(payload).into_owned());
                }
                AdType::FULL_NAME => {
                    adv.local_name = Some(String::from_utf8_lossy(payload).into_owned());
                    has_full_name = true;
                }
                AdType::TX_POWER_LEVEL => {
                    if let Some(&level) = payload.first() {
                        adv.tx_power_level = Some(i32::from(level as i8));
                    }
                }
                AdType::SERVICE_DATA_16 => adv.insert_service_data(payload, 2),
                AdType::SERVICE_DATA_32 => adv.insert_service_data(payload, 4),
                AdType::SERVICE_DATA_128 => adv.insert_service_data(payload, 16),
                AdType::MANUFACTURER_SPECIFIC_DATA => {
                    if let [lo, hi, data @ ..] = payload {
                        adv.manufacturer_data.insert(u16::from_le_bytes([*lo, *hi]), data.to_vec());
                    } else {
                        warn!("manufacturer data too short for a company id ({} bytes)", payload.len());
                    }
                }
                _ => trace!("skipping AD type {:#04x}", ad_type.to_u8()),
            }
        }

        adv
    }

    /// Reads a scan record the platform has already parsed.
    ///
    /// `is_connectable` is the platform's direct connectable flag, where it has one. Without it, connectability is
    /// derived from the advertising flags. With no record at all, every field except `connectable` is unset.
    pub fn from_scan_record(record: Option<&dyn ScanRecord>, is_connectable: Option<bool>) -> Self {
        let mut adv = AdvertisementData {
            connectable: is_connectable,
            ..Default::default()
        };
        let Some(record) = record else {
            return adv;
        };

        if adv.connectable.is_none() {
            adv.connectable = record.advertise_flags().map(|flags| flags & CONNECTABLE_FLAG != 0);
        }

        adv.local_name = record.device_name();

        let tx_power_level = record.tx_power_level();
        if tx_power_level != TX_POWER_NOT_PRESENT {
            adv.tx_power_level = Some(tx_power_level);
        }

        for (company_id, data) in record.manufacturer_specific_data() {
            match u16::try_from(company_id) {
                Ok(company_id) => {
                    adv.manufacturer_data.insert(company_id, data);
                }
                Err(_) => warn!("dropping manufacturer data with out of range company id {}", company_id),
            }
        }

        for (uuid, data) in record.service_data() {
            adv.service_data.insert(uuid.to_string(), data);
        }

        if let Some(uuids) = record.service_uuids() {
            adv.service_uuids = uuids.iter().map(Uuid::to_string).collect();
        }

        adv
    }

    fn push_service_uuids(&mut self, payload: &[u8], uuid_len: usize) {
        let chunks = payload.chunks_exact(uuid_len);
        if !chunks.remainder().is_empty() {
            warn!(
                "service UUID list has {} trailing bytes for {}-byte UUIDs",
                chunks.remainder().len(),
                uuid_len
            );
        }
        for chunk in chunks {
            if let Ok(uuid) = Uuid::try_from_le_bytes(chunk) {
                self.service_uuids.push(uuid.to_string());
            }
        }
    }

    fn insert_service_data(&mut self, payload: &[u8], uuid_len: usize) {
        if payload.len() < uuid_len {
            warn!("service data too short for a {}-byte UUID ({} bytes)", uuid_len, payload.len());
            return;
        }
        let (uuid, data) = payload.split_at(uuid_len);
        if let Ok(uuid) = Uuid::try_from_le_bytes(uuid) {
            self.service_data.insert(uuid.to_string(), data.to_vec());
        }
    }
}
