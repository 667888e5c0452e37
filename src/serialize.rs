//! Conversion of platform entities into [`wire`] records.
//!
//! Two directions exist. [`ClientSerializer`] describes the attribute table of a *remote* device: every record
//! carries the device identifier, and the primary owner of a characteristic inside an included service is found by
//! searching the device's service tree. The `hosted_*` functions describe services hosted by the local GATT server:
//! no device identifier is set, and the owner is taken from the graph's own parent links.

use tracing::{debug, warn};

use crate::error::{Error, ErrorKind};
use crate::wire::{self, AdvertisementData};
use crate::{hierarchy, Characteristic, Descriptor, Device, Result, ScanRecord, Service, ServiceRef, Uuid};

/// What to do when the primary service owning a characteristic cannot be found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OwnerPolicy {
    /// Leave the service fields of the characteristic record unset and log a warning.
    #[default]
    Omit,
    /// Fail the conversion with [`NotFound`][ErrorKind::NotFound].
    Fail,
}

/// Serializes the attribute table of a remote device.
#[derive(Debug, Clone, Copy)]
pub struct ClientSerializer<'a> {
    device: &'a Device,
    services: &'a [Service],
    policy: OwnerPolicy,
}

impl<'a> ClientSerializer<'a> {
    /// Creates a serializer for `device`, whose top-level services in platform enumeration order are `services`.
    pub fn new(device: &'a Device, services: &'a [Service]) -> Self {
        ClientSerializer {
            device,
            services,
            policy: OwnerPolicy::default(),
        }
    }

    /// Sets the policy for characteristics whose primary owner cannot be found.
    pub fn with_policy(mut self, policy: OwnerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Serializes the device itself.
    pub fn device(&self) -> wire::BluetoothDevice {
        device(self.device)
    }

    /// Serializes a service with its characteristics and, nested by value, its included services.
    ///
    /// With [`OwnerPolicy::Fail`] the first characteristic whose owner cannot be resolved fails the whole service.
    pub fn service(&self, service: &Service) -> Result<wire::BluetoothService> {
        debug!("serializing service {} of {}", service.uuid(), self.device);
        Ok(wire::BluetoothService {
            remote_id: Some(self.remote_id()),
            uuid: service.uuid().to_string(),
            is_primary: service.is_primary(),
            characteristics: service
                .characteristics()
                .iter()
                .map(|c| self.characteristic(c))
                .collect::<Result<_>>()?,
            included_services: service
                .included_services()
                .iter()
                .map(|s| self.service(s))
                .collect::<Result<_>>()?,
        })
    }

    /// Serializes a characteristic and its descriptors.
    ///
    /// If the characteristic's owner is a primary service, only `service_uuid` is set. If it is a secondary
    /// service, `service_uuid` is set to the primary service including it and `secondary_service_uuid` to the
    /// owner itself.
    pub fn characteristic(&self, characteristic: &Characteristic) -> Result<wire::BluetoothCharacteristic> {
        let mut record = characteristic_record(Some(self.remote_id()), characteristic);
        record.descriptors = characteristic
            .descriptors()
            .iter()
            .map(|d| self.descriptor(d))
            .collect();

        match characteristic.service() {
            Some(owner) if owner.kind.is_primary() => {
                record.service_uuid = Some(owner.uuid.to_string());
            }
            Some(owner) => match hierarchy::resolve_primary(self.services, owner.uuid) {
                Some(primary) => {
                    record.service_uuid = Some(primary.to_string());
                    record.secondary_service_uuid = Some(owner.uuid.to_string());
                }
                None => self.unresolved(characteristic, Some(owner))?,
            },
            None => self.unresolved(characteristic, None)?,
        }

        Ok(record)
    }

    /// Serializes a descriptor. The service UUID is that of the service directly owning the characteristic.
    pub fn descriptor(&self, descriptor: &Descriptor) -> wire::BluetoothDescriptor {
        descriptor_record(Some(self.remote_id()), descriptor)
    }

    fn remote_id(&self) -> String {
        self.device.id().to_string()
    }

    fn unresolved(&self, characteristic: &Characteristic, owner: Option<ServiceRef>) -> Result<()> {
        let message = match owner {
            Some(owner) => format!(
                "no service of {} includes {}, the owner of characteristic {}",
                self.device,
                owner.uuid,
                characteristic.uuid()
            ),
            None => format!("characteristic {} is not attached to a service", characteristic.uuid()),
        };
        match self.policy {
            OwnerPolicy::Omit => {
                warn!("{}", message);
                Ok(())
            }
            OwnerPolicy::Fail => Err(Error::new(ErrorKind::NotFound, None, message)),
        }
    }
}

/// Serializes a remote device.
pub fn device(device: &Device) -> wire::BluetoothDevice {
    wire::BluetoothDevice {
        remote_id: device.id().to_string(),
        name: device.name().map(str::to_owned),
        device_type: device.device_type(),
    }
}

/// Serializes a connection state change reported with the platform state code `state`.
pub fn device_state(device: &Device, state: i32) -> wire::DeviceStateResponse {
    wire::DeviceStateResponse {
        remote_id: device.id().to_string(),
        state: state.into(),
    }
}

/// Builds a scan result from a raw advertising payload.
pub fn scan_result_from_raw(device: &Device, advertisement: Option<&[u8]>, rssi: i32) -> wire::ScanResult {
    wire::ScanResult {
        device: self::device(device),
        advertisement_data: advertisement.map(AdvertisementData::from_raw).unwrap_or_default(),
        rssi,
    }
}

/// Builds a scan result from a scan record the platform has already parsed.
///
/// `is_connectable` is the platform's direct connectable flag, where it has one.
pub fn scan_result_from_record(
    device: &Device,
    record: Option<&dyn ScanRecord>,
    is_connectable: Option<bool>,
    rssi: i32,
) -> wire::ScanResult {
    wire::ScanResult {
        device: self::device(device),
        advertisement_data: AdvertisementData::from_scan_record(record, is_connectable),
        rssi,
    }
}

/// Serializes a service hosted by the local GATT server.
///
/// The service is taken as top-level: characteristics of a secondary service passed here name it as both the
/// service and the secondary service. Use [`hosted_included_service`] when the including primary is known.
pub fn hosted_service(service: &Service) -> wire::BluetoothService {
    hosted_service_within(service, None)
}

/// Serializes a service hosted by the local GATT server that sits, at any depth, under the top-level service
/// `primary`.
pub fn hosted_included_service(service: &Service, primary: Uuid) -> wire::BluetoothService {
    hosted_service_within(service, Some(primary))
}

fn hosted_service_within(service: &Service, primary: Option<Uuid>) -> wire::BluetoothService {
    let primary = primary.unwrap_or_else(|| service.uuid());
    wire::BluetoothService {
        remote_id: None,
        uuid: service.uuid().to_string(),
        is_primary: service.is_primary(),
        characteristics: service
            .characteristics()
            .iter()
            .map(|c| hosted_characteristic(c, Some(primary)))
            .collect(),
        included_services: service
            .included_services()
            .iter()
            .map(|s| hosted_service_within(s, Some(primary)))
            .collect(),
    }
}

/// Serializes a characteristic hosted by the local GATT server.
///
/// `primary` is the top-level service the characteristic's owner sits under. It is used only when the owner is a
/// secondary service; without it, a secondary owner is reported as both the service and the secondary service.
pub fn hosted_characteristic(characteristic: &Characteristic, primary: Option<Uuid>) -> wire::BluetoothCharacteristic {
    let mut record = characteristic_record(None, characteristic);
    record.descriptors = characteristic
        .descriptors()
        .iter()
        .map(|d| descriptor_record(None, d))
        .collect();

    match characteristic.service() {
        Some(owner) if owner.kind.is_primary() => {
            record.service_uuid = Some(owner.uuid.to_string());
        }
        Some(owner) => {
            record.service_uuid = Some(primary.unwrap_or(owner.uuid).to_string());
            record.secondary_service_uuid = Some(owner.uuid.to_string());
        }
        None => debug!("hosted characteristic {} has no owning service", characteristic.uuid()),
    }

    record
}

fn characteristic_record(remote_id: Option<String>, characteristic: &Characteristic) -> wire::BluetoothCharacteristic {
    wire::BluetoothCharacteristic {
        remote_id,
        uuid: characteristic.uuid().to_string(),
        properties: characteristic.properties(),
        value: characteristic.value().map(<[u8]>::to_vec),
        ..Default::default()
    }
}

fn descriptor_record(remote_id: Option<String>, descriptor: &Descriptor) -> wire::BluetoothDescriptor {
    wire::BluetoothDescriptor {
        remote_id,
        uuid: descriptor.uuid().to_string(),
        service_uuid: descriptor.service_uuid().to_string(),
        characteristic_uuid: descriptor.characteristic_uuid().to_string(),
        value: descriptor.value().map(<[u8]>::to_vec),
    }
}
