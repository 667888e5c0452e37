//! Rebuilding an attribute graph from [`wire`] records, for hosting on the local GATT server.
//!
//! Descriptors are not rebuilt: a reconstructed characteristic has no descriptors, whatever its record carried.
//!
//! The permissions of a reconstructed characteristic are the [encoded length][crate::CharacteristicProperties::encoded_len]
//! of its properties message, which is what existing peers produce. This is not a meaningful set of attribute
//! permissions; hosts that need real permissions must set them from their own configuration.

use tracing::debug;

use crate::error::Error;
use crate::{wire, Characteristic, Result, Service, ServiceKind, Uuid};

/// Rebuilds a characteristic from its record.
///
/// Fails with [`InvalidUuid`][crate::error::ErrorKind::InvalidUuid] if the record's UUID does not parse.
pub fn characteristic(record: &wire::BluetoothCharacteristic) -> Result<Characteristic> {
    let uuid = parse_uuid(&record.uuid)?;
    let characteristic =
        Characteristic::new(uuid, record.properties.to_bits()).with_permissions(record.properties.encoded_len() as u16);
    Ok(match &record.value {
        Some(value) => characteristic.with_value(value.clone()),
        None => characteristic,
    })
}

/// Rebuilds a service, its included services and its characteristics from a record.
///
/// The first malformed UUID anywhere in the record fails the whole service. See [`service_lenient`] to skip
/// malformed entities instead.
pub fn service(record: &wire::BluetoothService) -> Result<Service> {
    let mut service = Service::new(parse_uuid(&record.uuid)?, service_kind(record));
    for included in &record.included_services {
        service.add_included_service(self::service(included)?);
    }
    for characteristic in &record.characteristics {
        service.add_characteristic(self::characteristic(characteristic)?);
    }
    Ok(service)
}

/// Rebuilds a service from a record, skipping any included service or characteristic whose UUID is malformed.
///
/// Returns the service together with the errors for the entities that were skipped. Fails only if the UUID of the
/// service itself is malformed.
pub fn service_lenient(record: &wire::BluetoothService) -> Result<(Service, Vec<Error>)> {
    let mut service = Service::new(parse_uuid(&record.uuid)?, service_kind(record));
    let mut skipped = Vec::new();

    for included in &record.included_services {
        match service_lenient(included) {
            Ok((included, errors)) => {
                service.add_included_service(included);
                skipped.extend(errors);
            }
            Err(err) => {
                debug!("skipping included service of {}: {}", service.uuid(), err);
                skipped.push(err);
            }
        }
    }
    for characteristic in &record.characteristics {
        match self::characteristic(characteristic) {
            Ok(characteristic) => service.add_characteristic(characteristic),
            Err(err) => {
                debug!("skipping characteristic of {}: {}", service.uuid(), err);
                skipped.push(err);
            }
        }
    }

    Ok((service, skipped))
}

fn service_kind(record: &wire::BluetoothService) -> ServiceKind {
    if record.is_primary {
        ServiceKind::Primary
    } else {
        ServiceKind::Secondary
    }
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|err| Error::invalid_uuid(value, err))
}
