use crate::error::{Error, ErrorKind};
use crate::{CharacteristicProperties, Descriptor, Result, ServiceKind, Uuid};

/// Back-reference from a characteristic to the service that directly owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceRef {
    /// The owning service's [`Uuid`]
    pub uuid: Uuid,
    /// Whether the owning service is primary or secondary
    pub kind: ServiceKind,
}

/// A GATT characteristic
///
/// The properties are kept as the raw platform bitmask; use [`Characteristic::properties`] for the decoded flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Characteristic {
    uuid: Uuid,
    properties: u16,
    permissions: u16,
    value: Option<Vec<u8>>,
    descriptors: Vec<Descriptor>,
    pub(crate) service: Option<ServiceRef>,
}

impl Characteristic {
    /// Creates a characteristic with the given raw properties bitmask and no owning service.
    pub fn new(uuid: Uuid, properties: u16) -> Self {
        Characteristic {
            uuid,
            properties,
            permissions: 0,
            value: None,
            descriptors: Vec::new(),
            service: None,
        }
    }

    /// Sets the raw attribute permissions.
    pub fn with_permissions(mut self, permissions: u16) -> Self {
        self.permissions = permissions;
        self
    }

    /// Sets the cached value.
    pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Records the service that directly owns this characteristic.
    ///
    /// [`Service::add_characteristic`][crate::Service::add_characteristic] does this automatically; this is for
    /// snapshots of platform objects that already know their owner.
    pub fn with_service(mut self, service: ServiceRef) -> Self {
        self.set_service(service);
        self
    }

    /// Attaches a descriptor, pointing its back-references at this characteristic and its service.
    pub fn add_descriptor(&mut self, mut descriptor: Descriptor) {
        descriptor.characteristic_uuid = self.uuid;
        if let Some(service) = self.service {
            descriptor.service_uuid = service.uuid;
        }
        self.descriptors.push(descriptor);
    }

    pub(crate) fn set_service(&mut self, service: ServiceRef) {
        self.service = Some(service);
        for descriptor in &mut self.descriptors {
            descriptor.service_uuid = service.uuid;
        }
    }

    /// The [`Uuid`] identifying the type of this GATT characteristic
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The decoded properties of this characteristic
    #[inline]
    pub fn properties(&self) -> CharacteristicProperties {
        CharacteristicProperties::from_bits(self.properties)
    }

    /// The raw properties bitmask as reported by the platform
    #[inline]
    pub fn properties_bits(&self) -> u16 {
        self.properties
    }

    /// The raw attribute permissions
    #[inline]
    pub fn permissions(&self) -> u16 {
        self.permissions
    }

    /// The cached value of this characteristic, if one has been read or set
    #[inline]
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// The descriptors of this characteristic, in platform order
    #[inline]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// The service that directly owns this characteristic, if it is attached to one
    #[inline]
    pub fn service(&self) -> Option<ServiceRef> {
        self.service
    }

    /// The part of the cached value starting at `offset`, as a GATT server sends it in a read response.
    ///
    /// An absent value reads as empty. An `offset` past the end of the value is an
    /// [`InvalidOffset`][ErrorKind::InvalidOffset] error.
    pub fn read_at(&self, offset: usize) -> Result<&[u8]> {
        let value = self.value().unwrap_or_default();
        value.get(offset..).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOffset,
                None,
                format!("offset {offset} past end of {}-byte value of {}", value.len(), self.uuid),
            )
        })
    }
}
