use crate::Uuid;

/// A GATT descriptor, with the UUIDs of the characteristic and service that own it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    uuid: Uuid,
    value: Option<Vec<u8>>,
    pub(crate) characteristic_uuid: Uuid,
    pub(crate) service_uuid: Uuid,
}

impl Descriptor {
    /// Creates a descriptor not yet attached to a characteristic.
    ///
    /// Its owner UUIDs are nil until [`Characteristic::add_descriptor`][crate::Characteristic::add_descriptor]
    /// sets them.
    pub fn new(uuid: Uuid) -> Self {
        Descriptor::with_owners(uuid, Uuid::nil(), Uuid::nil())
    }

    /// Creates a descriptor owned by the characteristic `characteristic_uuid` of the service `service_uuid`.
    pub fn with_owners(uuid: Uuid, characteristic_uuid: Uuid, service_uuid: Uuid) -> Self {
        Descriptor {
            uuid,
            value: None,
            characteristic_uuid,
            service_uuid,
        }
    }

    /// Sets the cached value of this descriptor.
    pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The [`Uuid`] identifying the type of this GATT descriptor
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The cached value of this descriptor, if one has been read or set
    #[inline]
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// The [`Uuid`] of the characteristic this descriptor belongs to
    #[inline]
    pub fn characteristic_uuid(&self) -> Uuid {
        self.characteristic_uuid
    }

    /// The [`Uuid`] of the service that directly owns this descriptor's characteristic
    #[inline]
    pub fn service_uuid(&self) -> Uuid {
        self.service_uuid
    }
}
