use crate::{Characteristic, ServiceKind, ServiceRef, Uuid};

/// A GATT service, owning its characteristics and the services it includes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Service {
    uuid: Uuid,
    kind: ServiceKind,
    characteristics: Vec<Characteristic>,
    included_services: Vec<Service>,
}

impl Service {
    /// Creates an empty service.
    pub fn new(uuid: Uuid, kind: ServiceKind) -> Self {
        Service {
            uuid,
            kind,
            characteristics: Vec::new(),
            included_services: Vec::new(),
        }
    }

    /// Creates an empty service from the raw platform service type code.
    pub fn from_platform(uuid: Uuid, type_code: i32) -> Self {
        Service::new(uuid, ServiceKind::from(type_code))
    }

    /// Attaches a characteristic, pointing its back-reference at this service.
    pub fn add_characteristic(&mut self, mut characteristic: Characteristic) {
        characteristic.set_service(self.service_ref());
        self.characteristics.push(characteristic);
    }

    /// Attaches an included service.
    pub fn add_included_service(&mut self, service: Service) {
        self.included_services.push(service);
    }

    /// The back-reference characteristics of this service carry.
    pub fn service_ref(&self) -> ServiceRef {
        ServiceRef {
            uuid: self.uuid,
            kind: self.kind,
        }
    }

    /// The [`Uuid`] identifying the type of this GATT service
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Whether this service is primary or secondary
    #[inline]
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Whether this is a primary service of the device.
    #[inline]
    pub fn is_primary(&self) -> bool {
        self.kind.is_primary()
    }

    /// The characteristics of this service, in platform order
    #[inline]
    pub fn characteristics(&self) -> &[Characteristic] {
        &self.characteristics
    }

    /// The services included by this service, in platform order
    #[inline]
    pub fn included_services(&self) -> &[Service] {
        &self.included_services
    }

    /// Finds the first characteristic with the given [`Uuid`], searching this service before its included
    /// services.
    pub fn find_characteristic(&self, uuid: Uuid) -> Option<&Characteristic> {
        self.characteristics.iter().find(|c| c.uuid() == uuid).or_else(|| {
            self.included_services
                .iter()
                .find_map(|service| service.find_characteristic(uuid))
        })
    }
}
