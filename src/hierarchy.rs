//! Recovering the primary service that owns a secondary service.
//!
//! A characteristic knows only the service that directly owns it. When that service is a secondary service, the
//! primary service that includes it has to be found by searching the device's service tree. Services are matched
//! by [`Uuid`], never by identity, so the search works on reconstructed graphs as well as platform snapshots.

use crate::{Service, Uuid};

/// Returns the [`Uuid`] of the top-level service whose included services contain `target`, at any depth.
///
/// `services` are the device's top-level services in platform enumeration order. If several of them include
/// `target`, the first one in that order wins. Returns `None` if no top-level service includes `target`.
pub fn resolve_primary(services: &[Service], target: Uuid) -> Option<Uuid> {
    services
        .iter()
        .find(|service| includes(service, target))
        .map(Service::uuid)
}

/// Finds the first service with the given [`Uuid`] anywhere in the tree, searching depth-first in enumeration order.
pub fn find_service(services: &[Service], uuid: Uuid) -> Option<&Service> {
    services.iter().find_map(|service| {
        if service.uuid() == uuid {
            Some(service)
        } else {
            find_service(service.included_services(), uuid)
        }
    })
}

fn includes(service: &Service, target: Uuid) -> bool {
    service
        .included_services()
        .iter()
        .any(|included| included.uuid() == target || includes(included, target))
}
