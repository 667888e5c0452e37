mod common;

use common::{SECONDARY, SECONDARY_VALUE};
use gattwire::btuuid::{characteristics, descriptors, services};
use gattwire::error::ErrorKind;
use gattwire::serialize::{self, ClientSerializer, OwnerPolicy};
use gattwire::{
    reconstruct, wire, Characteristic, ConnectionState, Descriptor, Device, DeviceType, Service, ServiceKind,
    ServiceRef, Uuid,
};

#[test]
fn device_copies_identity() {
    let record = serialize::device(&common::device());
    assert_eq!(
        record,
        wire::BluetoothDevice {
            remote_id: "AB:CD:EF:01:23:45".into(),
            name: Some("sensor".into()),
            device_type: DeviceType::Le,
        }
    );

    let unnamed = Device::from_platform("00:11:22:33:44:55", None, 42);
    let record = serialize::device(&unnamed);
    assert_eq!(record.name, None);
    assert_eq!(record.device_type, DeviceType::Unknown);
}

#[test]
fn device_type_codes_are_total() {
    assert_eq!(DeviceType::from(1), DeviceType::Classic);
    assert_eq!(DeviceType::from(2), DeviceType::Le);
    assert_eq!(DeviceType::from(3), DeviceType::Dual);
    for code in [0, -1, 4, i32::MAX, i32::MIN] {
        assert_eq!(DeviceType::from(code), DeviceType::Unknown);
    }
    assert_eq!(ServiceKind::from(0), ServiceKind::Primary);
    assert_eq!(ServiceKind::from(1), ServiceKind::Secondary);
    assert_eq!(ServiceKind::from(7), ServiceKind::Secondary);
}

#[test]
fn device_state_maps_profile_codes() {
    let device = common::device();
    let states: Vec<_> = [0, 1, 2, 3, 9]
        .into_iter()
        .map(|code| serialize::device_state(&device, code).state)
        .collect();
    assert_eq!(
        states,
        vec![
            ConnectionState::Disconnected,
            ConnectionState::Connecting,
            ConnectionState::Connected,
            ConnectionState::Disconnecting,
            ConnectionState::Unknown,
        ]
    );
    assert_eq!(serialize::device_state(&device, 2).remote_id, "AB:CD:EF:01:23:45");
}

#[test]
fn characteristic_in_included_service_names_primary_and_secondary() {
    common::init_tracing();
    let device = common::device();
    let tree = common::tree();
    let serializer = ClientSerializer::new(&device, &tree);

    let secondary = &tree[0].included_services()[0];
    let record = serializer.characteristic(&secondary.characteristics()[0]).unwrap();

    assert_eq!(record.uuid, SECONDARY_VALUE.to_string());
    assert_eq!(record.service_uuid, Some(services::HEART_RATE.to_string()));
    assert_eq!(record.secondary_service_uuid, Some(SECONDARY.to_string()));
    assert_eq!(record.remote_id.as_deref(), Some("AB:CD:EF:01:23:45"));
    assert_eq!(record.value, Some(vec![7, 8, 9]));
    assert!(record.properties.read && record.properties.write);
}

#[test]
fn characteristic_in_primary_service_names_only_the_service() {
    let device = common::device();
    let tree = common::tree();
    let serializer = ClientSerializer::new(&device, &tree);

    let record = serializer.characteristic(&tree[1].characteristics()[0]).unwrap();
    assert_eq!(record.service_uuid, Some(services::BATTERY.to_string()));
    assert_eq!(record.secondary_service_uuid, None);
    assert_eq!(record.value, Some(vec![]));
}

#[test]
fn absent_value_stays_absent() {
    let device = common::device();
    let tree = common::tree();
    let record = ClientSerializer::new(&device, &tree)
        .characteristic(&tree[0].characteristics()[0])
        .unwrap();
    assert_eq!(record.value, None);
}

#[test]
fn descriptors_carry_their_direct_owners() {
    let device = common::device();
    let tree = common::tree();
    let record = ClientSerializer::new(&device, &tree)
        .characteristic(&tree[0].characteristics()[0])
        .unwrap();

    assert_eq!(
        record.descriptors,
        vec![wire::BluetoothDescriptor {
            remote_id: Some("AB:CD:EF:01:23:45".into()),
            uuid: descriptors::CLIENT_CHARACTERISTIC_CONFIGURATION.to_string(),
            service_uuid: services::HEART_RATE.to_string(),
            characteristic_uuid: characteristics::HEART_RATE_MEASUREMENT.to_string(),
            value: Some(vec![0x01, 0x00]),
        }]
    );

    let bare = Descriptor::with_owners(
        descriptors::CHARACTERISTIC_USER_DESCRIPTION,
        SECONDARY_VALUE,
        SECONDARY,
    );
    let record = ClientSerializer::new(&device, &tree).descriptor(&bare);
    assert_eq!(record.service_uuid, SECONDARY.to_string());
    assert_eq!(record.value, None);
}

#[test]
fn service_nests_included_services() {
    let device = common::device();
    let tree = common::tree();
    let record = ClientSerializer::new(&device, &tree).service(&tree[0]).unwrap();

    assert!(record.is_primary);
    assert_eq!(record.uuid, services::HEART_RATE.to_string());
    assert_eq!(record.characteristics.len(), 1);
    assert_eq!(record.included_services.len(), 1);

    let included = &record.included_services[0];
    assert!(!included.is_primary);
    assert_eq!(included.remote_id.as_deref(), Some("AB:CD:EF:01:23:45"));
    assert_eq!(
        included.characteristics[0].service_uuid,
        Some(services::HEART_RATE.to_string())
    );
    assert_eq!(included.characteristics[0].secondary_service_uuid, Some(SECONDARY.to_string()));
}

#[test]
fn first_including_primary_wins() {
    let mut first = Service::new(services::GENERIC_ACCESS, ServiceKind::Primary);
    first.add_included_service(Service::new(SECONDARY, ServiceKind::Secondary));
    let mut second = Service::new(services::DEVICE_INFORMATION, ServiceKind::Primary);
    second.add_included_service(Service::new(SECONDARY, ServiceKind::Secondary));
    let tree = vec![first, second];

    let device = common::device();
    let characteristic = Characteristic::new(SECONDARY_VALUE, 0x02).with_service(ServiceRef {
        uuid: SECONDARY,
        kind: ServiceKind::Secondary,
    });
    let record = ClientSerializer::new(&device, &tree)
        .characteristic(&characteristic)
        .unwrap();
    assert_eq!(record.service_uuid, Some(services::GENERIC_ACCESS.to_string()));
}

#[test]
fn owner_resolves_through_nested_includes() {
    common::init_tracing();
    let nested = Uuid::from_u128(0x6e400003_b5a3_f393_e0a9_e50e24dcca9e);

    let mut inner = Service::new(nested, ServiceKind::Secondary);
    inner.add_characteristic(Characteristic::new(SECONDARY_VALUE, 0x02).with_value(vec![1]));
    let mut outer = Service::new(SECONDARY, ServiceKind::Secondary);
    outer.add_included_service(inner);
    let mut heart_rate = Service::new(services::HEART_RATE, ServiceKind::Primary);
    heart_rate.add_included_service(outer);
    let tree = vec![heart_rate];

    let device = common::device();
    let record = ClientSerializer::new(&device, &tree).service(&tree[0]).unwrap();
    let client = &record.included_services[0].included_services[0].characteristics[0];
    assert_eq!(client.service_uuid, Some(services::HEART_RATE.to_string()));
    assert_eq!(client.secondary_service_uuid, Some(nested.to_string()));

    let rebuilt = reconstruct::service(&record).unwrap();
    let hosted = serialize::hosted_service(&rebuilt);
    let hosted = &hosted.included_services[0].included_services[0].characteristics[0];
    assert_eq!(hosted.service_uuid, Some(services::HEART_RATE.to_string()));
    assert_eq!(hosted.secondary_service_uuid, Some(nested.to_string()));
}

#[test]
fn unresolved_owner_follows_policy() {
    common::init_tracing();
    let device = common::device();
    let tree = vec![Service::new(services::BATTERY, ServiceKind::Primary)];
    let orphan = Characteristic::new(SECONDARY_VALUE, 0x02).with_service(ServiceRef {
        uuid: SECONDARY,
        kind: ServiceKind::Secondary,
    });

    let record = ClientSerializer::new(&device, &tree).characteristic(&orphan).unwrap();
    assert_eq!(record.service_uuid, None);
    assert_eq!(record.secondary_service_uuid, None);

    let err = ClientSerializer::new(&device, &tree)
        .with_policy(OwnerPolicy::Fail)
        .characteristic(&orphan)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let detached = Characteristic::new(SECONDARY_VALUE, 0x02);
    let err = ClientSerializer::new(&device, &tree)
        .with_policy(OwnerPolicy::Fail)
        .characteristic(&detached)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn hosted_records_have_no_remote_id() {
    let tree = common::tree();
    let record = serialize::hosted_service(&tree[0]);

    assert_eq!(record.remote_id, None);
    assert_eq!(record.characteristics[0].remote_id, None);
    assert_eq!(record.characteristics[0].descriptors[0].remote_id, None);

    let included = &record.included_services[0].characteristics[0];
    assert_eq!(included.service_uuid, Some(services::HEART_RATE.to_string()));
    assert_eq!(included.secondary_service_uuid, Some(SECONDARY.to_string()));
}

#[test]
fn hosted_secondary_without_primary_names_itself() {
    let tree = common::tree();
    let secondary = &tree[0].included_services()[0];
    let record = serialize::hosted_service(secondary);

    let characteristic = &record.characteristics[0];
    assert_eq!(characteristic.service_uuid, Some(SECONDARY.to_string()));
    assert_eq!(characteristic.secondary_service_uuid, Some(SECONDARY.to_string()));
}

#[test]
fn hosted_secondary_under_known_primary() {
    let tree = common::tree();
    let secondary = &tree[0].included_services()[0];
    let record = serialize::hosted_included_service(secondary, services::HEART_RATE);

    assert!(!record.is_primary);
    let characteristic = &record.characteristics[0];
    assert_eq!(characteristic.service_uuid, Some(services::HEART_RATE.to_string()));
    assert_eq!(characteristic.secondary_service_uuid, Some(SECONDARY.to_string()));
}

#[test]
fn descriptor_takes_owners_on_attach() {
    let descriptor = Descriptor::new(descriptors::CHARACTERISTIC_USER_DESCRIPTION);
    assert_eq!(descriptor.characteristic_uuid(), Uuid::nil());
    assert_eq!(descriptor.service_uuid(), Uuid::nil());

    let mut characteristic = Characteristic::new(SECONDARY_VALUE, 0x02);
    characteristic.add_descriptor(descriptor);
    let mut service = Service::new(SECONDARY, ServiceKind::Secondary);
    service.add_characteristic(characteristic);

    let attached = &service.characteristics()[0].descriptors()[0];
    assert_eq!(attached.characteristic_uuid(), SECONDARY_VALUE);
    assert_eq!(attached.service_uuid(), SECONDARY);
}

#[test]
fn scan_results_from_both_shapes() {
    let device = common::device();

    let record = serialize::scan_result_from_raw(&device, None, -60);
    assert_eq!(record.rssi, -60);
    assert_eq!(record.device.remote_id, "AB:CD:EF:01:23:45");
    assert_eq!(record.advertisement_data, wire::AdvertisementData::default());

    let record = serialize::scan_result_from_raw(&device, Some(&[0x02, 0x0a, 0x00]), -70);
    assert_eq!(record.advertisement_data.tx_power_level, Some(0));

    let record = serialize::scan_result_from_record(&device, None, Some(true), -80);
    assert_eq!(record.advertisement_data.connectable, Some(true));
    assert_eq!(record.rssi, -80);
}

#[cfg(feature = "serde")]
#[test]
fn unset_fields_survive_serde() {
    let adv = wire::AdvertisementData {
        tx_power_level: Some(0),
        ..Default::default()
    };
    let json = serde_json::to_string(&adv).unwrap();
    let back: wire::AdvertisementData = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tx_power_level, Some(0));
    assert_eq!(back.local_name, None);

    let unset: wire::AdvertisementData =
        serde_json::from_str(&serde_json::to_string(&wire::AdvertisementData::default()).unwrap()).unwrap();
    assert_eq!(unset.tx_power_level, None);
}
