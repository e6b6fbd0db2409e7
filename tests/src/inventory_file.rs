use std::path::Path;

use chrono::{TimeZone, Utc};
use invctl_common::error::InventoryError;
use invctl_common::inventory::node::Node;
use invctl_common::inventory::reservation::IpReservation;
use invctl_common::network::catalog::Network;
use invctl_common::ports::outbound::inventory_repository::InventoryRepository;
use invctl_common::ports::outbound::reservation_store::ReservationStore;
use invctl_core::claim::IpClaimArbiter;
use invctl_core::detection::detect_networks;
use invctl_core::merge::merge_interfaces;
use invctl_core::reservation;
use invctl_core::store::file::{InventoryDocument, InventoryFile};
use invctl_core::store::table::ReservationTable;
use tempfile::TempDir;

use super::util::{host_interfaces, ip, mac, networks, FakeInterfaces, NODE_ID};

fn seed(path: &Path, reservations: Vec<IpReservation>) {
    let document = InventoryDocument {
        networks: networks(),
        nodes: vec![Node::new(NODE_ID)],
        reservations: ReservationTable::try_from(reservations).unwrap(),
    };
    InventoryFile::with_document(path, document).save().unwrap();
}

#[test]
fn detected_networks_survive_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    seed(&path, Vec::new());

    let mut inventory = InventoryFile::open(&path).unwrap();
    let node = inventory.require_node(NODE_ID).unwrap();
    let detected = detect_networks(&FakeInterfaces(host_interfaces()), &inventory.catalog().unwrap()).unwrap();
    let (mut node, added) = merge_interfaces(node, &detected);
    assert_eq!(added, 1);

    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    node.touch(stamp);
    inventory.update_node(node).unwrap();
    inventory.save().unwrap();

    let reloaded = InventoryFile::open(&path).unwrap().require_node(NODE_ID).unwrap();
    assert!(reloaded.networks["mgmt"].nics.contains(&mac(1)));
    assert_eq!(reloaded.last_updated, Some(stamp));
}

#[test]
fn claim_through_file_persists_swap() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    seed(&path, vec![IpReservation::new(ip("10.0.0.9"), mac(1))]);

    let mut inventory = InventoryFile::open(&path).unwrap();
    let mut node = inventory.require_node(NODE_ID).unwrap();
    let detected = detect_networks(&FakeInterfaces(host_interfaces()), &inventory.catalog().unwrap()).unwrap();
    node = merge_interfaces(node, &detected).0;
    inventory.update_node(node.clone()).unwrap();

    let catalog = inventory.catalog().unwrap();
    IpClaimArbiter::new(&mut inventory)
        .claim(&node, &catalog, ip("10.0.0.50"))
        .unwrap();
    inventory.save().unwrap();

    let reloaded = InventoryFile::open(&path).unwrap();
    assert_eq!(reloaded.get_by_ip(ip("10.0.0.9")).unwrap(), None);
    let claimed = reloaded.get_by_ip(ip("10.0.0.50")).unwrap().unwrap();
    assert_eq!(claimed.mac, mac(1));
    assert!(!claimed.is_static());
}

#[test]
fn make_static_then_delete_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    let mut dynamic = IpReservation::new(ip("10.1.0.7"), mac(4));
    dynamic.end = Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
    seed(&path, vec![dynamic]);

    let mut inventory = InventoryFile::open(&path).unwrap();
    reservation::make_static(&mut inventory, ip("10.1.0.7")).unwrap();
    inventory.save().unwrap();

    let mut inventory = InventoryFile::open(&path).unwrap();
    assert!(reservation::show_reservation(&inventory, ip("10.1.0.7")).unwrap().is_static());
    reservation::release_reservation(&mut inventory, ip("10.1.0.7")).unwrap();
    inventory.save().unwrap();

    let inventory = InventoryFile::open(&path).unwrap();
    assert!(matches!(
        reservation::show_reservation(&inventory, ip("10.1.0.7")),
        Err(InventoryError::ReservationNotFound { .. })
    ));
}

#[test]
fn overlapping_catalog_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    let document = InventoryDocument {
        networks: vec![
            Network::new("mgmt", vec!["10.0.0.0/16".parse().unwrap()]),
            Network::new("data", vec!["10.0.5.0/24".parse().unwrap()]),
        ],
        ..InventoryDocument::default()
    };
    InventoryFile::with_document(&path, document).save().unwrap();

    let inventory = InventoryFile::open(&path).unwrap();
    assert!(matches!(
        inventory.catalog(),
        Err(InventoryError::OverlappingSubnets { .. })
    ));
}

#[test]
fn unknown_node_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    seed(&path, Vec::new());

    let inventory = InventoryFile::open(&path).unwrap();
    match inventory.require_node("node-9999") {
        Err(InventoryError::NodeNotFound { id }) => assert_eq!(id, "node-9999"),
        other => panic!("expected NodeNotFound, got {other:?}"),
    }
}
