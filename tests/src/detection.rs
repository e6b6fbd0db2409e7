use invctl_common::error::{EnumerationError, InventoryError};
use invctl_common::inventory::node::Node;
use invctl_common::network::mac::HardwareAddressSet;
use invctl_core::detection::detect_networks;
use invctl_core::merge::merge_interfaces;

use super::util::{catalog, host_interfaces, mac, ni, node_on, BrokenInterfaces, FakeInterfaces, NODE_ID};

#[test]
fn detects_mgmt_from_single_interface() {
    let enumerator = FakeInterfaces(vec![ni("eno1", Some(mac(1)), &["10.0.0.5/24"])]);
    let detected = detect_networks(&enumerator, &catalog()).unwrap();

    assert_eq!(detected.len(), 1);
    assert_eq!(detected["mgmt"].members(), vec![mac(1)]);
}

#[test]
fn unknown_and_loopback_interfaces_are_left_out() {
    let detected = detect_networks(&FakeInterfaces(host_interfaces()), &catalog()).unwrap();
    assert_eq!(detected.keys().collect::<Vec<_>>(), vec!["mgmt"]);
}

#[test]
fn detection_is_repeatable() {
    let enumerator = FakeInterfaces(host_interfaces());
    let first = detect_networks(&enumerator, &catalog()).unwrap();
    let second = detect_networks(&enumerator, &catalog()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn enumeration_failure_yields_no_result() {
    let result = detect_networks(&BrokenInterfaces, &catalog());
    assert!(matches!(
        result,
        Err(InventoryError::Enumeration(EnumerationError::Interfaces(_)))
    ));
}

#[test]
fn merge_of_already_known_address_adds_nothing() {
    let node = node_on("mgmt", &[1]);
    let detected = detect_networks(&FakeInterfaces(host_interfaces()), &catalog()).unwrap();

    let (merged, added) = merge_interfaces(node.clone(), &detected);
    assert_eq!(added, 0);
    assert_eq!(merged, node);
}

#[test]
fn merge_of_second_nic_grows_record() {
    let mut interfaces = host_interfaces();
    interfaces.push(ni("eno2", Some(mac(2)), &["10.0.0.6/24"]));
    let detected = detect_networks(&FakeInterfaces(interfaces), &catalog()).unwrap();

    let (merged, added) = merge_interfaces(node_on("mgmt", &[1]), &detected);
    assert_eq!(added, 1);
    let expected: HardwareAddressSet = [mac(1), mac(2)].into_iter().collect();
    assert_eq!(merged.networks["mgmt"].nics, expected);
}

#[test]
fn merge_keeps_addresses_no_longer_observed() {
    let detected = detect_networks(&FakeInterfaces(vec![ni("eno2", Some(mac(2)), &["10.1.0.6/24"])]), &catalog()).unwrap();

    let (merged, added) = merge_interfaces(node_on("mgmt", &[1]), &detected);
    assert_eq!(added, 1);
    assert!(merged.networks["mgmt"].nics.contains(&mac(1)));
    assert!(merged.networks["data"].nics.contains(&mac(2)));
}

#[test]
fn merge_twice_is_idempotent() {
    let detected = detect_networks(&FakeInterfaces(host_interfaces()), &catalog()).unwrap();
    let (once, first_added) = merge_interfaces(Node::new(NODE_ID), &detected);
    let (twice, second_added) = merge_interfaces(once.clone(), &detected);

    assert_eq!(first_added, 1);
    assert_eq!(second_added, 0);
    assert_eq!(once, twice);
}
