use invctl_common::error::InventoryError;
use invctl_common::inventory::reservation::IpReservation;
use invctl_common::ports::outbound::reservation_store::ReservationStore;
use invctl_core::claim::IpClaimArbiter;
use invctl_core::selection::Preferred;
use invctl_core::store::table::ReservationTable;

use super::util::{catalog, ip, mac, node_on};

#[test]
fn claim_moves_reservation_within_subnet() {
    let mut store = ReservationTable::try_from(vec![IpReservation::new(ip("10.0.0.9"), mac(1))]).unwrap();
    let outcome = IpClaimArbiter::new(&mut store)
        .claim(&node_on("mgmt", &[1]), &catalog(), ip("10.0.0.50"))
        .unwrap();

    assert_eq!(outcome.reservation.ip, ip("10.0.0.50"));
    assert_eq!(outcome.reservation.mac, mac(1));
    assert_eq!(outcome.released, vec![IpReservation::new(ip("10.0.0.9"), mac(1))]);
    assert_eq!(store.get_by_ip(ip("10.0.0.9")).unwrap(), None);
}

#[test]
fn claim_outside_connected_networks_changes_nothing() {
    let before = ReservationTable::try_from(vec![IpReservation::new(ip("10.0.0.9"), mac(1))]).unwrap();
    let mut store = before.clone();
    let result = IpClaimArbiter::new(&mut store).claim(&node_on("mgmt", &[1]), &catalog(), ip("192.168.9.9"));

    assert!(matches!(result, Err(InventoryError::NoMatchingNetwork { .. })));
    assert_eq!(store, before);
}

#[test]
fn claim_of_subnet_on_unconnected_network_is_rejected() {
    let mut store = ReservationTable::default();
    let result = IpClaimArbiter::new(&mut store).claim(&node_on("mgmt", &[1]), &catalog(), ip("10.1.0.20"));
    assert!(matches!(result, Err(InventoryError::NoMatchingNetwork { .. })));
}

#[test]
fn claim_of_reserved_ip_changes_nothing() {
    let before = ReservationTable::try_from(vec![
        IpReservation::new(ip("10.0.0.9"), mac(1)),
        IpReservation::new(ip("10.0.0.50"), mac(3)),
    ]).unwrap();
    let mut store = before.clone();
    let result = IpClaimArbiter::new(&mut store).claim(&node_on("mgmt", &[1]), &catalog(), ip("10.0.0.50"));

    assert!(matches!(result, Err(InventoryError::AlreadyReserved { .. })));
    assert_eq!(store, before);
}

#[test]
fn reclaiming_own_ip_is_already_reserved() {
    let mut store = ReservationTable::default();
    let node = node_on("mgmt", &[1]);
    IpClaimArbiter::new(&mut store).claim(&node, &catalog(), ip("10.0.0.50")).unwrap();

    let again = IpClaimArbiter::new(&mut store).claim(&node, &catalog(), ip("10.0.0.50"));
    assert!(matches!(again, Err(InventoryError::AlreadyReserved { .. })));
}

#[test]
fn claiming_address_holds_one_reservation_per_subnet() {
    let mut store = ReservationTable::try_from(vec![
        IpReservation::new(ip("10.0.0.9"), mac(1)),
        IpReservation::new(ip("10.0.0.10"), mac(1)),
        IpReservation::new(ip("10.0.0.11"), mac(2)),
        IpReservation::new(ip("10.1.0.9"), mac(1)),
    ]).unwrap();
    let node = node_on("mgmt", &[1, 2]);

    for target in ["10.0.0.50", "10.0.0.51", "10.0.0.52"] {
        let outcome = IpClaimArbiter::new(&mut store)
            .claim(&node, &catalog(), ip(target))
            .unwrap();
        let subnet = outcome.subnet;

        let held: Vec<IpReservation> = store
            .get_by_mac(outcome.reservation.mac)
            .unwrap()
            .into_iter()
            .filter(|reservation| reservation.is_within(&subnet))
            .collect();
        assert_eq!(held, vec![outcome.reservation.clone()]);
    }

    // Other address and other subnet are untouched.
    assert!(store.get_by_ip(ip("10.0.0.11")).unwrap().is_some());
    assert!(store.get_by_ip(ip("10.1.0.9")).unwrap().is_some());
}

#[test]
fn preferred_address_claims_instead_of_first() {
    let mut store = ReservationTable::try_from(vec![IpReservation::new(ip("10.0.0.11"), mac(2))]).unwrap();
    let outcome = IpClaimArbiter::new(&mut store)
        .with_selector(Preferred(mac(2)))
        .claim(&node_on("mgmt", &[1, 2]), &catalog(), ip("10.0.0.50"))
        .unwrap();

    assert_eq!(outcome.reservation.mac, mac(2));
    assert_eq!(outcome.released.len(), 1);
    assert!(store.get_by_mac(mac(1)).unwrap().is_empty());
}
