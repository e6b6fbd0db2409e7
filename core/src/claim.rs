//! # IP Claiming
//!
//! Claims a specific IP address for a node.
//!
//! The claim runs in three stages:
//! 1. **Eligibility**: the IP must be unreserved and inside a subnet of a
//!    network the node has recorded addresses on.
//! 2. **Planning**: the claiming address is chosen by an [`AddressSelector`]
//!    and every reservation it already holds inside the matching subnet is
//!    scheduled for release. Reservations in other subnets are left alone.
//! 3. **Execution**: planned releases are applied in order, then the new
//!    reservation is created. Nothing is rolled back; a failure after at least
//!    one release is reported as [`InventoryError::PartialClaim`] so the caller
//!    knows the subnet may currently hold no reservation for the address.

use std::net::IpAddr;

use invctl_common::error::InventoryError;
use invctl_common::inventory::node::Node;
use invctl_common::inventory::reservation::IpReservation;
use invctl_common::network::catalog::{Network, NetworkCatalog, Subnet};
use invctl_common::ports::outbound::reservation_store::ReservationStore;
use pnet::util::MacAddr;
use tracing::{info, warn};

use crate::selection::{AddressSelector, FirstRecorded};

/// Result of a successful claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub reservation: IpReservation,
    pub network: String,
    pub subnet: Subnet,
    /// Reservations the claiming address held in `subnet` before the claim.
    pub released: Vec<IpReservation>,
}

/// Work decided before any store mutation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub ip: IpAddr,
    pub mac: MacAddr,
    pub network: String,
    pub subnet: Subnet,
    pub releases: Vec<IpReservation>,
}

pub struct IpClaimArbiter<'s, S: ReservationStore + ?Sized> {
    store: &'s mut S,
    selector: Box<dyn AddressSelector>,
}

impl<'s, S: ReservationStore + ?Sized> IpClaimArbiter<'s, S> {
    /// An arbiter using the [`FirstRecorded`] selection strategy.
    pub fn new(store: &'s mut S) -> Self {
        Self {
            store,
            selector: Box::new(FirstRecorded),
        }
    }

    pub fn with_selector(mut self, selector: impl AddressSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn claim(
        &mut self,
        node: &Node,
        catalog: &NetworkCatalog,
        ip: IpAddr,
    ) -> Result<ClaimOutcome, InventoryError> {
        self.ensure_unreserved(ip)?;
        let plan = self.plan(node, catalog, ip)?;
        self.execute(plan)
    }

    fn ensure_unreserved(&self, ip: IpAddr) -> Result<(), InventoryError> {
        match self.store.get_by_ip(ip) {
            Ok(None) => Ok(()),
            Ok(Some(existing)) => Err(InventoryError::AlreadyReserved {
                reservation: Box::new(existing),
            }),
            Err(e) => Err(InventoryError::store("look up reservation by ip", e)),
        }
    }

    /// Decides the claiming address and the releases without mutating the store.
    pub fn plan(
        &self,
        node: &Node,
        catalog: &NetworkCatalog,
        ip: IpAddr,
    ) -> Result<ReleasePlan, InventoryError> {
        let (network, subnet) =
            find_connected_subnet(node, catalog, ip).ok_or(InventoryError::NoMatchingNetwork { ip })?;

        let recorded = node
            .record(&network.id)
            .map(|record| &record.nics)
            .ok_or_else(|| InventoryError::NoClaimingAddress {
                network: network.id.clone(),
            })?;
        let mac = self.selector.select(&network.id, recorded).ok_or_else(|| {
            InventoryError::NoClaimingAddress {
                network: network.id.clone(),
            }
        })?;

        let releases: Vec<IpReservation> = self
            .store
            .get_by_mac(mac)
            .map_err(|e| InventoryError::store("look up reservations by hardware address", e))?
            .into_iter()
            .filter(|reservation| reservation.is_within(subnet))
            .collect();

        Ok(ReleasePlan {
            ip,
            mac,
            network: network.id.clone(),
            subnet: *subnet,
            releases,
        })
    }

    fn execute(&mut self, plan: ReleasePlan) -> Result<ClaimOutcome, InventoryError> {
        let mut released: Vec<IpReservation> = Vec::with_capacity(plan.releases.len());

        for reservation in plan.releases {
            if let Err(source) = self.store.delete(&reservation) {
                return Err(interrupted(plan.ip, released, "delete reservation", source));
            }
            info!("Released {} held by {}", reservation.ip, reservation.mac);
            released.push(reservation);
        }

        match self.store.create(plan.mac, plan.ip) {
            Ok(reservation) => {
                info!(
                    "Reserved {} for {} on network {} ({})",
                    reservation.ip,
                    reservation.mac,
                    plan.network,
                    self.selector.name()
                );
                Ok(ClaimOutcome {
                    reservation,
                    network: plan.network,
                    subnet: plan.subnet,
                    released,
                })
            }
            Err(source) => Err(interrupted(plan.ip, released, "create reservation", source)),
        }
    }
}

fn interrupted(
    ip: IpAddr,
    released: Vec<IpReservation>,
    operation: &'static str,
    source: invctl_common::error::StoreError,
) -> InventoryError {
    if released.is_empty() {
        return InventoryError::store(operation, source);
    }
    warn!(
        "Claim of {} failed after releasing {} reservation(s); retry to restore a reservation",
        ip,
        released.len()
    );
    InventoryError::PartialClaim {
        ip,
        released,
        source,
    }
}

/// First catalog network the node is connected to whose subnets contain `ip`.
pub fn find_connected_subnet<'c>(
    node: &Node,
    catalog: &'c NetworkCatalog,
    ip: IpAddr,
) -> Option<(&'c Network, &'c Subnet)> {
    catalog
        .iter()
        .filter(|network| node.is_connected_to(&network.id))
        .find_map(|network| network.subnet_containing(ip).map(|subnet| (network, subnet)))
}
