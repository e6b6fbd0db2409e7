use std::net::IpAddr;

use thiserror::Error;

use crate::inventory::reservation::IpReservation;
use crate::network::catalog::Subnet;

/// The host's interfaces could not be listed.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("unable to list interfaces: {0}")]
    Interfaces(String),
}

/// A reservation store or inventory backend call failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("inventory I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("inventory document is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("unable to detect networks: {0}")]
    Enumeration(#[from] EnumerationError),

    #[error("unable to find a subnet containing {ip} on any network this node is connected to")]
    NoMatchingNetwork { ip: IpAddr },

    #[error("a reservation for {} already exists (held by {})", .reservation.ip, .reservation.mac)]
    AlreadyReserved { reservation: Box<IpReservation> },

    #[error("reservation store failed to {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("claim of {ip} stopped after releasing {} reservation(s): {source}", .released.len())]
    PartialClaim {
        ip: IpAddr,
        released: Vec<IpReservation>,
        #[source]
        source: StoreError,
    },

    #[error("no hardware address selected for a claim on network '{network}'")]
    NoClaimingAddress { network: String },

    #[error("subnet {first_subnet} of network '{first}' overlaps subnet {second_subnet} of network '{second}'")]
    OverlappingSubnets {
        first: String,
        first_subnet: Subnet,
        second: String,
        second_subnet: Subnet,
    },

    #[error("network '{id}' is declared more than once")]
    DuplicateNetwork { id: String },

    #[error("network '{id}' has no subnets")]
    EmptyNetwork { id: String },

    #[error("node '{id}' not found")]
    NodeNotFound { id: String },

    #[error("no reservation exists for {ip}")]
    ReservationNotFound { ip: IpAddr },
}

impl InventoryError {
    pub fn store(operation: &'static str, source: StoreError) -> Self {
        InventoryError::Store { operation, source }
    }
}
