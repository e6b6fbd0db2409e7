use std::net::IpAddr;

use chrono::{DateTime, Utc};
use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};

use crate::network::catalog::Subnet;
use crate::network::mac::serde_mac;

/// Binds one IP address to one hardware address.
///
/// A reservation without an `end` is static; otherwise it expires at `end`.
/// Expiry is enforced by whatever backs the reservation store, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpReservation {
    pub ip: IpAddr,
    #[serde(with = "serde_mac")]
    pub mac: MacAddr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl IpReservation {
    pub fn new(ip: IpAddr, mac: MacAddr) -> Self {
        Self {
            ip,
            mac,
            hostname: None,
            start: None,
            end: None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.end.is_none()
    }

    pub fn make_static(&mut self) {
        self.end = None;
    }

    pub fn is_within(&self, subnet: &Subnet) -> bool {
        subnet.contains(self.ip)
    }
}
