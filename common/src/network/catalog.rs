//! # Network Catalog
//!
//! Known logical networks and their CIDR subnets.
//!
//! A [`NetworkCatalog`] is validated once when it is built: network ids are
//! unique, every network has a subnet, and no subnet of one network may
//! overlap a subnet of another network. Resolution can therefore
//! return the first match without that match depending on catalog order.

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InventoryError;

/// A CIDR block belonging to exactly one [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subnet {
    #[serde(serialize_with = "serialize_cidr", deserialize_with = "deserialize_cidr")]
    cidr: IpNetwork,
}

impl Subnet {
    /// Host bits are cleared, so `10.0.0.5/24` and `10.0.0.0/24` are the same subnet.
    pub fn new(cidr: IpNetwork) -> Self {
        let cidr = IpNetwork::new(cidr.network(), cidr.prefix()).unwrap_or(cidr);
        Self { cidr }
    }

    pub fn cidr(&self) -> IpNetwork {
        self.cidr
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.cidr.contains(ip)
    }

    pub fn overlaps(&self, other: &Subnet) -> bool {
        self.cidr.contains(other.cidr.network()) || other.cidr.contains(self.cidr.network())
    }
}

impl FromStr for Subnet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpNetwork::from_str(s.trim())
            .map(Subnet::new)
            .map_err(|e| format!("invalid subnet '{s}': {e}"))
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cidr.network(), self.cidr.prefix())
    }
}

fn serialize_cidr<S: Serializer>(cidr: &IpNetwork, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&Subnet::new(*cidr).to_string())
}

fn deserialize_cidr<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IpNetwork, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Subnet::from_str(&raw)
        .map(|subnet| subnet.cidr)
        .map_err(serde::de::Error::custom)
}

/// A named logical network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subnets: Vec<Subnet>,
}

impl Network {
    pub fn new(id: impl Into<String>, subnets: Vec<Subnet>) -> Self {
        Self {
            id: id.into(),
            description: None,
            subnets,
        }
    }

    /// First subnet, in declaration order, that contains `ip`.
    pub fn subnet_containing(&self, ip: IpAddr) -> Option<&Subnet> {
        self.subnets.iter().find(|subnet| subnet.contains(ip))
    }
}

/// Ordered, overlap-free collection of networks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkCatalog {
    networks: Vec<Network>,
}

impl NetworkCatalog {
    /// Builds a catalog. Network ids must be unique, every network needs at
    /// least one subnet, and subnets of different networks must not overlap.
    pub fn new(networks: Vec<Network>) -> Result<Self, InventoryError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for network in &networks {
            if !seen.insert(network.id.as_str()) {
                return Err(InventoryError::DuplicateNetwork {
                    id: network.id.clone(),
                });
            }
            if network.subnets.is_empty() {
                return Err(InventoryError::EmptyNetwork {
                    id: network.id.clone(),
                });
            }
        }

        for (idx, network) in networks.iter().enumerate() {
            for other in &networks[idx + 1..] {
                for subnet in &network.subnets {
                    if let Some(clash) = other.subnets.iter().find(|s| s.overlaps(subnet)) {
                        return Err(InventoryError::OverlappingSubnets {
                            first: network.id.clone(),
                            first_subnet: *subnet,
                            second: other.id.clone(),
                            second_subnet: *clash,
                        });
                    }
                }
            }
        }
        Ok(Self { networks })
    }

    /// The network owning `ip`, if any.
    pub fn resolve(&self, ip: IpAddr) -> Option<&Network> {
        self.resolve_subnet(ip).map(|(network, _)| network)
    }

    /// The network owning `ip` together with the subnet that matched.
    pub fn resolve_subnet(&self, ip: IpAddr) -> Option<(&Network, &Subnet)> {
        self.networks
            .iter()
            .find_map(|network| network.subnet_containing(ip).map(|subnet| (network, subnet)))
    }

    pub fn get(&self, id: &str) -> Option<&Network> {
        self.networks.iter().find(|network| network.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.networks.iter()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
