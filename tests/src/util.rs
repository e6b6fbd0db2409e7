use std::net::IpAddr;

use invctl_common::error::EnumerationError;
use invctl_common::inventory::node::{NetworkInterfaceRecord, Node};
use invctl_common::network::catalog::{Network, NetworkCatalog};
use invctl_common::network::interface::LocalInterface;
use invctl_common::ports::outbound::interface_enumerator::InterfaceEnumerator;
use pnet::util::MacAddr;

pub const NODE_ID: &str = "node-0001";

pub fn mac(last: u8) -> MacAddr {
    MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, last)
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub fn networks() -> Vec<Network> {
    vec![
        Network::new("mgmt", vec!["10.0.0.0/24".parse().unwrap()]),
        Network::new("data", vec!["10.1.0.0/24".parse().unwrap()]),
    ]
}

pub fn catalog() -> NetworkCatalog {
    NetworkCatalog::new(networks()).unwrap()
}

pub fn node_on(network: &str, macs: &[u8]) -> Node {
    let mut node = Node::new(NODE_ID);
    node.networks.insert(
        network.to_string(),
        NetworkInterfaceRecord {
            nics: macs.iter().map(|last| mac(*last)).collect(),
        },
    );
    node
}

pub fn ni(name: &str, mac: Option<MacAddr>, addresses: &[&str]) -> LocalInterface {
    LocalInterface::new(name, mac, addresses)
}

/// Host with loopback, one NIC on mgmt and one NIC on no known network.
pub fn host_interfaces() -> Vec<LocalInterface> {
    vec![
        ni("lo", None, &["127.0.0.1/8", "::1/128"]),
        ni("eno1", Some(mac(1)), &["fe80::a8bb:ccff:fedd:ee01/64", "10.0.0.5/24"]),
        ni("wlan0", Some(MacAddr::new(0x02, 0x42, 0xac, 0x11, 0x00, 0x02)), &["192.168.1.20/24"]),
    ]
}

pub struct FakeInterfaces(pub Vec<LocalInterface>);

impl InterfaceEnumerator for FakeInterfaces {
    fn interfaces(&self) -> Result<Vec<LocalInterface>, EnumerationError> {
        Ok(self.0.clone())
    }
}

pub struct BrokenInterfaces;

impl InterfaceEnumerator for BrokenInterfaces {
    fn interfaces(&self) -> Result<Vec<LocalInterface>, EnumerationError> {
        Err(EnumerationError::Interfaces("permission denied".to_string()))
    }
}
