use std::net::IpAddr;
use std::str::FromStr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;

use crate::error::EnumerationError;
use crate::ports::outbound::interface_enumerator::InterfaceEnumerator;

/// A network interface as seen on the running host.
///
/// Addresses are kept in their textual, CIDR-ish form (`10.0.0.5/24`) the way
/// the operating system reports them; parsing happens during detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInterface {
    pub name: String,
    pub mac: Option<MacAddr>,
    pub addresses: Vec<String>,
}

impl LocalInterface {
    pub fn new(name: impl Into<String>, mac: Option<MacAddr>, addresses: &[&str]) -> Self {
        Self {
            name: name.into(),
            mac,
            addresses: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Configured addresses that parse as IPs, in reported order.
    pub fn ips(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.addresses.iter().filter_map(|addr| parse_interface_address(addr))
    }
}

impl From<&NetworkInterface> for LocalInterface {
    fn from(interface: &NetworkInterface) -> Self {
        Self {
            name: interface.name.clone(),
            // Loopback and tunnel devices report an all-zero or missing MAC.
            mac: interface.mac.filter(|mac| *mac != MacAddr::zero()),
            addresses: interface.ips.iter().map(IpNetwork::to_string).collect(),
        }
    }
}

/// Parses an interface address in either `ip/prefix` or bare `ip` form.
pub fn parse_interface_address(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    if let Ok(network) = IpNetwork::from_str(raw) {
        return Some(network.ip());
    }
    IpAddr::from_str(raw).ok()
}

/// Enumerates the host's interfaces through `pnet::datalink`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl InterfaceEnumerator for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<LocalInterface>, EnumerationError> {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        // pnet swallows getifaddrs failures and hands back an empty list; a
        // host always has at least a loopback device.
        if interfaces.is_empty() {
            return Err(EnumerationError::Interfaces(
                "operating system reported no network interfaces".to_string(),
            ));
        }
        Ok(interfaces.iter().map(LocalInterface::from).collect())
    }
}
