use crate::terminal::colors;
use chrono::{DateTime, Utc};
use colored::*;
use invctl_common::inventory::node::{Node, SERIAL_CONSOLE_KEY};
use invctl_common::inventory::reservation::IpReservation;
use invctl_common::network::catalog::Subnet;
use invctl_common::network::mac::HardwareAddressSet;
use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;
use std::net::{IpAddr, Ipv6Addr};

pub type Detail = (String, ColoredString);

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if is_global_unicast(ipv6_addr) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

// 2000::/3
fn is_global_unicast(ipv6_addr: &Ipv6Addr) -> bool {
    let first_byte = ipv6_addr.octets()[0];
    (0x20..=0x3F).contains(&first_byte)
}

pub fn ip_to_detail(ip: &IpAddr) -> Detail {
    match ip {
        IpAddr::V4(ipv4_addr) => (
            String::from("IPv4"),
            ipv4_addr.to_string().color(colors::IPV4_ADDR),
        ),
        IpAddr::V6(ipv6_addr) => (
            String::from(ipv6_to_type_str(ipv6_addr)),
            ipv6_addr.to_string().color(colors::IPV6_ADDR),
        ),
    }
}

pub fn subnet_to_detail(subnet: &Subnet) -> Detail {
    match subnet.cidr() {
        IpNetwork::V4(net) => {
            let address = net.network().to_string().color(colors::IPV4_ADDR);
            let prefix = net.prefix().to_string().color(colors::IPV4_PREFIX);
            ("IPv4".to_string(), format!("{address}/{prefix}").color(colors::SEPARATOR))
        }
        IpNetwork::V6(net) => {
            let address = net.network().to_string().color(colors::IPV6_ADDR);
            let prefix = net.prefix().to_string().color(colors::IPV6_PREFIX);
            let key = ipv6_to_type_str(&net.network());
            (key.to_string(), format!("{address}/{prefix}").color(colors::SEPARATOR))
        }
    }
}

pub fn mac_to_detail(mac: &MacAddr) -> Detail {
    ("MAC".to_string(), mac.to_string().color(colors::MAC_ADDR))
}

pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn lease_to_detail(reservation: &IpReservation) -> Detail {
    let value = match reservation.end {
        None => "static".color(colors::STATIC_LEASE),
        Some(end) => format!("until {}", timestamp(&end)).normal(),
    };
    ("Lease".to_string(), value)
}

pub fn reservation_details(reservation: &IpReservation) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![ip_to_detail(&reservation.ip), mac_to_detail(&reservation.mac)];
    if let Some(hostname) = &reservation.hostname {
        details.push(("Host".to_string(), hostname.normal()));
    }
    if let Some(start) = &reservation.start {
        details.push(("Start".to_string(), timestamp(start).normal()));
    }
    details.push(lease_to_detail(reservation));
    details
}

fn addresses(nics: &HardwareAddressSet) -> ColoredString {
    nics.iter()
        .map(|mac| mac.to_string())
        .collect::<Vec<String>>()
        .join(", ")
        .color(colors::MAC_ADDR)
}

pub fn node_details(node: &Node) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![("Id".to_string(), node.id.normal())];

    let optional = [
        ("System", &node.system),
        ("Role", &node.role),
        ("Env", &node.environment),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            details.push((key.to_string(), value.normal()));
        }
    }

    for (network, record) in &node.networks {
        let value = if record.is_empty() {
            "no addresses".color(colors::MISSING)
        } else {
            addresses(&record.nics)
        };
        details.push((network.clone(), value));
    }

    if let Some(console) = node.metadata.get(SERIAL_CONSOLE_KEY) {
        details.push(("Console".to_string(), console.normal()));
    }
    if let Some(updated) = &node.last_updated {
        details.push(("Updated".to_string(), timestamp(updated).normal()));
    }
    details
}
