//! Attributes the host's interfaces to logical networks.
//!
//! Each interface is examined address by address; the first address that
//! falls inside a catalog subnet decides the interface's network and the rest
//! of its addresses are ignored. Interfaces matching nothing are left out.

use std::collections::BTreeMap;

use invctl_common::error::InventoryError;
use invctl_common::network::catalog::{Network, NetworkCatalog};
use invctl_common::network::interface::LocalInterface;
use invctl_common::network::mac::HardwareAddressSet;
use invctl_common::ports::outbound::interface_enumerator::InterfaceEnumerator;
use tracing::{debug, info};

/// Network id → hardware addresses observed on that network.
pub type DetectedNetworks = BTreeMap<String, HardwareAddressSet>;

pub fn detect_networks(
    enumerator: &dyn InterfaceEnumerator,
    catalog: &NetworkCatalog,
) -> Result<DetectedNetworks, InventoryError> {
    let interfaces: Vec<LocalInterface> = enumerator.interfaces()?;
    debug!("Identified {} network interface(s)", interfaces.len());

    let mut detected = DetectedNetworks::new();
    for interface in &interfaces {
        let Some(network) = attribute_interface(interface, catalog) else {
            debug!("{} is not on any known network", interface.name);
            continue;
        };
        let Some(mac) = interface.mac else {
            debug!(
                "{} is on network {} but has no hardware address",
                interface.name, network.id
            );
            continue;
        };
        info!("Found network {} at {}", network.id, interface.name);
        detected.entry(network.id.clone()).or_default().add([mac]);
    }

    Ok(detected)
}

/// The network of the first address on `interface` that the catalog knows.
pub fn attribute_interface<'c>(
    interface: &LocalInterface,
    catalog: &'c NetworkCatalog,
) -> Option<&'c Network> {
    interface.ips().find_map(|ip| catalog.resolve(ip))
}
