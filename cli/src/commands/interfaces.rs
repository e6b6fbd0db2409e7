use colored::*;
use invctl_common::config::Config;
use invctl_common::network::interface::{LocalInterface, SystemInterfaces};
use invctl_common::ports::outbound::interface_enumerator::InterfaceEnumerator;
use invctl_common::ports::outbound::inventory_repository::InventoryRepository;
use invctl_core::detection;

use crate::commands::open_inventory;
use crate::mprint;
use crate::terminal::{colors, format, print};

pub fn run(cfg: &Config) -> anyhow::Result<()> {
    let inventory = open_inventory(cfg)?;
    let catalog = inventory.catalog()?;
    let interfaces: Vec<LocalInterface> = SystemInterfaces.interfaces()?;

    print::header("local interfaces", cfg.quiet);
    for (idx, interface) in interfaces.iter().enumerate() {
        print::tree_head(idx, &interface.name);

        let mut details: Vec<format::Detail> = interface.ips().map(|ip| format::ip_to_detail(&ip)).collect();
        if let Some(mac) = &interface.mac {
            details.push(format::mac_to_detail(mac));
        }
        let network = match detection::attribute_interface(interface, &catalog) {
            Some(network) => network.id.color(colors::PRIMARY),
            None => "unknown".color(colors::MISSING),
        };
        details.push(("Network".to_string(), network));
        print::as_tree_one_level(details);

        if idx + 1 != interfaces.len() {
            mprint!();
        }
    }
    Ok(())
}
