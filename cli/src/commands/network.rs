use colored::*;
use invctl_common::config::Config;
use invctl_common::ports::outbound::inventory_repository::InventoryRepository;

use crate::commands::{NetworkCommand, open_inventory};
use crate::mprint;
use crate::terminal::{format, print};

pub fn run(command: NetworkCommand, cfg: &Config) -> anyhow::Result<()> {
    match command {
        NetworkCommand::List => list(cfg),
    }
}

fn list(cfg: &Config) -> anyhow::Result<()> {
    let inventory = open_inventory(cfg)?;
    let catalog = inventory.catalog()?;

    print::header("network catalog", cfg.quiet);
    if catalog.is_empty() {
        print::nothing_found("networks", cfg.quiet);
        return Ok(());
    }

    for (idx, network) in catalog.iter().enumerate() {
        print::tree_head(idx, &network.id);
        let mut details: Vec<format::Detail> = Vec::new();
        if let Some(description) = &network.description {
            details.push(("About".to_string(), description.italic()));
        }
        details.extend(network.subnets.iter().map(format::subnet_to_detail));
        print::as_tree_one_level(details);
        if idx + 1 != catalog.len() {
            mprint!();
        }
    }
    Ok(())
}
