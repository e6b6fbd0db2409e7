use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::Utc;
use colored::*;
use invctl_common::config::{Config, NODEID_FILE_ENV, read_node_id_file};
use invctl_common::error::InventoryError;
use invctl_common::inventory::node::{Node, SERIAL_CONSOLE_KEY};
use invctl_common::network::interface::SystemInterfaces;
use invctl_common::ports::outbound::inventory_repository::InventoryRepository;
use invctl_core::claim::{ClaimOutcome, IpClaimArbiter};
use invctl_core::detection;
use invctl_core::merge;
use invctl_core::selection::Preferred;
use pnet::util::MacAddr;
use tracing::{info, warn};

use crate::commands::{NodeCommand, open_inventory, save_inventory};
use crate::mprint;
use crate::terminal::{colors, format, print};

pub fn run(command: NodeCommand, cfg: &Config) -> anyhow::Result<()> {
    match command {
        NodeCommand::List { system, role } => list(system.as_deref(), role.as_deref(), cfg),
        NodeCommand::Show { ids } => show(&ids, cfg),
        NodeCommand::DetectNetworks { id, nodeid_file } => {
            let id = resolve_node_id(id, nodeid_file.as_deref())?;
            detect_networks(&id, cfg)
        }
        NodeCommand::ResetNetworks { ids } => reset_networks(&ids, cfg),
        NodeCommand::SetIp { id, ip, mac } => set_ip(&id, ip, mac, cfg),
        NodeCommand::SetConsole { console, ids } => set_console(&console, &ids, cfg),
    }
}

fn matches_filter(node: &Node, system: Option<&str>, role: Option<&str>) -> bool {
    let system_ok = system.is_none_or(|wanted| node.system.as_deref() == Some(wanted));
    let role_ok = role.is_none_or(|wanted| node.role.as_deref() == Some(wanted));
    system_ok && role_ok
}

fn list(system: Option<&str>, role: Option<&str>, cfg: &Config) -> anyhow::Result<()> {
    let inventory = open_inventory(cfg)?;
    let nodes: Vec<Node> = inventory
        .nodes()?
        .into_iter()
        .filter(|node| matches_filter(node, system, role))
        .collect();

    print::header("inventory nodes", cfg.quiet);
    if nodes.is_empty() {
        print::nothing_found("nodes", cfg.quiet);
        return Ok(());
    }

    for (idx, node) in nodes.iter().enumerate() {
        print::tree_head(idx, node.display_name());
        print::as_tree_one_level(format::node_details(node));
        if idx + 1 != nodes.len() {
            mprint!();
        }
    }

    let total: ColoredString = format!("{} node(s)", nodes.len()).bold().green();
    print::summary(&format!("Listed {total}"), cfg.quiet);
    Ok(())
}

fn show(ids: &[String], cfg: &Config) -> anyhow::Result<()> {
    let inventory = open_inventory(cfg)?;
    for id in ids {
        let node = inventory.require_node(id)?;
        mprint!(&render_node(&node)?);
    }
    Ok(())
}

fn render_node(node: &Node) -> anyhow::Result<String> {
    serde_json::to_string_pretty(node).with_context(|| format!("unable to render node {}", node.id))
}

/// The id given on the command line, else the contents of the node id file.
fn resolve_node_id(id: Option<String>, nodeid_file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(id) = id {
        return Ok(id);
    }
    let path: PathBuf = nodeid_file
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("no node id given and {NODEID_FILE_ENV} is not set"))?;
    read_node_id_file(&path)
        .with_context(|| format!("unable to read node id from {}", path.display()))
}

fn detect_networks(id: &str, cfg: &Config) -> anyhow::Result<()> {
    let mut inventory = open_inventory(cfg)?;
    let node = inventory.require_node(id)?;
    let catalog = inventory.catalog()?;

    print::header("detecting networks", cfg.quiet);
    let detected = detection::detect_networks(&SystemInterfaces, &catalog)
        .with_context(|| format!("network detection failed for node {id}"))?;

    for (idx, (network, nics)) in detected.iter().enumerate() {
        print::tree_head(idx, network);
        print::as_tree_one_level(nics.iter().map(format::mac_to_detail).collect());
    }

    let (mut node, added) = merge::merge_interfaces(node, &detected);
    if added == 0 {
        print::summary(&format!("No new hardware addresses for {id}"), cfg.quiet);
        return Ok(());
    }

    node.touch(Utc::now());
    inventory.update_node(node)?;
    save_inventory(&mut inventory)?;

    let added: ColoredString = format!("{added} new address(es)").bold().green();
    print::summary(&format!("Recorded {added} for {id}"), cfg.quiet);
    Ok(())
}

fn reset_networks(ids: &[String], cfg: &Config) -> anyhow::Result<()> {
    let mut inventory = open_inventory(cfg)?;
    for id in ids {
        let mut node = inventory.require_node(id)?;
        let cleared = node.reset_networks();
        node.touch(Utc::now());
        inventory.update_node(node)?;
        info!("Cleared {} network record(s) on {}", cleared, id);
    }
    save_inventory(&mut inventory)
}

fn set_ip(id: &str, ip: IpAddr, mac: Option<MacAddr>, cfg: &Config) -> anyhow::Result<()> {
    let mut inventory = open_inventory(cfg)?;
    let node = inventory.require_node(id)?;
    let catalog = inventory.catalog()?;

    let result = {
        let mut arbiter = IpClaimArbiter::new(&mut inventory);
        if let Some(mac) = mac {
            arbiter = arbiter.with_selector(Preferred(mac));
        }
        arbiter.claim(&node, &catalog, ip)
    };

    match result {
        Ok(outcome) => {
            save_inventory(&mut inventory)?;
            print_claim(&node, &outcome, cfg);
            Ok(())
        }
        Err(partial @ InventoryError::PartialClaim { .. }) => {
            // Releases already happened; keep the file in step with them.
            save_inventory(&mut inventory)?;
            warn!("Run the command again to reserve {} for {}", ip, id);
            Err(partial).with_context(|| format!("unable to set {ip} for node {id}"))
        }
        Err(e) => Err(e).with_context(|| format!("unable to set {ip} for node {id}")),
    }
}

fn print_claim(node: &Node, outcome: &ClaimOutcome, cfg: &Config) {
    print::header("reservation", cfg.quiet);
    print::tree_head(0, node.display_name());
    let mut details = format::reservation_details(&outcome.reservation);
    details.push(("Network".to_string(), outcome.network.color(colors::PRIMARY)));
    details.push(format::subnet_to_detail(&outcome.subnet));
    print::as_tree_one_level(details);

    for released in &outcome.released {
        print::aligned_line("Released", released.ip.to_string().color(colors::MISSING));
    }
}

fn set_console(console: &str, ids: &[String], cfg: &Config) -> anyhow::Result<()> {
    let mut inventory = open_inventory(cfg)?;
    for id in ids {
        let mut node = inventory.require_node(id)?;
        node.set_metadata(SERIAL_CONSOLE_KEY, console);
        node.touch(Utc::now());
        inventory.update_node(node)?;
        info!("Serial console of {} set to {}", id, console);
    }
    save_inventory(&mut inventory)
}
