use std::net::IpAddr;

use anyhow::Context;
use invctl_common::config::Config;
use invctl_core::reservation;

use crate::commands::{IpCommand, open_inventory, save_inventory};
use crate::mprint;
use crate::terminal::{format, print};

pub fn run(command: IpCommand, cfg: &Config) -> anyhow::Result<()> {
    match command {
        IpCommand::Show { ips } => show(&ips, cfg),
        IpCommand::Delete { ips } => delete(&ips, cfg),
        IpCommand::MakeStatic { ips } => make_static(&ips, cfg),
    }
}

fn show(ips: &[IpAddr], cfg: &Config) -> anyhow::Result<()> {
    let inventory = open_inventory(cfg)?;
    print::header("reservations", cfg.quiet);
    for (idx, ip) in ips.iter().enumerate() {
        let found = reservation::show_reservation(&inventory, *ip)?;
        print::tree_head(idx, &found.ip.to_string());
        print::as_tree_one_level(format::reservation_details(&found));
        if idx + 1 != ips.len() {
            mprint!();
        }
    }
    Ok(())
}

// Work done before a failure is still written out.
fn delete(ips: &[IpAddr], cfg: &Config) -> anyhow::Result<()> {
    let mut inventory = open_inventory(cfg)?;
    let result = ips.iter().try_for_each(|ip| {
        reservation::release_reservation(&mut inventory, *ip)
            .map(|_| ())
            .with_context(|| format!("unable to delete reservation for {ip}"))
    });
    save_inventory(&mut inventory)?;
    result
}

fn make_static(ips: &[IpAddr], cfg: &Config) -> anyhow::Result<()> {
    let mut inventory = open_inventory(cfg)?;
    let result = ips.iter().try_for_each(|ip| {
        reservation::make_static(&mut inventory, *ip)
            .map(|_| ())
            .with_context(|| format!("unable to make reservation for {ip} static"))
    });
    save_inventory(&mut inventory)?;
    result
}
