pub mod interfaces;
pub mod ip;
pub mod network;
pub mod node;

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use invctl_common::config::{Config, DEFAULT_INVENTORY, INVENTORY_ENV, NODEID_FILE_ENV};
use invctl_common::network::mac::parse_mac;
use invctl_core::store::file::InventoryFile;
use pnet::util::MacAddr;

#[derive(Parser)]
#[command(name = "invctl")]
#[command(about = "Detects node networks and arbitrates IP reservations.", version)]
pub struct CommandLine {
    /// Inventory document to read and update
    #[arg(long, global = true, env = INVENTORY_ENV, default_value = DEFAULT_INVENTORY)]
    pub inventory: PathBuf,

    /// Print less; repeat to hide everything but results and warnings
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Print debug output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and maintain inventory nodes
    #[command(subcommand, alias = "n")]
    Node(NodeCommand),
    /// Inspect and maintain IP reservations
    #[command(subcommand)]
    Ip(IpCommand),
    /// Inspect the network catalog
    #[command(subcommand, alias = "net")]
    Network(NetworkCommand),
    /// Show this host's interfaces and the network each belongs to
    #[command(alias = "i")]
    Interfaces,
}

#[derive(Subcommand)]
pub enum NodeCommand {
    /// List nodes, optionally filtered
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        system: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Print nodes as JSON
    Show {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Record which networks this host's interfaces are attached to
    DetectNetworks {
        /// Node id; read from the node id file when omitted
        id: Option<String>,
        #[arg(long, env = NODEID_FILE_ENV)]
        nodeid_file: Option<PathBuf>,
    },
    /// Forget every recorded network on the given nodes
    ResetNetworks {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Reserve an IP for a node, releasing its other reservations in that subnet
    SetIp {
        id: String,
        ip: IpAddr,
        /// Claim with this hardware address instead of the first recorded one
        #[arg(long, value_parser = parse_mac)]
        mac: Option<MacAddr>,
    },
    /// Set the serial console of one or more nodes
    SetConsole {
        console: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum IpCommand {
    /// Show the reservation for each address
    Show {
        #[arg(required = true)]
        ips: Vec<IpAddr>,
    },
    /// Delete the reservation for each address
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true)]
        ips: Vec<IpAddr>,
    },
    /// Make each reservation permanent
    MakeStatic {
        #[arg(required = true)]
        ips: Vec<IpAddr>,
    },
}

#[derive(Subcommand)]
pub enum NetworkCommand {
    /// List catalog networks and their subnets
    #[command(alias = "ls")]
    List,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            inventory: self.inventory.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }
}

pub fn open_inventory(cfg: &Config) -> anyhow::Result<InventoryFile> {
    InventoryFile::open(&cfg.inventory)
        .with_context(|| format!("unable to open inventory {}", cfg.inventory.display()))
}

pub fn save_inventory(inventory: &mut InventoryFile) -> anyhow::Result<()> {
    let path = inventory.path().display().to_string();
    inventory
        .save()
        .with_context(|| format!("unable to write inventory {path}"))
}
