use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::network::mac::HardwareAddressSet;

pub const SERIAL_CONSOLE_KEY: &str = "serial_console";

/// Every hardware address a node has ever been observed with on one network.
///
/// Records only grow. Use [`Node::reset_networks`] to start over.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfaceRecord {
    #[serde(default)]
    pub nics: HardwareAddressSet,
}

impl NetworkInterfaceRecord {
    pub fn is_empty(&self) -> bool {
        self.nics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkInterfaceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hostname: None,
            system: None,
            role: None,
            environment: None,
            metadata: BTreeMap::new(),
            networks: BTreeMap::new(),
            last_updated: None,
        }
    }

    pub fn record(&self, network_id: &str) -> Option<&NetworkInterfaceRecord> {
        self.networks.get(network_id)
    }

    /// True when the node has at least one recorded address on `network_id`.
    pub fn is_connected_to(&self, network_id: &str) -> bool {
        self.record(network_id).is_some_and(|record| !record.is_empty())
    }

    /// Drops every interface record. Returns how many records were removed.
    pub fn reset_networks(&mut self) -> usize {
        let cleared = self.networks.len();
        self.networks.clear();
        cleared
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = Some(now);
    }

    /// Hostname if set, otherwise the node id.
    pub fn display_name(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.id)
    }
}
