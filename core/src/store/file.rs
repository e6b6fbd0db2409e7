use std::fs;
use std::io::Write;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use invctl_common::error::StoreError;
use invctl_common::inventory::node::Node;
use invctl_common::inventory::reservation::IpReservation;
use invctl_common::network::catalog::Network;
use invctl_common::ports::outbound::inventory_repository::InventoryRepository;
use invctl_common::ports::outbound::reservation_store::ReservationStore;
use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::ReservationTable;

/// On-disk shape of the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub reservations: ReservationTable,
}

/// The document as read, before reservation uniqueness is checked.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    networks: Vec<Network>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    reservations: Vec<IpReservation>,
}

impl TryFrom<RawDocument> for InventoryDocument {
    type Error = StoreError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            networks: raw.networks,
            nodes: raw.nodes,
            reservations: ReservationTable::try_from(raw.reservations)?,
        })
    }
}

/// A JSON inventory document loaded into memory.
///
/// Mutations only touch the in-memory copy; [`InventoryFile::save`] writes
/// the whole document back through a temporary file and a rename.
#[derive(Debug)]
pub struct InventoryFile {
    path: PathBuf,
    document: InventoryDocument,
    dirty: bool,
}

impl InventoryFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(StoreError::NotFound {
                kind: "inventory file",
                key: path.display().to_string(),
            });
        }
        let raw = fs::read_to_string(&path)?;
        let raw: RawDocument = serde_json::from_str(&raw)?;
        let document = InventoryDocument::try_from(raw)?;
        debug!(
            "Loaded {} network(s), {} node(s), {} reservation(s) from {}",
            document.networks.len(),
            document.nodes.len(),
            document.reservations.len(),
            path.display()
        );
        Ok(Self {
            path,
            document,
            dirty: false,
        })
    }

    /// Wraps a document that will be written to `path` on the next save.
    pub fn with_document(path: impl AsRef<Path>, document: InventoryDocument) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            document,
            dirty: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &InventoryDocument {
        &self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the document if it changed since it was loaded or last saved.
    pub fn save(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.document)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote inventory to {}", self.path.display());
        self.dirty = false;
        Ok(())
    }
}

impl InventoryRepository for InventoryFile {
    fn networks(&self) -> Result<Vec<Network>, StoreError> {
        Ok(self.document.networks.clone())
    }

    fn nodes(&self) -> Result<Vec<Node>, StoreError> {
        Ok(self.document.nodes.clone())
    }

    fn node(&self, id: &str) -> Result<Option<Node>, StoreError> {
        Ok(self.document.nodes.iter().find(|node| node.id == id).cloned())
    }

    fn update_node(&mut self, node: Node) -> Result<(), StoreError> {
        match self.document.nodes.iter_mut().find(|existing| existing.id == node.id) {
            Some(existing) => *existing = node,
            None => self.document.nodes.push(node),
        }
        self.dirty = true;
        Ok(())
    }
}

impl ReservationStore for InventoryFile {
    fn get_by_ip(&self, ip: IpAddr) -> Result<Option<IpReservation>, StoreError> {
        self.document.reservations.get_by_ip(ip)
    }

    fn get_by_mac(&self, mac: MacAddr) -> Result<Vec<IpReservation>, StoreError> {
        self.document.reservations.get_by_mac(mac)
    }

    fn delete(&mut self, reservation: &IpReservation) -> Result<(), StoreError> {
        self.document.reservations.delete(reservation)?;
        self.dirty = true;
        Ok(())
    }

    fn create(&mut self, mac: MacAddr, ip: IpAddr) -> Result<IpReservation, StoreError> {
        let created = self.document.reservations.create(mac, ip)?;
        self.dirty = true;
        Ok(created)
    }

    fn update(&mut self, reservation: IpReservation) -> Result<IpReservation, StoreError> {
        let updated = self.document.reservations.update(reservation)?;
        self.dirty = true;
        Ok(updated)
    }
}
