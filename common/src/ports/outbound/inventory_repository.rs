use crate::error::{InventoryError, StoreError};
use crate::inventory::node::Node;
use crate::network::catalog::{Network, NetworkCatalog};

/// Node and network persistence.
///
/// Detection, merging and claiming never call this themselves: the caller
/// fetches what they need, runs them, and persists the result.
pub trait InventoryRepository {
    fn networks(&self) -> Result<Vec<Network>, StoreError>;

    fn nodes(&self) -> Result<Vec<Node>, StoreError>;

    fn node(&self, id: &str) -> Result<Option<Node>, StoreError>;

    /// Inserts or replaces the node with the same id.
    fn update_node(&mut self, node: Node) -> Result<(), StoreError>;

    /// Loads the networks and validates them into a catalog.
    fn catalog(&self) -> Result<NetworkCatalog, InventoryError> {
        let networks = self
            .networks()
            .map_err(|e| InventoryError::store("list networks", e))?;
        NetworkCatalog::new(networks)
    }

    fn require_node(&self, id: &str) -> Result<Node, InventoryError> {
        self.node(id)
            .map_err(|e| InventoryError::store("look up node", e))?
            .ok_or_else(|| InventoryError::NodeNotFound { id: id.to_string() })
    }
}
