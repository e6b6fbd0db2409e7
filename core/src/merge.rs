//! Folds detected hardware addresses into a node's interface records.
//!
//! Merging is append-only: addresses the node already had stay recorded even
//! when they are no longer observed. Stale entries are dropped only through
//! [`Node::reset_networks`].

use invctl_common::inventory::node::Node;

use crate::detection::DetectedNetworks;

/// Returns the updated node and the number of addresses it did not have before.
pub fn merge_interfaces(mut node: Node, detected: &DetectedNetworks) -> (Node, usize) {
    let mut added = 0;
    for (network_id, observed) in detected {
        let record = node.networks.entry(network_id.clone()).or_default();
        let merged = record.nics.union(observed);
        added += merged.len() - record.nics.len();
        record.nics = merged;
    }
    (node, added)
}
