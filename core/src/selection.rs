//! Strategies for picking which of a node's hardware addresses claims an IP.

use invctl_common::network::mac::HardwareAddressSet;
use pnet::util::MacAddr;

/// Chooses the claiming address among those recorded on the matching network.
pub trait AddressSelector {
    fn name(&self) -> &'static str;

    /// `None` when no recorded address is acceptable.
    fn select(&self, network_id: &str, recorded: &HardwareAddressSet) -> Option<MacAddr>;
}

/// Takes the first recorded address. Additional NICs on the same network
/// are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstRecorded;

impl AddressSelector for FirstRecorded {
    fn name(&self) -> &'static str {
        "first-recorded"
    }

    fn select(&self, _network_id: &str, recorded: &HardwareAddressSet) -> Option<MacAddr> {
        recorded.first()
    }
}

/// Claims with one specific address, provided the node has it on the network.
#[derive(Debug, Clone, Copy)]
pub struct Preferred(pub MacAddr);

impl AddressSelector for Preferred {
    fn name(&self) -> &'static str {
        "preferred"
    }

    fn select(&self, _network_id: &str, recorded: &HardwareAddressSet) -> Option<MacAddr> {
        recorded.contains(&self.0).then_some(self.0)
    }
}
