//! # Network Model
//!
//! * [`mac`]: hardware addresses and the canonical [`mac::HardwareAddressSet`].
//! * [`catalog`]: networks, their CIDR subnets and IP-to-network resolution.
//! * [`interface`]: locally observed interfaces and the OS-backed enumerator.

pub mod catalog;
pub mod interface;
pub mod mac;
