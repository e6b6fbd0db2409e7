//! # Inventory Entities
//!
//! * [`node::Node`]: a machine and the hardware addresses it was seen with on each network.
//! * [`reservation::IpReservation`]: a binding of one IP address to one hardware address.

pub mod node;
pub mod reservation;
