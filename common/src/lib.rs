//! # invctl common types
//!
//! Shared vocabulary for the inventory client: hardware address sets, the
//! network catalog, nodes and IP reservations, plus the outbound ports the
//! core logic drives (interface enumeration, reservation storage, inventory
//! persistence).

pub mod config;
pub mod error;
pub mod inventory;
pub mod network;
pub mod ports;
