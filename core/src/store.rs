//! # Inventory Storage
//!
//! * [`table::ReservationTable`]: an in-memory reservation store with a
//!   uniqueness constraint on IP.
//! * [`file::InventoryFile`]: a JSON inventory document on disk holding
//!   networks, nodes and a reservation table.

pub mod file;
pub mod table;
