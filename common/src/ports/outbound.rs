//! # Outbound Ports (Driven Actors)
//!
//! Contracts for interactions the application initiates towards infrastructure.
//!
//! * [`interface_enumerator`]: lists the running host's network interfaces.
//! * [`reservation_store`]: reads and mutates IP reservations.
//! * [`inventory_repository`]: fetches and persists nodes and the network catalog.
//!
//! All items here are traits; implementations live next to the backend they wrap.

pub mod interface_enumerator;
pub mod inventory_repository;
pub mod reservation_store;
