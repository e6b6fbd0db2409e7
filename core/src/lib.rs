//! # invctl core
//!
//! Network detection and IP-reservation arbitration for inventory nodes.
//!
//! * [`detection`]: attributes each local interface to a catalog network.
//! * [`merge`]: folds detected addresses into a node's interface records.
//! * [`claim`]: claims a specific IP for a node, releasing conflicting
//!   reservations in the same subnet first.
//! * [`reservation`]: one-step reservation maintenance (show, release, make static).
//! * [`store`]: the JSON inventory document backing the CLI.
//!
//! Everything here is synchronous and single-shot; callers own the inputs for
//! the duration of a call and persist results themselves.

pub mod claim;
pub mod detection;
pub mod merge;
pub mod reservation;
pub mod selection;
pub mod store;
