//! # Ports
//!
//! Traits isolating the detection and claiming logic from the outside world.
//! The core depends on these; adapters (the OS, the inventory backend)
//! implement them.

pub mod outbound;
