#![cfg(test)]

mod claim;
mod detection;
mod inventory_file;
mod util;
