use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_INVENTORY: &str = "inventory.json";
pub const INVENTORY_ENV: &str = "INVCTL_INVENTORY";
pub const NODEID_FILE_ENV: &str = "NODEID_FILE";

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON inventory document the commands operate on.
    pub inventory: PathBuf,
    /// 1 hides headers and trees, 2 also hides informational logs.
    pub quiet: u8,
    pub verbose: u8,
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory: PathBuf::from(DEFAULT_INVENTORY),
            quiet: 0,
            verbose: 0,
            no_color: false,
        }
    }
}

/// Reads a node id from a file such as the one named by `NODEID_FILE`.
///
/// Surrounding whitespace is trimmed; an empty file yields `InvalidData`.
pub fn read_node_id_file(path: &Path) -> io::Result<String> {
    let raw = fs::read_to_string(path)?;
    let id = raw.trim();
    if id.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} does not contain a node id", path.display()),
        ));
    }
    Ok(id.to_string())
}
