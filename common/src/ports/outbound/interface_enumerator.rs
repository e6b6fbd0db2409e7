use crate::error::EnumerationError;
use crate::network::interface::LocalInterface;

/// Lists the network interfaces of the running host.
pub trait InterfaceEnumerator {
    /// Either every interface with its configured addresses, or an error.
    /// Implementations must not return a partial list.
    fn interfaces(&self) -> Result<Vec<LocalInterface>, EnumerationError>;
}
