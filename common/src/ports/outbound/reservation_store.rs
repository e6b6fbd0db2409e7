use std::net::IpAddr;

use pnet::util::MacAddr;

use crate::error::StoreError;
use crate::inventory::reservation::IpReservation;

/// Read and write access to IP reservations.
///
/// The store is expected to enforce uniqueness of reservations per IP; callers
/// performing a release-then-create sequence rely on it to serialize
/// concurrent claims.
pub trait ReservationStore {
    /// The reservation holding `ip`. `Ok(None)` means the IP is free.
    fn get_by_ip(&self, ip: IpAddr) -> Result<Option<IpReservation>, StoreError>;

    /// Every reservation held by `mac`, possibly none.
    fn get_by_mac(&self, mac: MacAddr) -> Result<Vec<IpReservation>, StoreError>;

    fn delete(&mut self, reservation: &IpReservation) -> Result<(), StoreError>;

    /// Reserves `ip` for `mac` and returns the stored record.
    fn create(&mut self, mac: MacAddr, ip: IpAddr) -> Result<IpReservation, StoreError>;

    /// Replaces the stored reservation for `reservation.ip`.
    fn update(&mut self, reservation: IpReservation) -> Result<IpReservation, StoreError>;
}
