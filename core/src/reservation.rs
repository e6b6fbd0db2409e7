//! Maintenance of individual reservations, addressed by IP.

use std::net::IpAddr;

use invctl_common::error::InventoryError;
use invctl_common::inventory::reservation::IpReservation;
use invctl_common::ports::outbound::reservation_store::ReservationStore;
use tracing::info;

pub fn show_reservation<S: ReservationStore + ?Sized>(
    store: &S,
    ip: IpAddr,
) -> Result<IpReservation, InventoryError> {
    store
        .get_by_ip(ip)
        .map_err(|e| InventoryError::store("look up reservation by ip", e))?
        .ok_or(InventoryError::ReservationNotFound { ip })
}

/// Deletes the reservation for `ip` and returns what was removed.
pub fn release_reservation<S: ReservationStore + ?Sized>(
    store: &mut S,
    ip: IpAddr,
) -> Result<IpReservation, InventoryError> {
    let reservation = show_reservation(&*store, ip)?;
    store
        .delete(&reservation)
        .map_err(|e| InventoryError::store("delete reservation", e))?;
    info!("Released {} held by {}", reservation.ip, reservation.mac);
    Ok(reservation)
}

/// Clears the lease end so the reservation never expires.
pub fn make_static<S: ReservationStore + ?Sized>(
    store: &mut S,
    ip: IpAddr,
) -> Result<IpReservation, InventoryError> {
    let mut reservation = show_reservation(&*store, ip)?;
    if reservation.is_static() {
        return Ok(reservation);
    }
    reservation.make_static();
    let updated = store
        .update(reservation)
        .map_err(|e| InventoryError::store("update reservation", e))?;
    info!("Reservation for {} is now static", updated.ip);
    Ok(updated)
}
