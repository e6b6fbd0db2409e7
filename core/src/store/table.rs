use std::collections::HashSet;
use std::net::IpAddr;

use chrono::{Duration, Utc};
use invctl_common::error::StoreError;
use invctl_common::inventory::reservation::IpReservation;
use invctl_common::network::mac::canonical;
use invctl_common::ports::outbound::reservation_store::ReservationStore;
use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};

/// Lease length given to reservations created through the table.
pub const DEFAULT_LEASE_DAYS: i64 = 7;

/// Reservations held in memory, at most one per IP.
///
/// The constraint holds for every way a table is built, deserialization
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IpReservation>", into = "Vec<IpReservation>")]
pub struct ReservationTable {
    entries: Vec<IpReservation>,
}

impl ReservationTable {
    pub fn iter(&self) -> impl Iterator<Item = &IpReservation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, ip: IpAddr) -> Option<usize> {
        self.entries.iter().position(|entry| entry.ip == ip)
    }
}

impl TryFrom<Vec<IpReservation>> for ReservationTable {
    type Error = StoreError;

    /// Fails with [`StoreError::Conflict`] when an IP appears twice.
    fn try_from(entries: Vec<IpReservation>) -> Result<Self, Self::Error> {
        let mut seen: HashSet<IpAddr> = HashSet::with_capacity(entries.len());
        if let Some(dup) = entries.iter().find(|entry| !seen.insert(entry.ip)) {
            return Err(StoreError::Conflict(format!(
                "{} is reserved more than once",
                dup.ip
            )));
        }
        Ok(Self { entries })
    }
}

impl From<ReservationTable> for Vec<IpReservation> {
    fn from(table: ReservationTable) -> Self {
        table.entries
    }
}

impl ReservationStore for ReservationTable {
    fn get_by_ip(&self, ip: IpAddr) -> Result<Option<IpReservation>, StoreError> {
        Ok(self.position(ip).map(|idx| self.entries[idx].clone()))
    }

    fn get_by_mac(&self, mac: MacAddr) -> Result<Vec<IpReservation>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.mac == mac)
            .cloned()
            .collect())
    }

    fn delete(&mut self, reservation: &IpReservation) -> Result<(), StoreError> {
        let idx = self
            .entries
            .iter()
            .position(|entry| entry.ip == reservation.ip && entry.mac == reservation.mac)
            .ok_or_else(|| StoreError::NotFound {
                kind: "reservation",
                key: format!("{} ({})", reservation.ip, canonical(&reservation.mac)),
            })?;
        self.entries.remove(idx);
        Ok(())
    }

    fn create(&mut self, mac: MacAddr, ip: IpAddr) -> Result<IpReservation, StoreError> {
        if let Some(idx) = self.position(ip) {
            return Err(StoreError::Conflict(format!(
                "{} is already reserved by {}",
                ip, self.entries[idx].mac
            )));
        }
        let now = Utc::now();
        let mut reservation = IpReservation::new(ip, mac);
        reservation.start = Some(now);
        reservation.end = Some(now + Duration::days(DEFAULT_LEASE_DAYS));
        self.entries.push(reservation.clone());
        Ok(reservation)
    }

    fn update(&mut self, reservation: IpReservation) -> Result<IpReservation, StoreError> {
        let idx = self.position(reservation.ip).ok_or_else(|| StoreError::NotFound {
            kind: "reservation",
            key: reservation.ip.to_string(),
        })?;
        self.entries[idx] = reservation.clone();
        Ok(reservation)
    }
}
