use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use pnet::util::MacAddr;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Canonical textual form of a hardware address: lowercase, colon separated.
pub fn canonical(mac: &MacAddr) -> String {
    mac.to_string()
}

/// Parses `aa:bb:cc:dd:ee:ff` style input into a [`MacAddr`].
///
/// Upper and lower case hex are both accepted; the result always prints in
/// canonical (lowercase) form.
pub fn parse_mac(s: &str) -> Result<MacAddr, String> {
    MacAddr::from_str(s.trim()).map_err(|_| format!("invalid hardware address: {s}"))
}

/// A set of hardware addresses keyed by their canonical string.
///
/// Two addresses are the same member when their canonical forms match.
/// Iteration follows canonical sort order, so `members()` and `first()` are
/// stable across runs and platforms.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HardwareAddressSet {
    entries: BTreeMap<String, MacAddr>,
}

impl HardwareAddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts every address, overwriting on duplicate canonical keys.
    pub fn add<I>(&mut self, macs: I)
    where
        I: IntoIterator<Item = MacAddr>,
    {
        for mac in macs {
            self.entries.insert(canonical(&mac), mac);
        }
    }

    /// Returns a fresh set holding the members of both operands.
    pub fn union(&self, other: &HardwareAddressSet) -> HardwareAddressSet {
        let mut union = self.clone();
        union.add(other.members());
        union
    }

    pub fn members(&self) -> Vec<MacAddr> {
        self.entries.values().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacAddr> {
        self.entries.values()
    }

    /// The first member in canonical order.
    pub fn first(&self) -> Option<MacAddr> {
        self.entries.values().next().copied()
    }

    pub fn contains(&self, mac: &MacAddr) -> bool {
        self.entries.contains_key(&canonical(mac))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<MacAddr> for HardwareAddressSet {
    fn from_iter<T: IntoIterator<Item = MacAddr>>(iter: T) -> Self {
        let mut set = HardwareAddressSet::new();
        set.add(iter);
        set
    }
}

impl fmt::Display for HardwareAddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        write!(f, "{{{}}}", joined.join(", "))
    }
}

impl Serialize for HardwareAddressSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for key in self.entries.keys() {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for HardwareAddressSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = HardwareAddressSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of hardware addresses")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut set = HardwareAddressSet::new();
                while let Some(raw) = seq.next_element::<String>()? {
                    let mac = parse_mac(&raw).map_err(de::Error::custom)?;
                    set.add([mac]);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor)
    }
}

/// `#[serde(with = "...")]` helper for single [`MacAddr`] fields.
pub mod serde_mac {
    use super::*;

    pub fn serialize<S: Serializer>(mac: &MacAddr, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&canonical(mac))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MacAddr, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_mac(&raw).map_err(de::Error::custom)
    }
}

// ╔════════════════════════════════════════════╗
// ║                   TESTS                    ║
// ╚════════════════════════════════════════════╝
