//! Type-safe identifiers.
//!
//! Bikes, stations and members carry natural keys chosen by whoever registers them.
//! Rentals are numbered by the rental ledger.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BikeId(pub String);

impl From<&str> for BikeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for BikeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Station names are unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationName(pub String);

impl From<&str> for StationName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl Display for StationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger number of a rental, assigned by the rental actor starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentalId(pub u64);

impl From<u64> for RentalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for RentalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rental_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(RentalId(7).to_string(), "rental_7");
        assert_eq!(StationName::from("Central").to_string(), "Central");
        assert_eq!(MemberId::from("M-1").to_string(), "M-1");
    }

    #[test]
    fn test_ordering_follows_inner_value() {
        assert!(RentalId(2) < RentalId(10));
        assert!(BikeId::from("B-1") < BikeId::from("B-2"));
    }
}
