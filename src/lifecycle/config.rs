//! System settings loaded via OrthoConfig.
//!
//! Every value is optional; unset values fall back to the defaults below. Environment
//! variables use the `BIKESHARE_` prefix, e.g. `BIKESHARE_FREE_MINUTES=45`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Money, Station, Tariff};

const DEFAULT_FREE_MINUTES: u64 = 30;
const DEFAULT_RATE_CENTS_PER_MINUTE: u64 = 15;
const DEFAULT_MAILBOX_CAPACITY: usize = 32;
const DEFAULT_MAX_SLOTS_PER_STATION: u32 = 64;

#[derive(Debug, Error)]
#[error("Failed to load settings: {0}")]
pub struct SettingsError(String);

/// Configuration values for a [`BikeShareSystem`](super::BikeShareSystem).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BIKESHARE")]
pub struct BikeShareSettings {
    /// Minutes at the start of every rental that are not billed.
    pub free_minutes: Option<u64>,
    /// Price per billable minute, in cents.
    pub rate_cents_per_minute: Option<u64>,
    /// Channel capacity of each actor.
    pub mailbox_capacity: Option<usize>,
    /// Largest station that may be registered. Capped at [`Station::MAX_SLOTS`].
    pub max_slots_per_station: Option<u32>,
    /// Seed for unlock codes; unset means seeded from the OS.
    pub password_seed: Option<u64>,
}

impl BikeShareSettings {
    /// Loads settings from the environment and configuration files.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("bike-share")])
            .map_err(|e| SettingsError(e.to_string()))
    }

    /// Every value at its default, without reading the environment.
    pub fn builtin() -> Self {
        Self {
            free_minutes: None,
            rate_cents_per_minute: None,
            mailbox_capacity: None,
            max_slots_per_station: None,
            password_seed: None,
        }
    }

    pub fn tariff(&self) -> Tariff {
        Tariff {
            free_minutes: self.free_minutes.unwrap_or(DEFAULT_FREE_MINUTES),
            rate_per_minute: Money::from_cents(
                self.rate_cents_per_minute
                    .unwrap_or(DEFAULT_RATE_CENTS_PER_MINUTE),
            ),
        }
    }

    pub fn mailbox_capacity(&self) -> usize {
        self.mailbox_capacity
            .filter(|&capacity| capacity > 0)
            .unwrap_or(DEFAULT_MAILBOX_CAPACITY)
    }

    pub fn max_slots_per_station(&self) -> u32 {
        self.max_slots_per_station
            .unwrap_or(DEFAULT_MAX_SLOTS_PER_STATION)
            .min(Station::MAX_SLOTS)
    }
}
