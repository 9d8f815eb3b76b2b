//! Runtime context injected into the Station actor.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, PoisonError};

/// Station policy plus the generator behind every unlock code.
///
/// The actor only ever touches the generator from its own task, so the mutex is never
/// contended; it is there because hooks receive the context by shared reference.
pub struct StationContext {
    pub max_slots: u32,
    codes: Mutex<StdRng>,
}

impl StationContext {
    pub fn new(max_slots: u32) -> Self {
        Self {
            max_slots,
            codes: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible unlock codes, for tests and demos.
    pub fn seeded(max_slots: u32, seed: u64) -> Self {
        Self {
            max_slots,
            codes: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn with_codes<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.codes.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}
