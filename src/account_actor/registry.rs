//! Email uniqueness across accounts.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use super::AccountError;

/// Emails of every registered account, injected as the account actor's context.
///
/// The account actor handles one request at a time, so check-and-insert here is atomic
/// with respect to other registrations.
#[derive(Debug, Default)]
pub struct EmailRegistry {
    emails: Mutex<BTreeSet<String>>,
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl EmailRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&self, email: &str) -> Result<(), AccountError> {
        let mut emails = self.emails.lock().unwrap_or_else(PoisonError::into_inner);
        if !emails.insert(normalize(email)) {
            return Err(AccountError::DuplicateEmail(email.to_string()));
        }
        Ok(())
    }

    /// Moves a claim from `old` to `new`; on failure `old` stays claimed.
    pub fn swap(&self, old: &str, new: &str) -> Result<(), AccountError> {
        if normalize(old) == normalize(new) {
            return Ok(());
        }
        self.claim(new)?;
        self.release(old);
        Ok(())
    }

    pub fn release(&self, email: &str) {
        let mut emails = self.emails.lock().unwrap_or_else(PoisonError::into_inner);
        emails.remove(&normalize(email));
    }
}
