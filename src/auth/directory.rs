//! Credential directory seam
//!
//! The security core does not own user storage. Lookups go through this
//! trait; the desktop shell wires in its directory and tests use an
//! in-memory one.

use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Credential record returned by a directory lookup
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Subject (account) id
    pub subject_id: String,
    /// Account email
    pub email: String,
    /// One-way hash of the account password
    pub password_hash: String,
    /// Role ids granted to the account
    pub roles: Vec<String>,
}

/// Lookup of credential records by email
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialLookup: Send + Sync {
    /// Find the record for an email, or `None` when no account exists
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>>;
}

/// In-memory credential directory
///
/// Backs the desktop shell's seeded accounts and test fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: HashMap<String, CredentialRecord>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any existing one for the same email
    pub fn insert(&mut self, record: CredentialRecord) {
        self.records.insert(record.email.clone(), record);
    }

    /// Builder-style insertion
    pub fn with_record(mut self, record: CredentialRecord) -> Self {
        self.insert(record);
        self
    }
}

#[async_trait]
impl CredentialLookup for StaticDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.records.get(email).cloned())
    }
}
