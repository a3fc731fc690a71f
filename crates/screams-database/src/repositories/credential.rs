//! Credential repository implementation.

use screams_core::result::AppResult;
use screams_entity::Credential;

use super::fetch;
use crate::provider::DocumentDatabase;

/// Repository for login credentials.
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    db: DocumentDatabase,
}

impl CredentialRepository {
    /// Create a new credential repository.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }

    /// Find a credential by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>> {
        fetch(&self.db, &Credential::key_for(email)).await
    }
}
