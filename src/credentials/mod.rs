//! CredentialService - Vendor Account Links
//!
//! ## Responsibilities
//!
//! - Hash passwords (argon2, salted) before anything reaches the store
//! - Persist the opaque vendor session token earned at verify time
//! - Report link status for the UI
//!
//! The plaintext password is never persisted. Sync runs authenticate
//! with the stored session token; a stale token surfaces as 401 and
//! the client re-prompts.

use crate::error::{Error, Result};
use crate::store::{StoredCredentials, TrailStore};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Link status summary for the UI
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub linked: bool,
    pub username: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
}

/// CredentialService
pub struct CredentialService {
    store: Arc<dyn TrailStore>,
}

impl CredentialService {
    /// Create new service
    pub fn new(store: Arc<dyn TrailStore>) -> Self {
        Self { store }
    }

    /// Hash a password into its salted PHC string form
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Credential(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC hash
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(stored_hash).map_err(|e| Error::Credential(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Persist the link after a successful vendor login
    pub async fn save(
        &self,
        user_id: &str,
        username: &str,
        password: &str,
        session_token: String,
    ) -> Result<StoredCredentials> {
        let creds = StoredCredentials {
            user_id: user_id.to_string(),
            username: username.to_string(),
            password_hash: self.hash_password(password)?,
            session_token,
            last_sync: Some(Utc::now()),
        };
        self.store.save_credentials(&creds).await?;

        tracing::info!(
            user_id = %user_id,
            username = %username,
            "Vendor credentials saved"
        );
        Ok(creds)
    }

    pub async fn load(&self, user_id: &str) -> Result<Option<StoredCredentials>> {
        self.store.load_credentials(user_id).await
    }

    /// Stamp last_sync after a completed sync run
    pub async fn touch_sync(&self, user_id: &str, at: DateTime<Utc>) -> Result<()> {
        self.store.touch_credentials_sync(user_id, at).await
    }

    /// Link status for the UI
    pub async fn status(&self, user_id: &str) -> Result<CredentialStatus> {
        Ok(match self.store.load_credentials(user_id).await? {
            Some(c) => CredentialStatus {
                linked: true,
                username: Some(c.username),
                last_sync: c.last_sync,
            },
            None => CredentialStatus {
                linked: false,
                username: None,
                last_sync: None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn service() -> CredentialService {
        CredentialService::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn hash_is_salted_and_verifiable() {
        let service = service();
        let hash = service.hash_password("p").unwrap();

        assert_ne!(hash, "p");
        assert!(hash.starts_with("$argon2"));
        assert!(service.verify_password("p", &hash).unwrap());
        assert!(!service.verify_password("wrong", &hash).unwrap());

        // Fresh salt per hash
        let second = service.hash_password("p").unwrap();
        assert_ne!(hash, second);
    }

    #[tokio::test]
    async fn save_persists_hash_not_plaintext() {
        let service = service();
        service
            .save("u1", "u", "p", "token-1".to_string())
            .await
            .unwrap();

        let stored = service.load("u1").await.unwrap().unwrap();
        assert_eq!(stored.username, "u");
        assert_ne!(stored.password_hash, "p");
        assert_eq!(stored.session_token, "token-1");
        assert!(service.verify_password("p", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn status_reports_link_state() {
        let service = service();
        let before = service.status("u1").await.unwrap();
        assert!(!before.linked);

        service
            .save("u1", "u", "p", "token-1".to_string())
            .await
            .unwrap();
        let after = service.status("u1").await.unwrap();
        assert!(after.linked);
        assert_eq!(after.username.as_deref(), Some("u"));
        assert!(after.last_sync.is_some());
    }
}
