//! In-memory credentials provider for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::credentials::Credentials;
use crate::traits::{CredentialsError, CredentialsProvider};

/// In-memory credentials provider.
///
/// Holds the single credential slot in memory, with the same
/// validate-on-save behavior as the file-backed provider. Intended for tests
/// of code that depends on the [`CredentialsProvider`] trait.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    slot: Arc<Mutex<Option<Credentials>>>,
    /// When set, every operation fails with this error.
    fail_with: Arc<Mutex<Option<CredentialsError>>>,
}

impl InMemoryCredentials {
    /// Create an empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider pre-loaded with credentials.
    pub fn with_credentials(creds: Credentials) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(creds))),
            fail_with: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent operation fail with the given error.
    pub fn fail_with(&self, err: CredentialsError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    fn check_failure(&self) -> Result<(), CredentialsError> {
        match self.fail_with.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentials {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        self.check_failure()?;
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        self.check_failure()?;
        creds.validate()?;
        *self.slot.lock().unwrap() = Some(creds.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        self.check_failure()?;
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
