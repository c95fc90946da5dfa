//! Credentials storage and management.
//!
//! This module provides functionality for storing and loading the eSign
//! provider credential triple from `~/.esign/.credentials.json`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::traits::CredentialsError;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".esign";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// The eSign provider credential triple.
///
/// All three fields are opaque secrets issued by the provider dashboard and
/// are attached as request metadata on every gateway call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// API client identifier.
    pub client_id: String,
    /// API client secret.
    pub client_secret: String,
    /// Product-instance identifier for the eSign product configuration.
    pub product_instance_id: String,
}

impl Credentials {
    /// Create a credential triple from its three parts.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        product_instance_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            product_instance_id: product_instance_id.into(),
        }
    }

    /// Check that all three fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.product_instance_id.is_empty()
    }

    /// Validate the triple, naming the first empty field.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.client_id.is_empty() {
            return Err(CredentialsError::Incomplete("clientId".to_string()));
        }
        if self.client_secret.is_empty() {
            return Err(CredentialsError::Incomplete("clientSecret".to_string()));
        }
        if self.product_instance_id.is_empty() {
            return Err(CredentialsError::Incomplete(
                "productInstanceId".to_string(),
            ));
        }
        Ok(())
    }
}

/// Manages credential storage and retrieval.
///
/// One named slot, last-write-wins. Credentials live in a dot-file under the
/// user's home directory and are only touched by explicit save/clear calls.
#[derive(Debug)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a new CredentialsManager rooted at the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let credentials_path = home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE);
        Some(Self { credentials_path })
    }

    /// Create a CredentialsManager with an explicit file path.
    pub fn with_path(credentials_path: PathBuf) -> Self {
        Self { credentials_path }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &PathBuf {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns `Ok(None)` if no credentials have been saved.
    pub fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.credentials_path)
            .map_err(|e| CredentialsError::Io(e.to_string()))?;
        let reader = BufReader::new(file);
        let creds: Credentials = serde_json::from_reader(reader)
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;
        Ok(Some(creds))
    }

    /// Save credentials to the credentials file, overwriting any existing slot.
    ///
    /// An incomplete triple is rejected before the file is touched. Creates
    /// the parent directory if it doesn't exist.
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        credentials.validate()?;

        if let Some(parent) = self.credentials_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| CredentialsError::Io(e.to_string()))?;
            }
        }

        let file = File::create(&self.credentials_path)
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;
        Ok(())
    }

    /// Clear the stored credentials.
    ///
    /// Removing an already-empty slot is not an error.
    pub fn clear(&self) -> Result<(), CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.credentials_path)
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> CredentialsManager {
        CredentialsManager::with_path(
            temp_dir.path().join(CREDENTIALS_DIR).join(CREDENTIALS_FILE),
        )
    }

    fn sample_credentials() -> Credentials {
        Credentials::new("client-1", "secret-1", "instance-1")
    }

    #[test]
    fn test_credentials_default_is_incomplete() {
        let creds = Credentials::default();
        assert!(!creds.is_complete());
        assert!(creds.validate().is_err());
    }

    #[test]
    fn test_credentials_complete() {
        let creds = sample_credentials();
        assert!(creds.is_complete());
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_validate_names_first_empty_field() {
        let creds = Credentials::new("client-1", "", "instance-1");
        let err = creds.validate().unwrap_err();
        assert!(err.to_string().contains("clientSecret"));

        let creds = Credentials::new("client-1", "secret-1", "");
        let err = creds.validate().unwrap_err();
        assert!(err.to_string().contains("productInstanceId"));
    }

    #[test]
    fn test_credentials_serde_camel_case() {
        let creds = sample_credentials();
        let json = serde_json::to_string(&creds).unwrap();
        assert!(json.contains("\"clientId\""));
        assert!(json.contains("\"clientSecret\""));
        assert!(json.contains("\"productInstanceId\""));
    }

    #[test]
    fn test_load_when_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        assert_eq!(manager.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let creds = sample_credentials();
        manager.save(&creds).unwrap();
        assert_eq!(manager.load().unwrap(), Some(creds));
    }

    #[test]
    fn test_save_overwrites_existing_slot() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        manager.save(&sample_credentials()).unwrap();
        let replacement = Credentials::new("client-2", "secret-2", "instance-2");
        manager.save(&replacement).unwrap();
        assert_eq!(manager.load().unwrap(), Some(replacement));
    }

    #[test]
    fn test_save_rejects_incomplete_triple_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let incomplete = Credentials::new("", "secret-1", "instance-1");
        let err = manager.save(&incomplete).unwrap_err();
        assert!(matches!(err, CredentialsError::Incomplete(_)));
        assert!(!manager.credentials_path().exists());
    }

    #[test]
    fn test_clear_then_load_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        manager.save(&sample_credentials()).unwrap();
        manager.clear().unwrap();
        assert_eq!(manager.load().unwrap(), None);
    }

    #[test]
    fn test_clear_when_already_empty_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        assert!(manager.clear().is_ok());
    }

    #[test]
    fn test_load_corrupt_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        fs::create_dir_all(manager.credentials_path().parent().unwrap()).unwrap();
        fs::write(manager.credentials_path(), "not json").unwrap();
        let err = manager.load().unwrap_err();
        assert!(matches!(err, CredentialsError::Serialization(_)));
    }
}
