//! Unified error taxonomy for the eSign workflow client.
//!
//! Every externally surfaced failure falls into one of the variants below.
//! Gateway rejections carry the remote's exact status code and raw body so a
//! human operator can diagnose a remote-side rejection without extra logging.

use thiserror::Error;

use crate::traits::{CredentialsError, HttpError};

/// Error type for all eSign client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials are missing or incomplete; raised before any network call.
    #[error("Credentials not configured: {0}")]
    Configuration(String),

    /// Input rejected locally (bad file type/size, missing required field);
    /// raised before any network call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Network-level failure (connection, timeout) with no remote response.
    #[error("Transport failure: {0}")]
    Transport(#[from] HttpError),

    /// The remote responded with a non-2xx status. The body is echoed
    /// verbatim, text or JSON, whichever the remote returned.
    #[error("Remote rejected request ({status}): {body}")]
    Gateway { status: u16, body: String },

    /// The remote's 2xx response is missing an expected field or cannot be
    /// parsed into the expected shape.
    #[error("Unexpected remote response: {0}")]
    Protocol(String),

    /// Credential storage failed (load/save/clear).
    #[error("Credential storage error: {0}")]
    Credentials(#[from] CredentialsError),
}

impl Error {
    /// The HTTP-like status carried by a gateway rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure occurred before any remote side effect.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::Validation(_) | Error::Credentials(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
