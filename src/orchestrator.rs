//! Workflow orchestrator.
//!
//! Sequences the transition from "file selected" to "signature request
//! created": validate locally, upload the document, derive the redirect
//! reference, initiate the signature request, and normalize the provider's
//! response into a canonical [`SubmitResult`].
//!
//! Each step's failure aborts the sequence immediately. No rollback is
//! attempted: a remote document or request created before the failure is
//! left as-is, and the workflow stays resumable by signature id.

use bytes::Bytes;
use std::path::Path;
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::gateway::SigningGateway;
use crate::models::{SignerProfile, SubmitResult};
use crate::traits::{CredentialsProvider, HttpClient};

/// Upload size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name, including the `.pdf` extension.
    pub name: String,
    /// Raw file contents.
    pub bytes: Bytes,
}

impl UploadFile {
    /// Create an upload file from a name and raw bytes.
    pub fn new(name: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an upload file from disk, using the path's file name.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Validation(format!("invalid file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Validation(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(Self::new(name, Bytes::from(bytes)))
    }

    /// Validate file type and size. Checked before any network call.
    pub fn validate(&self) -> Result<()> {
        if !self.name.to_lowercase().ends_with(".pdf") {
            return Err(Error::Validation(
                "only PDF documents are supported".to_string(),
            ));
        }
        if self.bytes.is_empty() {
            return Err(Error::Validation("file is empty".to_string()));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(Error::Validation(
                "file size must be less than 10MB".to_string(),
            ));
        }
        Ok(())
    }
}

/// Orchestrates the upload → initiate workflow.
///
/// Owns a gateway and a credentials provider; the redirect origin is the
/// application origin the signer returns to after completing Aadhaar
/// verification.
#[derive(Debug)]
pub struct WorkflowOrchestrator<C: HttpClient, P: CredentialsProvider> {
    gateway: SigningGateway<C>,
    credentials: P,
    redirect_origin: String,
}

impl<C: HttpClient, P: CredentialsProvider> WorkflowOrchestrator<C, P> {
    /// Create an orchestrator.
    ///
    /// `redirect_origin` is the scheme+host(+port) the completion redirect is
    /// built from, e.g. `https://app.example.com`.
    pub fn new(
        gateway: SigningGateway<C>,
        credentials: P,
        redirect_origin: impl Into<String>,
    ) -> Self {
        let mut redirect_origin = redirect_origin.into();
        while redirect_origin.ends_with('/') {
            redirect_origin.pop();
        }
        Self {
            gateway,
            credentials,
            redirect_origin,
        }
    }

    /// The gateway this orchestrator drives.
    pub fn gateway(&self) -> &SigningGateway<C> {
        &self.gateway
    }

    /// The URL the signing UI redirects the signer to on completion.
    pub fn redirect_url(&self) -> String {
        format!("{}/upload?completed=true", self.redirect_origin)
    }

    /// Load the stored credential triple, validated, for follow-up calls
    /// (status polling, download).
    pub async fn load_credentials(&self) -> Result<Credentials> {
        self.require_credentials().await
    }

    /// Load and check the credential triple, failing fast before any
    /// network call.
    async fn require_credentials(&self) -> Result<Credentials> {
        let creds = self.credentials.load().await?.ok_or_else(|| {
            Error::Configuration(
                "no credentials found; configure API credentials first".to_string(),
            )
        })?;
        if !creds.is_complete() {
            return Err(Error::Configuration(
                "stored credentials are incomplete".to_string(),
            ));
        }
        Ok(creds)
    }

    /// Run the upload → initiate sequence.
    ///
    /// See [`submit_with_progress`](Self::submit_with_progress) for the
    /// variant reporting progress checkpoints.
    pub async fn submit(&self, file: &UploadFile) -> Result<SubmitResult> {
        self.submit_with_progress(file, |_| {}).await
    }

    /// Run the upload → initiate sequence, reporting discrete percentage
    /// checkpoints (25/50/75/100) for caller-visible feedback.
    ///
    /// The checkpoints are UI hints, not part of the correctness contract.
    pub async fn submit_with_progress(
        &self,
        file: &UploadFile,
        mut on_progress: impl FnMut(u8),
    ) -> Result<SubmitResult> {
        let creds = self.require_credentials().await?;
        file.validate()?;
        on_progress(25);

        let document = self
            .gateway
            .upload_document(&creds, &file.name, file.bytes.clone())
            .await?;
        let document_id = document
            .document_id()
            .ok_or_else(|| Error::Protocol("no document ID received from upload".to_string()))?
            .to_string();
        on_progress(50);

        let redirect_url = self.redirect_url();
        debug!(%document_id, %redirect_url, "document uploaded, initiating signature");
        on_progress(75);

        // Hard-coded demo signer profile; real signer collection is out of
        // scope for this workflow.
        let signers = [SignerProfile::demo()];
        let request = self
            .gateway
            .initiate_signature(&creds, &document_id, &redirect_url, &signers)
            .await?;

        let signature_url = request.signature_url().map(str::to_string);
        if signature_url.is_none() {
            // Some provider flows omit the signer URL; not an error.
            warn!(signature_id = %request.id, "initiate response carried no signer URL");
        }
        on_progress(100);

        Ok(SubmitResult {
            document_id,
            signature_id: request.id,
            signature_url,
            status: request.status,
        })
    }
}
