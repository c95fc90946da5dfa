//! Remote signing gateway.
//!
//! Thin request/response adapter translating local calls into the provider's
//! four remote operations: upload document, initiate signature, fetch
//! signature status, download signed document. Every call attaches the
//! credential triple as request headers and surfaces non-2xx responses as
//! [`Error::Gateway`] with the remote's status and body intact.

use bytes::Bytes;
use serde_json::json;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::models::{Document, SignatureRequest, SignerProfile};
use crate::traits::{Headers, HttpClient, MultipartPart, Response};

/// Default base URL for the provider's sandbox environment.
pub const DEFAULT_BASE_URL: &str = "https://dg-sandbox.setu.co/api";

/// Gateway to the remote signing provider.
///
/// Generic over [`HttpClient`] so tests can drive it with a mock transport
/// while production uses the reqwest adapter.
#[derive(Debug, Clone)]
pub struct SigningGateway<C: HttpClient> {
    base_url: String,
    http: C,
}

impl<C: HttpClient> SigningGateway<C> {
    /// Create a gateway against the default sandbox base URL.
    pub fn new(http: C) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, http)
    }

    /// Create a gateway against a custom base URL (e.g. a test server).
    pub fn with_base_url(base_url: impl Into<String>, http: C) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credential headers attached to every remote call.
    fn auth_headers(credentials: &Credentials) -> Headers {
        let mut headers = Headers::new();
        headers.insert("x-client-id".to_string(), credentials.client_id.clone());
        headers.insert(
            "x-client-secret".to_string(),
            credentials.client_secret.clone(),
        );
        headers.insert(
            "x-product-instance-id".to_string(),
            credentials.product_instance_id.clone(),
        );
        headers
    }

    /// Reject non-2xx responses, echoing the remote's status and body.
    fn check_status(response: Response) -> Result<Response> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::Gateway {
                status: response.status,
                body: response.text(),
            })
        }
    }

    /// Parse a 2xx JSON body, mapping decode failure to a protocol error.
    fn parse_json<T: serde::de::DeserializeOwned>(response: &Response) -> Result<T> {
        response
            .json()
            .map_err(|e| Error::Protocol(format!("malformed response body: {}", e)))
    }

    /// Upload a PDF document to the provider's document store.
    ///
    /// Sends the bytes as a named binary part with a declared PDF content
    /// type alongside a text `name` field.
    pub async fn upload_document(
        &self,
        credentials: &Credentials,
        file_name: &str,
        file_bytes: Bytes,
    ) -> Result<Document> {
        let url = format!("{}/documents", self.base_url);
        debug!(file_name, size = file_bytes.len(), "uploading document");

        let parts = vec![
            MultipartPart::text("name", file_name),
            MultipartPart::file("document", file_name, "application/pdf", file_bytes),
        ];
        let response = self
            .http
            .post_multipart(&url, parts, &Self::auth_headers(credentials))
            .await?;
        let response = Self::check_status(response)?;
        Self::parse_json(&response)
    }

    /// Initiate a signature request for an uploaded document.
    ///
    /// The provider creates a trackable signing session and, when signer info
    /// includes contact data, may notify the signer out of band; this client
    /// treats that as opaque.
    pub async fn initiate_signature(
        &self,
        credentials: &Credentials,
        document_id: &str,
        redirect_url: &str,
        signers: &[SignerProfile],
    ) -> Result<SignatureRequest> {
        let url = format!("{}/signature", self.base_url);
        debug!(document_id, redirect_url, "initiating signature request");

        let payload = json!({
            "documentId": document_id,
            "redirectUrl": redirect_url,
            "signers": signers,
        });
        let mut headers = Self::auth_headers(credentials);
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = self.http.post(&url, &payload.to_string(), &headers).await?;
        let response = Self::check_status(response)?;
        Self::parse_json(&response)
    }

    /// Fetch the current status of a signature request.
    ///
    /// No side effects; safe to call arbitrarily often.
    pub async fn get_status(
        &self,
        credentials: &Credentials,
        signature_id: &str,
    ) -> Result<SignatureRequest> {
        let url = format!("{}/signature/{}", self.base_url, signature_id);
        let response = self
            .http
            .get(&url, &Self::auth_headers(credentials))
            .await?;
        let response = Self::check_status(response)?;
        Self::parse_json(&response)
    }

    /// Download the signed document.
    ///
    /// Returns the raw PDF bytes untouched. The remote rejects the call with
    /// a non-2xx response while the signature is not yet complete, which
    /// surfaces here as [`Error::Gateway`].
    pub async fn download_document(
        &self,
        credentials: &Credentials,
        signature_id: &str,
    ) -> Result<Bytes> {
        let url = format!("{}/signature/{}/download", self.base_url, signature_id);
        debug!(signature_id, "downloading signed document");

        let response = self
            .http
            .get(&url, &Self::auth_headers(credentials))
            .await?;
        let response = Self::check_status(response)?;
        Ok(response.body)
    }
}
