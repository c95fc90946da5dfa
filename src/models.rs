//! Wire models for the eSign provider API.
//!
//! Response shapes are deserialized tolerantly: the provider has shipped
//! records with fields renamed or omitted between flows, so everything
//! non-essential is `#[serde(default)]` and ids are checked at the point of
//! use rather than at parse time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal success statuses. `completed` and `sign_completed` are synonyms.
const COMPLETED_STATUSES: [&str; 2] = ["completed", "sign_completed"];

/// Terminal failure status.
const FAILED_STATUS: &str = "failed";

/// A document record returned by the upload operation.
///
/// The provider has returned the id under both `id` and `documentId`
/// depending on the flow; use [`Document::document_id`] to read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Provider-issued identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Alternate field the provider uses for the same identifier.
    #[serde(default)]
    pub document_id: Option<String>,
    /// File name as registered with the provider.
    #[serde(default)]
    pub name: Option<String>,
}

impl Document {
    /// The document identifier, whichever field the provider populated.
    pub fn document_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.document_id.as_deref())
    }
}

/// A signer entry within a signature record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    /// Provider-issued signer identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Signer status within this request.
    #[serde(default)]
    pub status: Option<String>,
    /// URL the signer visits to complete Aadhaar verification and sign.
    /// Some provider flows omit it.
    #[serde(default)]
    pub url: Option<String>,
}

/// The provider's tracked entity for one document's signing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    /// Provider-issued signature request identifier.
    pub id: String,
    /// The document this request signs.
    #[serde(default)]
    pub document_id: Option<String>,
    /// Current status. Free-form string; see the `is_*` helpers for the
    /// terminal members.
    #[serde(default)]
    pub status: String,
    /// When the request was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Set once the request reaches a terminal success state.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Signers attached to this request.
    #[serde(default)]
    pub signers: Vec<Signer>,
}

impl SignatureRequest {
    /// Whether the request reached a terminal success state.
    pub fn is_completed(&self) -> bool {
        let status = self.status.to_lowercase();
        COMPLETED_STATUSES.contains(&status.as_str())
    }

    /// Whether the request reached the terminal failure state.
    pub fn is_failed(&self) -> bool {
        self.status.to_lowercase() == FAILED_STATUS
    }

    /// Whether no further status transitions will occur for this request.
    /// Unknown statuses are in-progress, not terminal.
    pub fn is_terminal(&self) -> bool {
        self.is_completed() || self.is_failed()
    }

    /// The first signer's action URL, if the provider issued one.
    pub fn signature_url(&self) -> Option<&str> {
        self.signers.first().and_then(|s| s.url.as_deref())
    }
}

/// Placement of the signature block on the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePlacement {
    /// Block height in points.
    pub height: u32,
    /// Block width in points.
    pub width: u32,
    /// Pages carrying the block, as the provider expects them: strings.
    pub on_pages: Vec<String>,
    /// Anchor position, e.g. `bottom-left`.
    pub position: String,
}

/// Signer details submitted with an initiate call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignerProfile {
    /// Signer's registered identifier (phone number in the sandbox).
    pub identifier: String,
    /// Name shown in the signing UI.
    pub display_name: String,
    /// Birth year, provider-side identity check input.
    pub birth_year: String,
    /// Where the signature block lands on the document.
    pub signature: SignaturePlacement,
}

impl SignerProfile {
    /// The hard-coded sandbox signer used by the demo workflow.
    ///
    /// Stand-in for real signer-input collection; production flows should
    /// build their own profiles and pass them to the gateway directly.
    pub fn demo() -> Self {
        Self {
            identifier: "9876543210".to_string(),
            display_name: "Test Signer".to_string(),
            birth_year: "1991".to_string(),
            signature: SignaturePlacement {
                height: 60,
                width: 180,
                on_pages: vec!["1".to_string()],
                position: "bottom-left".to_string(),
            },
        }
    }
}

/// Canonical result of the upload → initiate workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    /// Identifier of the uploaded document.
    pub document_id: String,
    /// Identifier of the created signature request.
    pub signature_id: String,
    /// First signer's action URL, when the provider issued one.
    pub signature_url: Option<String>,
    /// Status of the signature request as created.
    pub status: String,
}
