//! Client library for Aadhaar eSign document signing workflows.
//!
//! Orchestrates the four-step lifecycle of one document-signing request
//! against a remote signing provider: upload a document, initiate a
//! signature request, poll for completion, and download the signed result.
//!
//! The remote boundary sits behind the [`traits::HttpClient`] seam so every
//! component can be driven by the mock transport in tests; production wiring
//! uses [`adapters::ReqwestHttpClient`] and [`adapters::FileCredentialsProvider`].

pub mod adapters;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod models;
pub mod orchestrator;
pub mod poller;
pub mod traits;

pub use credentials::{Credentials, CredentialsManager};
pub use error::{Error, Result};
pub use gateway::SigningGateway;
pub use models::{Document, SignatureRequest, Signer, SignerProfile, SubmitResult};
pub use orchestrator::{UploadFile, WorkflowOrchestrator, MAX_UPLOAD_BYTES};
pub use poller::{PollEvent, PollState, StatusPoller, POLL_INTERVAL};
