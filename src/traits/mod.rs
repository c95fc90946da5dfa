//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for the seams of the
//! workflow: outbound HTTP and credential storage.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, multipart POST)
//! - [`CredentialsProvider`] - Credentials storage and retrieval

pub mod credentials;
pub mod http;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{Headers, HttpClient, HttpError, MultipartPart, Response};
