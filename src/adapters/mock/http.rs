//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, MultipartPart, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for plain POST requests)
    pub body: Option<String>,
    /// Multipart parts (for multipart POST requests)
    pub parts: Option<Vec<MultipartPart>>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
}

/// Mock HTTP client for testing.
///
/// This client can be configured to return specific responses for URLs,
/// allowing tests to verify HTTP interactions without network access.
/// Responses queued with [`push_response`](Self::push_response) are consumed
/// in order, which lets a test script a polling sequence (pending, pending,
/// completed) against a single URL.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Queued responses by exact URL, consumed front-first
    queues: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    /// Sticky responses by exact URL, used when the queue is empty
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a sticky response for a specific URL.
    ///
    /// The URL is matched exactly; the response is returned on every
    /// subsequent request to that URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Queue a one-shot response for a specific URL.
    ///
    /// Queued responses are consumed in FIFO order before any sticky or
    /// default response is considered.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        let mut queues = self.queues.lock().unwrap();
        queues.entry(url.to_string()).or_default().push_back(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Record a request.
    fn record_request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<String>,
        parts: Option<Vec<MultipartPart>>,
    ) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
            parts,
        });
    }

    /// Resolve the configured response for a URL.
    fn resolve(&self, url: &str) -> Result<Response, HttpError> {
        if let Some(queue) = self.queues.lock().unwrap().get_mut(url) {
            if let Some(response) = queue.pop_front() {
                return Self::unwrap_mock(response);
            }
        }
        if let Some(response) = self.responses.lock().unwrap().get(url) {
            return Self::unwrap_mock(response.clone());
        }
        if let Some(response) = self.default_response.lock().unwrap().clone() {
            return Self::unwrap_mock(response);
        }
        Err(HttpError::Other(format!(
            "no mock response configured for {}",
            url
        )))
    }

    fn unwrap_mock(response: MockResponse) -> Result<Response, HttpError> {
        match response {
            MockResponse::Success(r) => Ok(r),
            MockResponse::Error(e) => Err(e),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None, None);
        self.resolve(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);
        self.resolve(url)
    }

    async fn post_multipart(
        &self,
        url: &str,
        parts: Vec<MultipartPart>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, None, Some(parts));
        self.resolve(url)
    }
}
