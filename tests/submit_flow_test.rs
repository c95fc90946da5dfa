//! End-to-end workflow tests: submit through the orchestrator, poll to
//! completion, download the signed document — all against a wiremock server
//! over the production reqwest adapter.

use std::time::Duration;

use bytes::Bytes;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use esign_client::adapters::{InMemoryCredentials, ReqwestHttpClient};
use esign_client::{
    Credentials, Error, PollEvent, PollState, SigningGateway, StatusPoller, UploadFile,
    WorkflowOrchestrator,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info,esign_client=debug")
        .try_init();
}

fn credentials() -> Credentials {
    Credentials::new("client-1", "secret-1", "instance-1")
}

fn orchestrator_for(
    server: &MockServer,
) -> WorkflowOrchestrator<ReqwestHttpClient, InMemoryCredentials> {
    init_tracing();
    WorkflowOrchestrator::new(
        SigningGateway::with_base_url(server.uri(), ReqwestHttpClient::new()),
        InMemoryCredentials::with_credentials(credentials()),
        "https://app.test",
    )
}

fn pdf_file() -> UploadFile {
    UploadFile::new("contract.pdf", Bytes::from_static(b"%PDF-1.4 test"))
}

async fn mount_happy_path(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "doc_1"})),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/signature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sig_1",
            "status": "SIGN_INITIATED",
            "signers": [{"url": "https://sign.example/x"}]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn submit_normalizes_provider_responses() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;

    let result = orchestrator_for(&server).submit(&pdf_file()).await.unwrap();

    assert_eq!(result.document_id, "doc_1");
    assert_eq!(result.signature_id, "sig_1");
    assert_eq!(result.signature_url.as_deref(), Some("https://sign.example/x"));
    assert_eq!(result.status, "SIGN_INITIATED");
}

#[tokio::test]
async fn submit_reports_progress_checkpoints() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;

    let mut checkpoints = Vec::new();
    orchestrator_for(&server)
        .submit_with_progress(&pdf_file(), |pct| checkpoints.push(pct))
        .await
        .unwrap();

    assert_eq!(checkpoints, vec![25, 50, 75, 100]);
}

#[tokio::test]
async fn submit_initiate_rejection_aborts_with_remote_diagnostics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "doc_1"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/signature"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"error":"signer identifier invalid"}"#),
        )
        .mount(&server)
        .await;

    let err = orchestrator_for(&server)
        .submit(&pdf_file())
        .await
        .unwrap_err();

    match err {
        Error::Gateway { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("signer identifier invalid"));
        }
        other => panic!("expected gateway error, got {:?}", other),
    }
}

#[tokio::test]
async fn poll_to_completion_then_download() {
    init_tracing();
    let server = MockServer::start().await;

    // Two pending ticks, then the terminal record takes over
    Mock::given(method("GET"))
        .and(path("/signature/sig_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sig_1",
            "status": "SIGN_INITIATED"
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/signature/sig_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sig_1",
            "status": "completed",
            "completedAt": "2024-03-01T10:05:00Z"
        })))
        .mount(&server)
        .await;
    let signed = b"%PDF-1.4 signed";
    Mock::given(method("GET"))
        .and(path("/signature/sig_1/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(signed.to_vec()),
        )
        .mount(&server)
        .await;

    let gateway = SigningGateway::with_base_url(server.uri(), ReqwestHttpClient::new());
    let poller = StatusPoller::with_interval(gateway.clone(), Duration::from_millis(20));

    let mut rx = poller.start(credentials(), "sig_1").unwrap();
    let mut snapshots = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            PollEvent::Snapshot(s) => snapshots.push(s),
            PollEvent::Failed(e) => panic!("unexpected poll failure: {}", e),
        }
    }

    assert_eq!(snapshots.len(), 3);
    assert!(snapshots.last().unwrap().is_completed());
    assert_eq!(poller.state(), PollState::Terminal);

    let bytes = gateway
        .download_document(&credentials(), "sig_1")
        .await
        .unwrap();
    assert_eq!(bytes, Bytes::from_static(signed));
}
