use authz_engine::{EngineConfig, EngineError, PolicyEngine, SchemaWriteRequest, SpiceDbClient};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SpiceDbClient {
    SpiceDbClient::new(EngineConfig {
        endpoint: server.uri(),
        preshared_key: "somerandomkeyhere".into(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn request() -> SchemaWriteRequest {
    SchemaWriteRequest::new("definition user {}\n")
}

// ── Construction ────────────────────────────────────────────────

#[test]
fn new_rejects_invalid_config() {
    let result = SpiceDbClient::new(EngineConfig::default());
    assert!(matches!(result, Err(EngineError::Config(_))));
}

#[test]
fn backend_name() {
    let client = SpiceDbClient::new(EngineConfig {
        preshared_key: "k".into(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(client.backend_name(), "spicedb");
    assert_eq!(client.endpoint(), "http://localhost:8443");
}

// ── write_schema ────────────────────────────────────────────────

#[tokio::test]
async fn write_schema_sends_body_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/schema/write"))
        .and(header("authorization", "Bearer somerandomkeyhere"))
        .and(body_json(serde_json::json!({ "schema": "definition user {}\n" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "writtenAt": { "token": "GhUKEzE3MDAwMDAwMDA=" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).write_schema(&request()).await.unwrap();
    assert_eq!(response.written_at.unwrap().token, "GhUKEzE3MDAwMDAwMDA=");
}

#[tokio::test]
async fn write_schema_accepts_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/schema/write"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let response = client_for(&server).write_schema(&request()).await.unwrap();
    assert!(response.written_at.is_none());
}

#[tokio::test]
async fn write_schema_invalid_schema_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/schema/write"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": 3,
            "message": "error parsing schema: Unexpected token",
            "details": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).write_schema(&request()).await.unwrap_err();
    assert!(err.is_rejection());
    match err {
        EngineError::Rejected { status, code, message } => {
            assert_eq!(status, 400);
            assert_eq!(code, 3);
            assert_eq!(message, "error parsing schema: Unexpected token");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn write_schema_plain_text_error_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).write_schema(&request()).await.unwrap_err();
    match err {
        EngineError::Rejected { status, code, message } => {
            assert_eq!(status, 503);
            assert_eq!(code, 0);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn write_schema_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "code": 16,
            "message": "invalid preshared key"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).write_schema(&request()).await.unwrap_err();
    assert!(matches!(err, EngineError::AuthFailed(ref m) if m == "invalid preshared key"));
    assert!(!err.is_rejection());
}

#[tokio::test]
async fn write_schema_garbage_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).write_schema(&request()).await.unwrap_err();
    assert!(matches!(err, EngineError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn write_schema_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = SpiceDbClient::new(EngineConfig {
        endpoint: server.uri(),
        preshared_key: "k".into(),
        timeout_secs: 1,
    })
    .unwrap();

    let err = client.write_schema(&request()).await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn write_schema_connection_refused() {
    // Nothing listens on port 9 on a test host.
    let client = SpiceDbClient::new(EngineConfig {
        endpoint: "http://127.0.0.1:9".into(),
        preshared_key: "k".into(),
        timeout_secs: 2,
    })
    .unwrap();

    let err = client.write_schema(&request()).await.unwrap_err();
    assert!(matches!(err, EngineError::Http(_)));
}
