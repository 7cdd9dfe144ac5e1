use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use headspace_client::config::RetryConfig;
use headspace_client::pending::PendingDraftStore;
use headspace_client::transport::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};
use headspace_client::{ActionOutcome, AgentActionClient, ApiErrorKind};
use tempfile::TempDir;

/// Transport that replays a scripted sequence of results and records the
/// requests it saw.
struct ScriptedTransport {
    script: Mutex<Vec<Result<ApiResponse, TransportError>>>,
    attempts: AtomicU32,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Result<ApiResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script),
            attempts: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            return Err(TransportError::Network("script exhausted".to_string()));
        }
        script.remove(0)
    }
}

fn response(status: u16, body: &str) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse {
        status,
        body: body.to_string(),
    })
}

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 3,
        base_delay_ms: 1,
    }
}

fn client_in(
    dir: &TempDir,
    transport: ScriptedTransport,
) -> AgentActionClient<ScriptedTransport> {
    let store = PendingDraftStore::with_path(dir.path().join("pending_drafts.json"));
    AgentActionClient::new(transport, fast_retry(), store)
}

#[tokio::test]
async fn test_respond_success_posts_to_respond_endpoint() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new(vec![response(200, r#"{"success": true}"#)]);
    let client = client_in(&dir, transport);

    let outcome = client.respond("agent-7", "looks good, continue").await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_respond_request_shape() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new(vec![response(
        200,
        r#"{"success": true}"#,
    )]));
    let store = PendingDraftStore::with_path(dir.path().join("pending_drafts.json"));
    let client = AgentActionClient::new(Arc::clone(&transport), fast_retry(), store);

    client.respond("agent-7", "hello").await;

    let seen = transport.requests.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::Post);
    assert_eq!(seen[0].path, "/api/agents/agent-7/respond");
    assert_eq!(seen[0].body.as_ref().unwrap()["text"], "hello");
}

#[tokio::test]
async fn test_focus_request_shape() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new(vec![response(
        200,
        r#"{"success": true}"#,
    )]));
    let store = PendingDraftStore::with_path(dir.path().join("pending_drafts.json"));
    let client = AgentActionClient::new(Arc::clone(&transport), fast_retry(), store);

    client.focus("agent-7").await;

    let seen = transport.requests.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::Post);
    assert_eq!(seen[0].path, "/api/agents/agent-7/focus");
}

#[tokio::test]
async fn test_respond_survives_transient_503s() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new(vec![
        response(503, ""),
        response(503, ""),
        response(200, r#"{"success": true}"#),
    ]);
    let client = client_in(&dir, transport);

    let outcome = client.respond("agent-7", "retry me").await;

    assert!(outcome.is_success());
    // No draft is stashed on success.
    let store = PendingDraftStore::with_path(dir.path().join("pending_drafts.json"));
    assert_eq!(store.peek("agent-7").await, None);
}

#[tokio::test]
async fn test_respond_exhaustion_stashes_draft() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new(vec![
        response(503, ""),
        response(503, ""),
        response(503, ""),
        response(503, ""),
    ]);
    let client = client_in(&dir, transport);

    let outcome = client.respond("agent-7", "please keep this").await;

    assert_eq!(
        outcome,
        ActionOutcome::Failed {
            kind: ApiErrorKind::Exhausted,
            message: ApiErrorKind::Exhausted.user_message().to_string(),
        }
    );

    let store = PendingDraftStore::with_path(dir.path().join("pending_drafts.json"));
    assert_eq!(
        store.take("agent-7").await.as_deref(),
        Some("please keep this")
    );
}

#[tokio::test]
async fn test_wrong_state_is_not_retried() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new(vec![response(
        409,
        r#"{"success": false, "error": "agent moved on", "error_type": "wrong_state"}"#,
    )]);
    let client = client_in(&dir, transport);

    let outcome = client.respond("agent-7", "too late").await;

    match outcome {
        ActionOutcome::Failed { kind, .. } => assert_eq!(kind, ApiErrorKind::WrongState),
        ActionOutcome::Success => panic!("expected failure"),
    }
}

#[tokio::test]
async fn test_unreachable_sub_kinds_classify_distinctly() {
    for (wire, expected) in [
        ("socket_missing", ApiErrorKind::SocketMissing),
        ("connection_refused", ApiErrorKind::ConnectionRefused),
        ("process_dead", ApiErrorKind::ProcessDead),
    ] {
        let dir = TempDir::new().unwrap();
        let body = format!(r#"{{"success": false, "error_type": "{wire}"}}"#);
        let transport = ScriptedTransport::new(vec![response(500, &body)]);
        let client = client_in(&dir, transport);

        match client.respond("agent-7", "x").await {
            ActionOutcome::Failed { kind, .. } => assert_eq!(kind, expected),
            ActionOutcome::Success => panic!("expected failure for {wire}"),
        }
    }
}

#[tokio::test]
async fn test_two_hundred_without_success_marker_is_a_failure() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new(vec![response(200, r#"{"status": "queued"}"#)]);
    let client = client_in(&dir, transport);

    match client.respond("agent-7", "x").await {
        ActionOutcome::Failed { kind, .. } => assert_eq!(kind, ApiErrorKind::Unclassified),
        ActionOutcome::Success => panic!("success marker missing should fail"),
    }
}

#[tokio::test]
async fn test_focus_failure_does_not_stash_draft() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new(vec![response(
        500,
        r#"{"success": false, "error_type": "process_dead"}"#,
    )]);
    let client = client_in(&dir, transport);

    let outcome = client.focus("agent-7").await;
    assert!(!outcome.is_success());

    let store = PendingDraftStore::with_path(dir.path().join("pending_drafts.json"));
    assert_eq!(store.peek("agent-7").await, None);
}
