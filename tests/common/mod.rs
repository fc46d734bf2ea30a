#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use policy_gate::app::build_router;
use policy_gate::config::PolicySettings;
use policy_gate::services::audit::{AuditSink, DecisionRecord};
use policy_gate::services::auth::BearerLengthStub;
use policy_gate::services::gate::Gate;
use policy_gate::services::policy::{
    AuthorizationQuery, OpaPolicyClient, PolicyClient, PolicyOutcome,
};
use policy_gate::services::secrets::SecretProvider;
use policy_gate::state::AppState;
use tokio::sync::oneshot;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// fakes
// ---------------------------------------------------------------------------

/// Returns the same outcome for every query and remembers what it was asked.
pub struct ScriptedPolicy {
    outcome: PolicyOutcome,
    calls: AtomicUsize,
    queries: Mutex<Vec<AuthorizationQuery>>,
}

impl ScriptedPolicy {
    pub fn new(outcome: PolicyOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<AuthorizationQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PolicyClient for ScriptedPolicy {
    async fn evaluate(&self, query: &AuthorizationQuery) -> PolicyOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        self.outcome.clone()
    }
}

#[derive(Default)]
pub struct MemoryAudit(Mutex<Vec<DecisionRecord>>);

impl MemoryAudit {
    pub fn records(&self) -> Vec<DecisionRecord> {
        self.0.lock().unwrap().clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, record: &DecisionRecord) {
        self.0.lock().unwrap().push(record.clone());
    }
}

pub struct StaticSecrets(pub Option<String>);

impl SecretProvider for StaticSecrets {
    fn read(&self, _name: &str) -> Option<String> {
        self.0.clone()
    }
}

// ---------------------------------------------------------------------------
// app under test
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub audit: Arc<MemoryAudit>,
}

pub fn app_with_policy(policy: Arc<dyn PolicyClient>, secret: Option<&str>) -> TestApp {
    let audit = Arc::new(MemoryAudit::default());
    let gate = Gate::new(policy, audit.clone(), Arc::new(BearerLengthStub));
    let state = AppState::new(
        Arc::new(gate),
        Arc::new(StaticSecrets(secret.map(str::to_string))),
    );
    TestApp {
        router: build_router(state),
        audit,
    }
}

pub fn scripted_app(outcome: PolicyOutcome) -> (TestApp, Arc<ScriptedPolicy>) {
    let policy = Arc::new(ScriptedPolicy::new(outcome));
    (app_with_policy(policy.clone(), Some("s3cret")), policy)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    pub fn request_id(&self) -> &str {
        self.headers
            .get("x-request-id")
            .expect("x-request-id header")
            .to_str()
            .unwrap()
    }
}

pub async fn send(router: &Router, req: Request<Body>) -> TestResponse {
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ---------------------------------------------------------------------------
// mock policy engine
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }
}

struct MockState {
    reply: MockReply,
    captured: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn decision_handler(State(state): State<Arc<MockState>>, body: String) -> (StatusCode, String) {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        state.captured.lock().unwrap().push(value);
    }
    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }
    (state.reply.status, state.reply.body.clone())
}

pub struct MockPolicyServer {
    pub base_url: String,
    pub captured: Arc<Mutex<Vec<serde_json::Value>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for MockPolicyServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Serves `POST /v1/data/httpapi/allow` on an ephemeral port.
pub async fn spawn_policy_server(reply: MockReply) -> MockPolicyServer {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = Arc::new(MockState {
        reply,
        captured: captured.clone(),
    });
    let app = Router::new()
        .route("/v1/data/httpapi/allow", post(decision_handler))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });
    MockPolicyServer {
        base_url: format!("http://{addr}"),
        captured,
        shutdown: Some(tx),
    }
}

/// A base URL nothing listens on.
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn opa_client(base_url: &str, timeout: Duration) -> OpaPolicyClient {
    OpaPolicyClient::new(&PolicySettings::new(base_url, "httpapi/allow", timeout)).unwrap()
}
