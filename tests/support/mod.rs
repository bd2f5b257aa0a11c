// Shared helpers for spinning up the slides server against a stub inference backend.
#![allow(dead_code)]

use argon2::Params;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use slides_server::AppConfig;
use slides_server::frameworks::config::GeneratorMode;
use slides_server::interface_adapters::credentials::Argon2PasswordHasher;
use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

pub const ADMIN: (&str, &str) = ("teacher", "chalkboard");
pub const STUDENT: (&str, &str) = ("student", "homework");

// What the stub inference server answers to infer calls.
#[derive(Clone, Debug)]
pub enum StubReply {
    // Wrap this string as the `generated_text` output.
    Generated(String),
    // Return a well-formed envelope with only these outputs.
    Outputs(Value),
    Status(StatusCode),
    // Answer with an empty slide deck only after this long.
    Delay(Duration),
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    infer_calls: Arc<AtomicUsize>,
    last_request: Arc<std::sync::Mutex<Option<Value>>>,
}

pub struct StubInference {
    pub base_url: String,
    infer_calls: Arc<AtomicUsize>,
    last_request: Arc<std::sync::Mutex<Option<Value>>>,
}

impl StubInference {
    pub fn infer_calls(&self) -> usize {
        self.infer_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Value> {
        self.last_request
            .lock()
            .expect("stub request lock poisoned")
            .clone()
    }
}

async fn stub_live() -> StatusCode {
    StatusCode::OK
}

async fn stub_infer(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.infer_calls.fetch_add(1, Ordering::SeqCst);
    *state
        .last_request
        .lock()
        .expect("stub request lock poisoned") = Some(body);

    match state.reply {
        StubReply::Generated(text) => Json(json!({
            "model_name": "mixtral",
            "outputs": [{
                "name": "generated_text",
                "datatype": "BYTES",
                "shape": [1],
                "data": [text]
            }]
        }))
        .into_response(),
        StubReply::Outputs(outputs) => Json(json!({ "outputs": outputs })).into_response(),
        StubReply::Status(status) => (status, "stub failure").into_response(),
        StubReply::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({
                "outputs": [{ "name": "generated_text", "data": ["{\"slides\":[]}"] }]
            }))
            .into_response()
        }
    }
}

// Bind a stub KServe v2 server on an ephemeral port.
pub async fn spawn_stub_inference(reply: StubReply) -> StubInference {
    let infer_calls = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(std::sync::Mutex::new(None));
    let state = StubState {
        reply,
        infer_calls: Arc::clone(&infer_calls),
        last_request: Arc::clone(&last_request),
    };

    let router = Router::new()
        .route("/v2/health/live", get(stub_live))
        .route("/v2/models/{model}/infer", post(stub_infer))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral stub port");
    let addr = listener.local_addr().expect("get stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server failed");
    });

    StubInference {
        base_url: format!("http://{addr}"),
        infer_calls,
        last_request,
    }
}

// A port nothing listens on, for the unreachable backend case.
pub async fn unused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}")
}

// Users file with fast Argon2id hashes for the admin and student accounts.
pub fn write_users_file() -> PathBuf {
    let hasher =
        Argon2PasswordHasher::with_params(Params::new(1024, 1, 1, None).expect("valid params"));
    let users = json!([
        {
            "id": 1,
            "username": ADMIN.0,
            "password_hash": hasher.hash(ADMIN.1).expect("hash admin password"),
            "role": "admin"
        },
        {
            "id": 2,
            "username": STUDENT.0,
            "password_hash": hasher.hash(STUDENT.1).expect("hash student password"),
            "role": "user"
        }
    ]);

    let path = std::env::temp_dir().join(format!("slides-users-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, users.to_string()).expect("write users file");
    path
}

pub fn test_config(triton_url: &str, generator: GeneratorMode) -> AppConfig {
    AppConfig {
        http_port: 0,
        triton_url: triton_url.to_string(),
        generator,
        users_file: write_users_file(),
        jwt_secret: "integration-secret".to_string(),
        inference_timeout: Duration::from_secs(5),
        ..AppConfig::default()
    }
}

// Start the slides server on an ephemeral port and return its base URL.
pub async fn spawn_app(config: AppConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    // State is built inside `run`; wait for the startup liveness check to finish.
    tokio::spawn(async move {
        slides_server::run(listener, config)
            .await
            .expect("server failed");
    });

    let base_url = format!("http://{addr}");
    let client = reqwest::Client::new();
    for _ in 0..100 {
        if client
            .get(format!("{base_url}/api/status"))
            .send()
            .await
            .is_ok()
        {
            return base_url;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("slides server did not become ready at {base_url}");
}

pub async fn login(base_url: &str, (username, password): (&str, &str)) -> String {
    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request should succeed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.expect("login body should be json");
    body["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}
