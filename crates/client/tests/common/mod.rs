//! In-process stub of the ShelfLife backend for integration tests.
//!
//! [`StubBackend`] answers canned `(status, body)` pairs per method + path,
//! optionally after a delay, and records every request it receives so
//! tests can inspect headers and bodies. The app crate's tests include
//! this module too.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use shelflife_client::{CallContext, ClientConfig, Credentials, ShelfLifeApi};

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("recorded body should be JSON")
    }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
    delay: Duration,
}

type Routes = HashMap<(String, String), Canned>;

#[derive(Clone, Default)]
pub struct StubBackend {
    routes: Arc<Mutex<Routes>>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a raw `body`.
    pub fn respond(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.respond_after(method, path, status, body, Duration::ZERO)
    }

    /// Like [`respond`](Self::respond), but the answer is held back for
    /// `delay`.
    pub fn respond_after(
        self,
        method: Method,
        path: &str,
        status: u16,
        body: &str,
        delay: Duration,
    ) -> Self {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Canned {
                status,
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond_json(
        self,
        method: Method,
        path: &str,
        status: u16,
        body: serde_json::Value,
    ) -> Self {
        self.respond(method, path, status, &body.to_string())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    /// `"METHOD path"` for every request received, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Bind to an ephemeral port and serve in the background.
    pub async fn spawn(&self) -> String {
        let router = Router::new().fallback(handle).with_state(self.clone());
        spawn_router(router).await
    }
}

async fn handle(
    State(stub): State<StubBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    stub.recorded.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        content_type: header(CONTENT_TYPE),
        authorization: header(AUTHORIZATION),
        body,
    });

    let canned = stub
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    match canned {
        Some(canned) => {
            tokio::time::sleep(canned.delay).await;
            (StatusCode::from_u16(canned.status).unwrap(), canned.body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no stub route").into_response(),
    }
}

/// Serve an arbitrary router on `127.0.0.1:0`, returning its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn dead_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn api(base_url: &str) -> ShelfLifeApi {
    let config = ClientConfig {
        api_base: base_url.to_string(),
        request_timeout_secs: 5,
        ..ClientConfig::default()
    };
    ShelfLifeApi::new(&config).unwrap()
}

pub fn anonymous() -> CallContext {
    CallContext::default()
}

pub fn with_token(token: &str) -> CallContext {
    CallContext {
        credentials: Credentials::bearer(token),
        ..CallContext::default()
    }
}
