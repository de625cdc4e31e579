// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::config::settings::ClientConfig;
use crate::error::TransportError;
use crate::sources::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::utils::constants::TOKEN_PATH;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Config with fixed test credentials (`Basic aWQ6c2VjcmV0`) pointing at local servers.
pub fn test_config(base_url: impl Into<String>, base_auth_url: impl Into<String>) -> ClientConfig {
    ClientConfig::new("acc-1", "id", "secret")
        .with_base_url(base_url)
        .with_base_auth_url(base_auth_url)
}

pub fn response(status: StatusCode, body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        headers: HeaderMap::new(),
        body,
    })
}

/// In-memory transport.
///
/// Token requests are answered with `tok-1`, `tok-2`, ... after `token_delay`.
/// API requests pop the next scripted reply (200 `{}` once the script runs out).
#[derive(Default)]
pub struct ScriptedTransport {
    pub token_delay: Duration,
    pub token_calls: AtomicUsize,
    pub api_calls: AtomicUsize,
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn with_token_delay(mut self, delay: Duration) -> Self {
        self.token_delay = delay;
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
    }

    /// Authorization headers of the API requests, in order.
    pub fn api_authorizations(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.path != TOKEN_PATH)
            .map(|request| {
                request.headers["authorization"]
                    .to_str()
                    .unwrap()
                    .to_owned()
            })
            .collect()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let is_token = request.path == TOKEN_PATH;
        self.seen.lock().unwrap().push(request);

        if is_token {
            let n = self.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.token_delay).await;
            return response(StatusCode::OK, json!({"access_token": format!("tok-{}", n)}));
        }

        self.api_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| response(StatusCode::OK, json!({})))
    }
}
