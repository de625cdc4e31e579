use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION};
use http::{HeaderMap, HeaderValue, StatusCode};
use tracing::{debug, warn};

use crate::cache::token::Token;
use crate::cache::token_cache::{IssuedToken, TokenCache};
use crate::config::settings::ClientConfig;
use crate::error::{AuthError, ZoomError};
use crate::executor::request::RequestDescriptor;
use crate::executor::response::ApiResponse;
use crate::helpers::time::get_instant;
use crate::observability::metrics::Metrics;
use crate::sources::account_credentials::AccountCredentialsSource;
use crate::sources::transport::{HttpRequest, HttpResponse, HttpTransport};

static TRANSPORT_MSG: &str = "transport";

/// Attaches the cached bearer token to each call and retries exactly once,
/// with a fresh token, when the API answers 401.
pub struct AuthenticatedExecutor<T: HttpTransport> {
    transport: T,
    token_source: AccountCredentialsSource,
    token_cache: TokenCache,
    base_url: String,
    timeout: Option<Duration>,
    metrics: Metrics,
}

/// Two-attempt state machine for one call.
#[derive(Debug)]
enum Attempt {
    Initial,
    RetriedAfterReset,
    Succeeded(ApiResponse),
    Failed(ZoomError),
}

impl Attempt {
    fn on_response(self, response: HttpResponse) -> Attempt {
        match (self, response.status) {
            (_, status) if status.is_success() => Attempt::Succeeded(response.into()),
            (Attempt::Initial, StatusCode::UNAUTHORIZED) => Attempt::RetriedAfterReset,
            (Attempt::RetriedAfterReset, StatusCode::UNAUTHORIZED) => {
                Attempt::Failed(ZoomError::AuthorizationRejected { body: response.body })
            }
            (_, status) => Attempt::Failed(ZoomError::Api {
                status,
                body: response.body,
            }),
        }
    }
}

impl<T: HttpTransport> AuthenticatedExecutor<T> {
    pub fn new(config: &ClientConfig, transport: T, metrics: Metrics) -> Self {
        Self {
            transport,
            token_source: AccountCredentialsSource::new(config),
            token_cache: TokenCache::new(),
            base_url: config.base_url.to_owned(),
            timeout: config.timeout_duration(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.token_cache
    }

    /// Token of the current generation, fetched once per generation.
    pub async fn token(&self) -> Result<IssuedToken, AuthError> {
        self.token_cache
            .get_or_fetch(|| async {
                self.metrics.token_fetch_requests.inc();
                self.token_source
                    .fetch_token(&self.transport)
                    .await
                    .inspect_err(|e| {
                        self.metrics
                            .token_fetch_failures
                            .with_label_values(&[failure_reason(e)])
                            .inc();
                    })
            })
            .await
    }

    pub fn reset_token(&self) -> u64 {
        self.metrics.token_resets.inc();
        self.token_cache.reset()
    }

    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<ApiResponse, ZoomError> {
        let mut attempt = Attempt::Initial;
        loop {
            attempt = match attempt {
                Attempt::Succeeded(response) => return Ok(response),
                Attempt::Failed(err) => {
                    if let Some(status) = err.status() {
                        self.metrics
                            .api_failures
                            .with_label_values(&[status.as_str()])
                            .inc();
                    }
                    return Err(err);
                }
                pending => {
                    let issued = self.token().await?;
                    let response = self.send(descriptor, &issued.token).await?;

                    if response.status == StatusCode::UNAUTHORIZED {
                        warn!(
                            method = %descriptor.method,
                            path = %descriptor.path,
                            generation = issued.generation,
                            "api rejected access token"
                        );
                        if self.token_cache.invalidate(issued.generation) {
                            self.metrics.token_resets.inc();
                        }
                    }

                    let next = pending.on_response(response);
                    if let Attempt::RetriedAfterReset = next {
                        self.metrics.auth_retries.inc();
                        debug!(path = %descriptor.path, "retrying once with a fresh token");
                    }
                    next
                }
            };
        }
    }

    async fn send(
        &self,
        descriptor: &RequestDescriptor,
        token: &Token,
    ) -> Result<HttpResponse, ZoomError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&token.bearer_authorization()).map_err(|_| {
            AuthError::MalformedResponse("access_token is not a valid header value".to_owned())
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let request = HttpRequest {
            method: descriptor.method.clone(),
            base_url: self.base_url.to_owned(),
            path: descriptor.path.to_owned(),
            query: descriptor.query_pairs(),
            headers,
            body: descriptor.body.clone(),
            timeout: self.timeout,
        };

        let method = descriptor.method.as_str();
        self.metrics.api_requests.with_label_values(&[method]).inc();
        let start = get_instant();
        let result = self.transport.send(request).await;
        self.metrics
            .api_request_duration
            .with_label_values(&[method])
            .observe(start.elapsed().as_secs_f64());

        result.map_err(|e| {
            warn!(method = %descriptor.method, path = %descriptor.path, error = %e, "api request failed without response");
            self.metrics
                .api_failures
                .with_label_values(&[TRANSPORT_MSG])
                .inc();
            ZoomError::Transport(e)
        })
    }
}

fn failure_reason(err: &AuthError) -> &'static str {
    match err {
        AuthError::Rejected { .. } => "rejected",
        AuthError::MalformedResponse(_) => "malformed",
        AuthError::Transport(_) => TRANSPORT_MSG,
    }
}
