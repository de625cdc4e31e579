use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::utils::constants::METRICS_NAMESPACE;

/// Per-client metrics. Each client owns its registry; hosts gather it
/// through `ZoomClient::metrics()`.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub token_fetch_requests: IntCounter,
    pub token_fetch_failures: IntCounterVec,
    pub token_resets: IntCounter,

    // API metrics
    pub api_requests: IntCounterVec,
    pub api_failures: IntCounterVec,
    pub api_request_duration: HistogramVec,
    pub auth_retries: IntCounter,

    // Pagination
    pub pages_fetched: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some(METRICS_NAMESPACE.into()), None)?;

        let metrics = Self {
            // Token
            token_fetch_requests: IntCounter::new("token_fetch_requests_total", "Access token requests sent to the auth endpoint")?,
            token_fetch_failures: IntCounterVec::new(Opts::new("token_fetch_failures_total", "Access token request failures by reason"), &["reason"])?,
            token_resets: IntCounter::new("token_resets_total", "Token generations discarded after a 401")?,

            // API
            api_requests: IntCounterVec::new(Opts::new("api_requests_total", "API requests sent, retries included"), &["method"])?,
            api_failures: IntCounterVec::new(Opts::new("api_failures_total", "API calls that failed by status"), &["status"])?,
            api_request_duration: HistogramVec::new(HistogramOpts::new("api_request_duration_seconds", "API request duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["method"])?,
            auth_retries: IntCounter::new("auth_retries_total", "API requests retried after a 401")?,

            pages_fetched: IntCounter::new("pages_fetched_total", "Paginated list pages fetched")?,

            registry,
        };

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_fetch_requests.clone()))?;
        reg.register(Box::new(metrics.token_fetch_failures.clone()))?;
        reg.register(Box::new(metrics.token_resets.clone()))?;
        reg.register(Box::new(metrics.api_requests.clone()))?;
        reg.register(Box::new(metrics.api_failures.clone()))?;
        reg.register(Box::new(metrics.api_request_duration.clone()))?;
        reg.register(Box::new(metrics.auth_retries.clone()))?;
        reg.register(Box::new(metrics.pages_fetched.clone()))?;

        Ok(metrics)
    }

    /// Prometheus text exposition of this client's registry.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
