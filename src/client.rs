use std::sync::Arc;

use tracing::info;

use crate::cache::token::Token;
use crate::config::settings::ClientConfig;
use crate::config::validator::validate_client_config;
use crate::error::{AuthError, ZoomError};
use crate::executor::authenticated::AuthenticatedExecutor;
use crate::executor::request::{QueryParams, RequestDescriptor};
use crate::executor::response::ApiResponse;
use crate::observability::metrics::Metrics;
use crate::pagination::paginated::{PaginationConfig, Paginated};
use crate::resources::catalog::{Endpoint, ListEndpoint};
use crate::resources::dashboards::Dashboards;
use crate::resources::groups::Groups;
use crate::resources::meetings::Meetings;
use crate::resources::reports::Reports;
use crate::sources::transport::{HttpTransport, ReqwestTransport};

/// Zoom API client.
///
/// Cheap to clone; clones share the token cache, the transport and the metrics.
pub struct ZoomClient<T: HttpTransport = ReqwestTransport> {
    executor: Arc<AuthenticatedExecutor<T>>,
}

impl<T: HttpTransport> Clone for ZoomClient<T> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

impl ZoomClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ZoomError> {
        let transport = ReqwestTransport::new().map_err(|e| ZoomError::Config(e.to_string()))?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> ZoomClient<T> {
    /// Client over a caller-provided HTTP transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ZoomError> {
        validate_client_config(&config).map_err(|errors| ZoomError::Config(errors.join("; ")))?;

        let metrics = Metrics::new().map_err(|e| ZoomError::Config(e.to_string()))?;
        info!(
            base_url = %config.base_url,
            base_auth_url = %config.base_auth_url,
            "zoom client ready"
        );

        Ok(Self {
            executor: Arc::new(AuthenticatedExecutor::new(&config, transport, metrics)),
        })
    }

    pub fn dashboards(&self) -> Dashboards<'_, T> {
        Dashboards::new(self)
    }

    pub fn groups(&self) -> Groups<'_, T> {
        Groups::new(self)
    }

    pub fn meetings(&self) -> Meetings<'_, T> {
        Meetings::new(self)
    }

    pub fn reports(&self) -> Reports<'_, T> {
        Reports::new(self)
    }

    /// Run any request through the authenticated executor.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<ApiResponse, ZoomError> {
        self.executor.execute(&descriptor).await
    }

    /// Paginated handle over any list endpoint. Nothing is sent until the
    /// handle is awaited or iterated.
    pub fn paginate(&self, descriptor: RequestDescriptor, config: PaginationConfig) -> Paginated<T> {
        Paginated::new(self.executor.clone(), descriptor, config)
    }

    /// Access token of the current generation, fetching it if needed.
    pub async fn token(&self) -> Result<Token, AuthError> {
        self.executor.token().await.map(|issued| issued.token)
    }

    /// Drop the cached token (or cached token failure); the next call fetches anew.
    pub fn reset_token(&self) -> u64 {
        self.executor.reset_token()
    }

    pub fn token_generation(&self) -> u64 {
        self.executor.token_cache().generation()
    }

    pub fn metrics(&self) -> &Metrics {
        self.executor.metrics()
    }

    pub(crate) async fn call(
        &self,
        endpoint: &Endpoint,
        ids: &[&str],
        params: QueryParams,
    ) -> Result<ApiResponse, ZoomError> {
        self.request(endpoint.descriptor(ids, params)).await
    }

    pub(crate) fn list(
        &self,
        endpoint: &ListEndpoint,
        ids: &[&str],
        params: QueryParams,
    ) -> Paginated<T> {
        self.paginate(endpoint.endpoint.descriptor(ids, params), endpoint.pagination())
    }
}
