//! # Zoom API Client Library
//!
//! Talks to the Zoom REST API on behalf of a server-to-server OAuth app:
//! obtains and caches an account-credentials access token, attaches it to
//! every call, refreshes it once when the API answers 401, and walks
//! cursor-paginated list endpoints page by page or item by item.
//!
//! Modules:
//! - `config` — client configuration, YAML loading and validation
//! - `cache` — access token value and the single-flight token cache
//! - `sources` — HTTP transport and the account-credentials token request
//! - `executor` — request descriptors and the authenticated executor
//! - `pagination` — cursor protocol and the paginated handle
//! - `resources` — dashboards, groups, meetings and reports endpoints
//!
//! ```no_run
//! use futures::{pin_mut, TryStreamExt};
//! use zoom_client::{ClientConfig, QueryParams, ZoomClient};
//!
//! # async fn run() -> Result<(), zoom_client::ZoomError> {
//! let client = ZoomClient::new(ClientConfig::new("account", "client-id", "client-secret"))?;
//!
//! let members = client.groups().list_group_members("abc", QueryParams::new());
//! let items = members.items();
//! pin_mut!(items);
//! while let Some(member) = items.try_next().await? {
//!     println!("{}", member["email"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod helpers;
pub mod observability;
pub mod pagination;
pub mod resources;
pub mod sources;
#[cfg(test)]
mod tests;
pub mod utils;

pub use crate::cache::token::Token;
pub use crate::client::ZoomClient;
pub use crate::config::settings::{ClientConfig, Credentials, LogFormat, LoggingConfig};
pub use crate::error::{AuthError, TransportError, ZoomError};
pub use crate::executor::request::{QueryParams, RequestDescriptor};
pub use crate::executor::response::ApiResponse;
pub use crate::observability::metrics::Metrics;
pub use crate::pagination::paginated::{PaginationConfig, Paginated};
pub use crate::sources::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
