//! Shared constants and invariants

pub const DEFAULT_BASE_URL: &str = "https://api.zoom.us/v2";
pub const DEFAULT_BASE_AUTH_URL: &str = "https://zoom.us";

// Token endpoint wire contract
pub const TOKEN_PATH: &str = "/oauth/token";
pub const GRANT_TYPE_PARAM: &str = "grant_type";
pub const GRANT_TYPE_ACCOUNT_CREDENTIALS: &str = "account_credentials";
pub const ACCOUNT_ID_PARAM: &str = "account_id";

// Pagination
pub const DEFAULT_CURSOR_FIELD: &str = "next_page_token";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const METRICS_NAMESPACE: &str = "zoomclient";
