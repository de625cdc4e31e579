use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::helpers::time::{add_seconds, now};

/// Access token issued by the account-credentials grant.
///
/// Immutable once fetched; every request gets its own copy.
#[derive(Clone, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// lifetime hint in seconds
    #[serde(default, alias = "expire_in")]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<Scope>,
    #[serde(skip, default = "now")]
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Scope {
    Joined(String),
    List(Vec<String>),
}

impl Token {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires_in: None,
            scope: None,
            fetched_at: now(),
        }
    }

    pub fn bearer_authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Expiry derived from `expires_in`. Informational only: refresh is driven by 401s.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_in
            .map(|seconds| add_seconds(self.fetched_at, seconds))
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| now() >= at)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("fetched_at", &self.fetched_at)
            .finish()
    }
}
