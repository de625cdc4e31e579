use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION};
use http::{HeaderMap, HeaderValue, Method};
use tracing::{debug, warn};

use crate::cache::token::Token;
use crate::config::settings::{ClientConfig, Credentials};
use crate::error::{AuthError, TransportError};
use crate::sources::transport::{HttpRequest, HttpTransport};
use crate::utils::constants::{
    ACCOUNT_ID_PARAM, GRANT_TYPE_ACCOUNT_CREDENTIALS, GRANT_TYPE_PARAM, TOKEN_PATH,
};

/// Server-to-server OAuth token source (`grant_type=account_credentials`).
#[derive(Debug, Clone)]
pub struct AccountCredentialsSource {
    credentials: Credentials,
    base_auth_url: String,
    timeout: Option<Duration>,
}

impl AccountCredentialsSource {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            credentials: config.credentials(),
            base_auth_url: config.base_auth_url.to_owned(),
            timeout: config.timeout_duration(),
        }
    }

    /// `POST {authBase}/oauth/token?grant_type=account_credentials&account_id=...`
    pub fn token_request(&self) -> Result<HttpRequest, AuthError> {
        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&self.credentials.basic_authorization())
            .map_err(|e| AuthError::Transport(TransportError::Other(e.to_string())))?;
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(HttpRequest {
            method: Method::POST,
            base_url: self.base_auth_url.to_owned(),
            path: TOKEN_PATH.to_owned(),
            query: vec![
                (GRANT_TYPE_PARAM.to_owned(), GRANT_TYPE_ACCOUNT_CREDENTIALS.to_owned()),
                (ACCOUNT_ID_PARAM.to_owned(), self.credentials.account_id.to_owned()),
            ],
            headers,
            body: None,
            timeout: self.timeout,
        })
    }

    pub async fn fetch_token<T: HttpTransport>(&self, transport: &T) -> Result<Token, AuthError> {
        let request = self.token_request()?;
        debug!("requesting access token");

        let response = transport.send(request).await?;
        if !response.status.is_success() {
            warn!(status = %response.status, "token request rejected");
            return Err(AuthError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_value::<Token>(response.body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }
}
