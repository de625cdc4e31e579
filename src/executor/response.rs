use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ZoomError;
use crate::sources::transport::HttpResponse;

/// Successful API response with its decoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ApiResponse {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Decode the whole body into a caller type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ZoomError> {
        serde_json::from_value(self.body.clone()).map_err(|e| ZoomError::UnexpectedPayload {
            field: "<body>".to_owned(),
            reason: e.to_string(),
        })
    }
}

impl From<HttpResponse> for ApiResponse {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }
}
