//! Server API Wrappers
//!
//! Frontend bindings to the todo HTTP endpoints, organized by domain.

mod todo;

use std::fmt;

use gloo_net::http::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use todo::*;

/// Error from a request: the server's `{ error }` message, or the transport error
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// `None` when no response arrived
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn transport(err: impl fmt::Display) -> Self {
        Self {
            status: None,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Absolute URL for an API path; the base is fixed at build time
pub(crate) fn url(path: &str) -> String {
    format!("{}{}", option_env!("TODO_API_BASE").unwrap_or(""), path)
}

/// Decode a success body, or turn a failure status into an [`ApiError`]
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(read_error(response).await);
    }
    response.json().await.map_err(ApiError::transport)
}

pub(crate) async fn read_error(response: Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => response.status_text(),
    };
    ApiError {
        status: Some(status),
        message,
    }
}
