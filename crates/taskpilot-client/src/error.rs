//! Error types for the assistant API client.

use taskpilot_api_types::TaskStatus;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by [`AssistantClient`](crate::AssistantClient) operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server could not be reached at all.
    ///
    /// The message carries the checklist an operator needs when the local
    /// assistant is not answering.
    #[error(
        "could not connect to the assistant API at {base_url}: {source}\n\
         Please check that:\n\
         1. the assistant's external API is enabled in its settings\n\
         2. the port matches your configuration\n\
         3. the assistant is running and its API server has started"
    )]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request reached the server but failed in transit (timeout,
    /// interrupted body, ...).
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status.
    #[error("server returned {status} for {endpoint}: {body}")]
    Http {
        status: reqwest::StatusCode,
        endpoint: String,
        body: String,
    },

    /// The response decoded to something other than the expected shape.
    #[error("unexpected response payload from {endpoint}: {message}")]
    Payload { endpoint: String, message: String },

    /// The status-polling budget ran out before the task settled.
    #[error("task did not settle after {attempts} status checks (last status: {last_status:?})")]
    PollTimeout {
        attempts: u32,
        last_status: TaskStatus,
    },
}

impl ApiError {
    pub(crate) fn connection(base_url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Connection {
            base_url: base_url.into(),
            source,
        }
    }

    pub(crate) fn request(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub(crate) fn http(
        status: reqwest::StatusCode,
        endpoint: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::Http {
            status,
            endpoint: endpoint.into(),
            body: body.into(),
        }
    }

    pub(crate) fn payload(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Payload {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub(crate) fn poll_timeout(attempts: u32, last_status: TaskStatus) -> Self {
        Self::PollTimeout {
            attempts,
            last_status,
        }
    }

    /// The HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
