//! The single failure shape every rejected request is converted to.
//!
//! # Design
//! Only two kinds exist. `NetworkError` means no response was obtained and
//! always carries status 0; `ApiError` means the server answered with a
//! non-success status (or an undecodable success body) and carries that
//! status. Field-level detail from the server is kept as raw JSON because its
//! shape is owned by the server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Service unavailable. Please try again later.";
pub const API_ERROR_FALLBACK: &str = "Something went wrong";

/// Failure taxonomy for the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    NetworkError,
    ApiError,
}

/// A failed request, normalized.
///
/// Created once per failing request by [`crate::normalize`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message} (status {status})")]
pub struct NormalizedFailure {
    pub message: String,
    /// HTTP status, or 0 when nothing was received.
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: FailureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl NormalizedFailure {
    /// No response was received.
    pub fn network() -> Self {
        Self {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: 0,
            kind: FailureKind::NetworkError,
            errors: None,
        }
    }

    /// A response was received with a non-success status.
    ///
    /// Empty messages fall back to [`API_ERROR_FALLBACK`].
    pub fn api(status: u16, message: Option<String>, errors: Option<serde_json::Value>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| API_ERROR_FALLBACK.to_string());
        Self {
            message,
            status,
            kind: FailureKind::ApiError,
            errors: errors.filter(|e| !e.is_null()),
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind == FailureKind::NetworkError
    }
}
