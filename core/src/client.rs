//! Stateless HTTP request builder and response parser for the auth API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes a `TransportOutcome`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde_json::json;

use crate::error::NormalizedFailure;
use crate::http::{HttpMethod, HttpRequest, TransportOutcome};
use crate::normalize::receive;
use crate::types::{LoginRequest, LoginResponse};

pub const LOGIN_PATH: &str = "/auth/login";

/// Synchronous, stateless client for the auth API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base address.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn build_login(&self, input: &LoginRequest) -> HttpRequest {
        let mut body = json!({
            "username": input.username,
            "password": input.password,
        });
        if let Some(remember) = input.remember {
            body["remember"] = json!(remember);
        }
        HttpRequest {
            method: HttpMethod::Post,
            path: self.url(LOGIN_PATH),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body.to_string()),
        }
    }

    pub fn parse_login(&self, outcome: TransportOutcome) -> Result<LoginResponse, NormalizedFailure> {
        receive(outcome)
    }

    /// Build a read-type request; see [`crate::query::QueryClient`].
    pub fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(path),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }
}
