//! Wire DTOs for the auth API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Credentials sent to `POST /auth/login`.
///
/// Only produced by [`crate::validation::validate`], so both strings are
/// known to be non-empty by the time a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember: Option<bool>,
}

/// Token payload carried in a successful login envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub expires_in: u64,
}

/// Standard wrapper around every successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status: bool,
    pub message: String,
    pub data: T,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
    #[serde(default)]
    pub generic_message: bool,
}

pub type LoginResponse = Envelope<AuthTokens>;
