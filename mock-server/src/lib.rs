use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const DEMO_USERNAME: &str = "alice";
pub const DEMO_PASSWORD: &str = "secret";
pub const TOKEN_TTL_SECS: u64 = 3600;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status: bool,
    pub message: String,
    pub data: T,
    pub errors: Option<Value>,
    pub generic_message: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tokens {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub expires_in: u64,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember: Option<bool>,
}

pub fn app() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/health", get(health))
        .route("/maintenance", get(maintenance))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn envelope<T>(message: &str, data: T) -> Envelope<T> {
    Envelope {
        status: true,
        message: message.to_string(),
        data,
        errors: None,
        generic_message: false,
    }
}

async fn login(Json(input): Json<LoginRequest>) -> Response {
    let mut errors = serde_json::Map::new();
    if input.username.is_empty() {
        errors.insert("username".into(), json!(["Username is required"]));
    }
    if input.password.is_empty() {
        errors.insert("password".into(), json!(["Password is required"]));
    }
    if !errors.is_empty() {
        let body = json!({"message": "Validation failed", "errors": errors});
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
    }

    if input.username != DEMO_USERNAME || input.password != DEMO_PASSWORD {
        let body = json!({"message": "Invalid credentials"});
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    let ttl = if input.remember.unwrap_or(false) {
        TOKEN_TTL_SECS * 24 * 30
    } else {
        TOKEN_TTL_SECS
    };
    let tokens = Tokens {
        access_token: Uuid::new_v4().to_string(),
        refresh_token: Uuid::new_v4().to_string(),
        expires_in: ttl,
    };
    Json(envelope("Login successful", tokens)).into_response()
}

async fn health() -> Json<Envelope<Value>> {
    Json(envelope("ok", json!({"ok": true})))
}

async fn maintenance() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}
