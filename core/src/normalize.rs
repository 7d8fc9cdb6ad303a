//! Response normalizer.
//!
//! Every outcome leaving a `Transport` passes through [`normalize`] before any
//! caller sees it. Successful responses are returned untouched; everything
//! else becomes a [`NormalizedFailure`]. The functions here are pure.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::NormalizedFailure;
use crate::http::{HttpResponse, TransportOutcome};
use crate::types::Envelope;

/// Pass 2xx responses through, rewrite everything else.
pub fn normalize(outcome: TransportOutcome) -> Result<HttpResponse, NormalizedFailure> {
    match outcome {
        TransportOutcome::NoResponse(_) => Err(NormalizedFailure::network()),
        TransportOutcome::Response(response) if response.is_success() => Ok(response),
        TransportOutcome::Response(response) => Err(api_failure(&response)),
    }
}

/// Normalize, then decode the body as an `Envelope<T>`.
///
/// A success body that does not decode is reported as an `ApiError` with the
/// response status and the generic fallback message.
pub fn receive<T: DeserializeOwned>(
    outcome: TransportOutcome,
) -> Result<Envelope<T>, NormalizedFailure> {
    let response = normalize(outcome)?;
    serde_json::from_str(&response.body)
        .map_err(|_| NormalizedFailure::api(response.status, None, None))
}

/// Build an `ApiError` from whatever the server sent back.
///
/// The body is arbitrary: it may be JSON with `message`/`errors`, some other
/// JSON value, plain text, or empty. Only a string `message` is honoured.
fn api_failure(response: &HttpResponse) -> NormalizedFailure {
    let body: Option<Value> = serde_json::from_str(&response.body).ok();
    let message = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let errors = body.as_ref().and_then(|b| b.get("errors")).cloned();
    NormalizedFailure::api(response.status, message, errors)
}
