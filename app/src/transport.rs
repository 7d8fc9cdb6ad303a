//! Blocking HTTP transport over `ureq`.
//!
//! Status codes are returned as data, never as errors, so the core's
//! normalizer decides what a failure is. Anything `ureq` reports as an error
//! means no response was received.

use std::time::Duration;

use login_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportFailure, TransportOutcome};
use tracing::debug;

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);

#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn send(&self, req: HttpRequest) -> TransportOutcome {
        debug!(method = ?req.method, url = %req.path, "sending request");

        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(&req.path);
                for (k, v) in &req.headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, body) => {
                let mut builder = self.agent.post(&req.path);
                for (k, v) in &req.headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = match result {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, url = %req.path, "no response");
                return TransportOutcome::NoResponse(TransportFailure::new(err.to_string()));
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        // Non-UTF-8 bytes are replaced so the server's `message` survives.
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                debug!(status, error = %err, url = %req.path, "response body unreadable");
                String::new()
            }
        };
        debug!(status, url = %req.path, "response received");

        TransportOutcome::Response(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
