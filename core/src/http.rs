//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and interprets `TransportOutcome` values; whoever implements
//! `Transport` owns the socket, the timeout and the retry-free round-trip.
//!
//! A transport never reports a Rust error. A request that produced no
//! response at all (timeout, refused connection, DNS failure) is described by
//! `TransportOutcome::NoResponse` so the normalizer can treat it as data.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL, already joined with the client's base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status falls in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub reason: String,
}

impl TransportFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The raw result of one round-trip, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// The server answered, with any status code.
    Response(HttpResponse),
    /// Nothing came back.
    NoResponse(TransportFailure),
}

/// Executes `HttpRequest` values against the network.
///
/// Implementations must not retry; retrying is a caller concern governed by
/// [`crate::policy::CachePolicy`].
pub trait Transport {
    fn send(&self, request: HttpRequest) -> TransportOutcome;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> TransportOutcome {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: HttpRequest) -> TransportOutcome {
        (**self).send(request)
    }
}
