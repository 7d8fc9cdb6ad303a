//! Login request layer, without the network.
//!
//! # Overview
//! Builds `HttpRequest` values and interprets `TransportOutcome` values
//! (host-does-IO pattern). The caller supplies a `Transport` that executes
//! the actual HTTP round-trip, making the core deterministic and testable.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - Every failure leaving a transport goes through `normalize` and becomes a
//!   `NormalizedFailure` (`NETWORK_ERROR` or `API_ERROR`).
//! - `Mutation` drives write operations (login) and reports failures to the
//!   `Notifier`/`Logger` collaborators; `QueryClient` drives cached reads
//!   under the `CachePolicy` retry and staleness rules.
//! - `LoginForm` validates input before anything is built.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod mutation;
pub mod normalize;
pub mod policy;
pub mod query;
pub mod report;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use error::{FailureKind, NormalizedFailure};
pub use form::{LoginForm, SubmitOutcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportFailure, TransportOutcome};
pub use mutation::{login_mutation, LoginMutation, Mutation, MutationState, MutationStatus};
pub use normalize::{normalize, receive};
pub use policy::{retry_delay, CachePolicy, MutationDefaults, QueryDefaults, RefetchTrigger};
pub use query::{QueryClient, QueryState, QueryStatus};
pub use report::{Logger, Notifier};
pub use types::{AuthTokens, Envelope, LoginRequest, LoginResponse};
pub use validation::{validate, Field, FieldErrors, LoginFormValues};
