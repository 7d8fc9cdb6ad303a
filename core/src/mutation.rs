//! Mutation coordinator.
//!
//! # Design
//! A `Mutation` wraps one named write-type operation and tracks
//! `Idle -> Pending -> Success | Error` per execution. Failures are handed to
//! a `Notifier` and a `Logger` exactly once each; successes have no default
//! side effect. Retries follow [`MutationDefaults`], which allows none by
//! default; only the final failure of an execution is reported.
//!
//! Executions are independent. Two overlapping calls both run, and whichever
//! finishes last owns the shared state. Callers that must not double-submit
//! check [`Mutation::is_pending`] first, as [`crate::form::LoginForm`] does.

use std::sync::{Arc, Mutex, PoisonError};

use crate::client::ApiClient;
use crate::error::NormalizedFailure;
use crate::http::Transport;
use crate::policy::MutationDefaults;
use crate::report::{Logger, Notifier};
use crate::types::{LoginRequest, LoginResponse};

pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Snapshot of a mutation's last execution.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationState<O> {
    pub status: MutationStatus,
    pub data: Option<O>,
    pub error: Option<NormalizedFailure>,
}

impl<O> Default for MutationState<O> {
    fn default() -> Self {
        Self {
            status: MutationStatus::Idle,
            data: None,
            error: None,
        }
    }
}

type Operation<I, O> = Box<dyn Fn(&I) -> Result<O, NormalizedFailure> + Send + Sync>;

pub struct Mutation<I, O> {
    name: &'static str,
    fallback: &'static str,
    operation: Operation<I, O>,
    retry: u32,
    notifier: Arc<dyn Notifier>,
    logger: Arc<dyn Logger>,
    state: Mutex<MutationState<O>>,
}

impl<I, O: Clone> Mutation<I, O> {
    pub fn new(
        name: &'static str,
        fallback: &'static str,
        operation: impl Fn(&I) -> Result<O, NormalizedFailure> + Send + Sync + 'static,
        notifier: Arc<dyn Notifier>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            name,
            fallback,
            operation: Box::new(operation),
            retry: 0,
            notifier,
            logger,
            state: Mutex::new(MutationState::default()),
        }
    }

    /// Extra attempts after a failure, taken immediately.
    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the operation and record the outcome.
    pub fn execute(&self, input: &I) -> Result<O, NormalizedFailure> {
        self.set(MutationState {
            status: MutationStatus::Pending,
            data: None,
            error: None,
        });

        let mut result = (self.operation)(input);
        for _ in 0..self.retry {
            if result.is_ok() {
                break;
            }
            result = (self.operation)(input);
        }

        match result {
            Ok(data) => {
                self.set(MutationState {
                    status: MutationStatus::Success,
                    data: Some(data.clone()),
                    error: None,
                });
                Ok(data)
            }
            Err(failure) => {
                let message = if failure.message.is_empty() {
                    self.fallback
                } else {
                    failure.message.as_str()
                };
                self.notifier.error(message);
                self.logger.error(message, None);
                self.set(MutationState {
                    status: MutationStatus::Error,
                    data: None,
                    error: Some(failure.clone()),
                });
                Err(failure)
            }
        }
    }

    pub fn state(&self) -> MutationState<O> {
        self.lock().clone()
    }

    pub fn status(&self) -> MutationStatus {
        self.lock().status
    }

    pub fn is_pending(&self) -> bool {
        self.status() == MutationStatus::Pending
    }

    /// Back to `Idle`, dropping data and error.
    pub fn reset(&self) {
        self.set(MutationState::default());
    }

    fn set(&self, state: MutationState<O>) {
        *self.lock() = state;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MutationState<O>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub type LoginMutation = Mutation<LoginRequest, LoginResponse>;

/// The `login` mutation: `POST /auth/login` through `transport`.
pub fn login_mutation<T>(
    client: ApiClient,
    transport: T,
    defaults: &MutationDefaults,
    notifier: Arc<dyn Notifier>,
    logger: Arc<dyn Logger>,
) -> LoginMutation
where
    T: Transport + Send + Sync + 'static,
{
    Mutation::new(
        "login",
        LOGIN_FAILED,
        move |input: &LoginRequest| {
            let outcome = transport.send(client.build_login(input));
            client.parse_login(outcome)
        },
        notifier,
        logger,
    )
    .with_retry(defaults.retry)
}
