//! Headless login form.
//!
//! Holds what the user typed, the field-level messages from the last
//! validation, and gates submission on the mutation's pending state.

use crate::error::NormalizedFailure;
use crate::mutation::LoginMutation;
use crate::types::LoginResponse;
use crate::validation::{validate, Field, FieldErrors, LoginFormValues};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// A previous submission is still pending.
    Busy,
    Completed(Result<LoginResponse, NormalizedFailure>),
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    values: LoginFormValues,
    errors: FieldErrors,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: LoginFormValues) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
        }
    }

    pub fn values(&self) -> &LoginFormValues {
        &self.values
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.values.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.values.password = password.into();
    }

    pub fn set_remember(&mut self, remember: bool) {
        self.values.remember = Some(remember);
    }

    /// Help text to show under `field`, if its last validation failed.
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The submit control is disabled while a login is in flight.
    pub fn submit_enabled(&self, mutation: &LoginMutation) -> bool {
        !mutation.is_pending()
    }

    pub fn submit(&mut self, mutation: &LoginMutation) -> SubmitOutcome {
        if !self.submit_enabled(mutation) {
            return SubmitOutcome::Busy;
        }
        match validate(&self.values) {
            Err(errors) => {
                self.errors = errors.clone();
                SubmitOutcome::Invalid(errors)
            }
            Ok(request) => {
                self.errors.clear();
                SubmitOutcome::Completed(mutation.execute(&request))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::http::Transport;
    use crate::mutation::{login_mutation, Mutation, LOGIN_FAILED};
    use crate::policy::MutationDefaults;
    use crate::testing::{envelope_body, FakeTransport, RecordingLogger, RecordingNotifier};
    use crate::types::LoginRequest;
    use crate::validation::{PASSWORD_REQUIRED, USERNAME_REQUIRED};
    use std::sync::{Arc, Mutex, Weak};

    fn mutation(transport: Arc<FakeTransport>) -> LoginMutation {
        login_mutation(
            ApiClient::new("http://mock"),
            transport,
            &MutationDefaults::default(),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingLogger::default()),
        )
    }

    #[test]
    fn empty_form_never_reaches_transport() {
        let transport = Arc::new(FakeTransport::responding(200, &envelope_body()));
        let m = mutation(transport.clone());
        let mut form = LoginForm::new();

        let outcome = form.submit(&m);
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.len() == 2));
        assert_eq!(form.field_error(Field::Username), Some(USERNAME_REQUIRED));
        assert_eq!(form.field_error(Field::Password), Some(PASSWORD_REQUIRED));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn errors_clear_after_valid_submit() {
        let transport = Arc::new(FakeTransport::responding(200, &envelope_body()));
        let m = mutation(transport.clone());
        let mut form = LoginForm::new();
        form.set_username("alice");
        assert!(matches!(form.submit(&m), SubmitOutcome::Invalid(_)));
        assert!(form.field_error(Field::Username).is_none());

        form.set_password("secret");
        let outcome = form.submit(&m);
        assert!(matches!(outcome, SubmitOutcome::Completed(Ok(_))));
        assert!(form.errors().is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn remember_is_forwarded() {
        let transport = Arc::new(FakeTransport::responding(200, &envelope_body()));
        let m = mutation(transport.clone());
        let mut form = LoginForm::new();
        form.set_username("alice");
        form.set_password("secret");
        form.set_remember(true);
        form.submit(&m);

        let sent = transport.requests();
        let body: serde_json::Value =
            serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["remember"], true);
    }

    #[test]
    fn failure_is_returned_to_caller() {
        let transport = Arc::new(FakeTransport::responding(401, r#"{"message":"Invalid credentials"}"#));
        let m = mutation(transport);
        let mut form = LoginForm::with_values(LoginFormValues {
            username: "alice".into(),
            password: "wrong".into(),
            remember: None,
        });
        match form.submit(&m) {
            SubmitOutcome::Completed(Err(e)) => assert_eq!(e.status, 401),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(form.submit_enabled(&m));
    }

    #[test]
    fn submit_while_pending_is_busy() {
        let transport = Arc::new(FakeTransport::responding(200, &envelope_body()));
        let sender = transport.clone();
        let seen = Arc::new(Mutex::new(None));
        let slot = seen.clone();
        let m: Arc<LoginMutation> = Arc::new_cyclic(|weak: &Weak<LoginMutation>| {
            let weak = weak.clone();
            let client = ApiClient::new("http://mock");
            Mutation::new(
                "login",
                LOGIN_FAILED,
                move |input: &LoginRequest| {
                    if let Some(m) = weak.upgrade() {
                        let mut second = LoginForm::with_values(LoginFormValues {
                            username: "bob".into(),
                            password: "hunter2".into(),
                            remember: None,
                        });
                        let enabled = second.submit_enabled(&m);
                        *slot.lock().unwrap() = Some((enabled, second.submit(&m)));
                    }
                    client.parse_login(sender.send(client.build_login(input)))
                },
                Arc::new(RecordingNotifier::default()),
                Arc::new(RecordingLogger::default()),
            )
        });

        let mut form = LoginForm::new();
        form.set_username("alice");
        form.set_password("secret");
        assert!(form.submit_enabled(&m));
        assert!(matches!(form.submit(&m), SubmitOutcome::Completed(Ok(_))));

        assert_eq!(*seen.lock().unwrap(), Some((false, SubmitOutcome::Busy)));
        assert_eq!(transport.requests().len(), 1);
        assert!(form.submit_enabled(&m));
    }
}
