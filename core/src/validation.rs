//! Login form schema.
//!
//! Runs before any request is constructed. A rejected form never reaches the
//! network layer; its errors are keyed by field so the form can show them
//! next to the offending input.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::LoginRequest;

pub const USERNAME_REQUIRED: &str = "Please input your username!";
pub const PASSWORD_REQUIRED: &str = "Please input your password!";

/// Raw values as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFormValues {
    pub username: String,
    pub password: String,
    pub remember: Option<bool>,
}

/// Form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Username,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Username => write!(f, "username"),
            Field::Password => write!(f, "password"),
        }
    }
}

/// Field-keyed validation messages.
pub type FieldErrors = BTreeMap<Field, String>;

/// Check the form and produce the request payload.
///
/// Every failing field is reported, not just the first.
pub fn validate(values: &LoginFormValues) -> Result<LoginRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    if values.username.is_empty() {
        errors.insert(Field::Username, USERNAME_REQUIRED.to_string());
    }
    if values.password.is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED.to_string());
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(LoginRequest {
        username: values.username.clone(),
        password: values.password.clone(),
        remember: values.remember,
    })
}
