//! Collaborators that surface failures to people.
//!
//! The core never writes to a terminal or a log file itself. The application
//! crate supplies implementations; tests supply recording fakes.

use serde_json::Value;

/// Shows a message to the user.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Three-severity log sink.
///
/// `log` is development chatter and may be dropped in production; `info`
/// and `error` are always recorded.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str, meta: Option<&Value>);
    fn info(&self, message: &str, meta: Option<&Value>);
    fn error(&self, message: &str, meta: Option<&Value>);
}
