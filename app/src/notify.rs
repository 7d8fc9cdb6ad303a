//! User-facing notifications for a terminal front-end.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use login_core::{LoginResponse, Notifier};

/// Writes one `error: <message>` line per notification.
pub struct ConsoleNotifier<W> {
    out: Mutex<W>,
}

impl ConsoleNotifier<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn error(&self, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // A closed terminal has nowhere left to report to.
        let _ = writeln!(out, "error: {message}");
        let _ = out.flush();
    }
}

/// Success line for the terminal: the server's message, never the tokens.
pub fn success(mut out: impl Write, envelope: &LoginResponse) -> io::Result<()> {
    writeln!(out, "{}", envelope.message)
}
