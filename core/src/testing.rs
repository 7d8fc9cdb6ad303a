//! Recording fakes shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use crate::http::{HttpRequest, HttpResponse, Transport, TransportFailure, TransportOutcome};
use crate::report::{Logger, Notifier};

/// Replays scripted outcomes; the last one repeats forever.
#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<TransportOutcome>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn scripted(outcomes: Vec<TransportOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(status: u16, body: &str) -> Self {
        Self::scripted(vec![response(status, body)])
    }

    pub fn unreachable() -> Self {
        Self::scripted(vec![no_response()])
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> TransportOutcome {
        self.requests.lock().unwrap().push(request);
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap_or_else(no_response)
        }
    }
}

pub fn response(status: u16, body: &str) -> TransportOutcome {
    TransportOutcome::Response(HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    })
}

pub fn no_response() -> TransportOutcome {
    TransportOutcome::NoResponse(TransportFailure::new("connection refused"))
}

pub fn envelope_body() -> String {
    serde_json::json!({
        "status": true,
        "message": "Login successful",
        "data": {"accessToken": "access", "refreshToken": "refresh", "expires_in": 3600},
        "errors": null,
        "genericMessage": false
    })
    .to_string()
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn errors(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == "ERROR")
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str, _meta: Option<&Value>) {
        self.entries.lock().unwrap().push(("LOG", message.to_string()));
    }

    fn info(&self, message: &str, _meta: Option<&Value>) {
        self.entries.lock().unwrap().push(("INFO", message.to_string()));
    }

    fn error(&self, message: &str, _meta: Option<&Value>) {
        self.entries.lock().unwrap().push(("ERROR", message.to_string()));
    }
}
