//! Logging sink.
//!
//! # Design
//! `TracingLogger` implements the core `Logger` by emitting `tracing` events
//! on the `login::log` target: `LOG` is a DEBUG event and is dropped in
//! production, `INFO` and `ERROR` always go out. `LineFormat` renders every
//! event as
//!
//! ```text
//! [2024-05-01T12:00:00.000Z] [ERROR] Invalid credentials | {"status":401}
//! ```
//!
//! so the application's own lines and the transport's debug lines share one
//! shape. Non-message fields without an explicit `meta` are folded into the
//! JSON tail.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use login_core::Logger;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::config::AppEnv;

pub const LOG_TARGET: &str = "login::log";

/// `[timestamp] [LEVEL] message | meta`
pub fn format_line(at: &DateTime<Utc>, level: &str, message: &str, meta: Option<&str>) -> String {
    let base = format!(
        "[{}] [{level}] {message}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    match meta {
        Some(meta) => format!("{base} | {meta}"),
        None => base,
    }
}

fn label(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "LOG",
        _ => "TRACE",
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    env: AppEnv,
}

impl TracingLogger {
    pub fn new(env: AppEnv) -> Self {
        Self { env }
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: &str, meta: Option<&Value>) {
        if self.env.is_production() {
            return;
        }
        match meta {
            Some(meta) => tracing::debug!(target: LOG_TARGET, meta = %meta, "{message}"),
            None => tracing::debug!(target: LOG_TARGET, "{message}"),
        }
    }

    fn info(&self, message: &str, meta: Option<&Value>) {
        match meta {
            Some(meta) => tracing::info!(target: LOG_TARGET, meta = %meta, "{message}"),
            None => tracing::info!(target: LOG_TARGET, "{message}"),
        }
    }

    fn error(&self, message: &str, meta: Option<&Value>) {
        match meta {
            Some(meta) => tracing::error!(target: LOG_TARGET, meta = %meta, "{message}"),
            None => tracing::error!(target: LOG_TARGET, "{message}"),
        }
    }
}

#[derive(Default)]
struct LineFields {
    message: String,
    meta: Option<String>,
    extra: Map<String, Value>,
}

impl LineFields {
    fn set(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "meta" => self.meta = Some(value),
            name => {
                self.extra.insert(name.to_string(), Value::String(value));
            }
        }
    }

    fn meta(self) -> Option<String> {
        match self.meta {
            Some(meta) => Some(meta),
            None if !self.extra.is_empty() => Some(Value::Object(self.extra).to_string()),
            None => None,
        }
    }
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set(field, format!("{value:?}"));
    }
}

/// `tracing-subscriber` event format producing [`format_line`] output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = LineFields::default();
        event.record(&mut fields);
        let level = label(event.metadata().level());
        let message = std::mem::take(&mut fields.message);
        let meta = fields.meta();
        writeln!(
            writer,
            "{}",
            format_line(&Utc::now(), level, &message, meta.as_deref())
        )
    }
}

/// Filter for the binary: `login::log` events always pass at DEBUG (the
/// `TracingLogger` gates `LOG` itself); everything else follows `RUST_LOG`
/// when set, `-v` otherwise.
pub fn filter(verbosity: u8) -> anyhow::Result<EnvFilter> {
    let base = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })?,
    };
    let own: Directive = format!("{LOG_TARGET}=debug").parse()?;
    Ok(base.add_directive(own))
}

/// Install the global subscriber, writing to stderr.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity)?)
        .event_format(LineFormat)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
