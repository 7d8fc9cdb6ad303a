//! Cache policy: process-wide defaults for read and write operations.
//!
//! Reads retry twice with exponential backoff, stay fresh for five minutes
//! and are evicted after thirty idle minutes. Writes never retry.

use std::time::Duration;

pub const BASE_RETRY_DELAY_MS: u64 = 1_000;
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;

/// Backoff before retry number `attempt` (0-based).
///
/// `min(1000 * 2^attempt, 30000)` milliseconds.
pub fn retry_delay(attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    let ms = BASE_RETRY_DELAY_MS
        .saturating_mul(factor)
        .min(MAX_RETRY_DELAY_MS);
    Duration::from_millis(ms)
}

/// Events that may cause cached reads to be fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefetchTrigger {
    WindowFocus,
    Reconnect,
    Mount,
}

#[derive(Debug, Clone)]
pub struct QueryDefaults {
    /// Retries after the first failed attempt.
    pub retry: u32,
    pub retry_delay: fn(u32) -> Duration,
    pub stale_time: Duration,
    pub gc_time: Duration,
    pub refetch_on_window_focus: bool,
    pub refetch_on_reconnect: bool,
    pub refetch_on_mount: bool,
    /// When false, read failures only appear in the query state.
    pub throw_on_error: bool,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            retry: 2,
            retry_delay,
            stale_time: Duration::from_secs(5 * 60),
            gc_time: Duration::from_secs(30 * 60),
            refetch_on_window_focus: false,
            refetch_on_reconnect: true,
            refetch_on_mount: false,
            throw_on_error: false,
        }
    }
}

impl QueryDefaults {
    pub fn refetches_on(&self, trigger: RefetchTrigger) -> bool {
        match trigger {
            RefetchTrigger::WindowFocus => self.refetch_on_window_focus,
            RefetchTrigger::Reconnect => self.refetch_on_reconnect,
            RefetchTrigger::Mount => self.refetch_on_mount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationDefaults {
    pub retry: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CachePolicy {
    pub queries: QueryDefaults,
    pub mutations: MutationDefaults,
}
