//! Query cache for read-type operations.
//!
//! # Design
//! One `QueryClient` is shared by every reader in the process. Entries are
//! keyed by operation identity and remember the request that produced them,
//! so a refetch trigger can replay it. The cache lock is never held across a
//! network round-trip or a backoff sleep.
//!
//! Failures do not escape by default: they land in `QueryState::error` and
//! any previously fetched data is kept.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::error::NormalizedFailure;
use crate::http::{HttpRequest, Transport};
use crate::normalize::receive;
use crate::policy::{QueryDefaults, RefetchTrigger};
use crate::types::Envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub status: QueryStatus,
    pub data: Option<Envelope<Value>>,
    pub error: Option<NormalizedFailure>,
    /// Failed attempts during the most recent fetch.
    pub failure_count: u32,
    pub updated_at: Option<Instant>,
}

impl QueryState {
    fn pending() -> Self {
        Self {
            status: QueryStatus::Pending,
            data: None,
            error: None,
            failure_count: 0,
            updated_at: None,
        }
    }

    /// Data older than `stale_time`, or no data at all.
    pub fn is_stale(&self, stale_time: Duration, now: Instant) -> bool {
        match self.updated_at {
            Some(at) => now.saturating_duration_since(at) >= stale_time,
            None => true,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    request: HttpRequest,
    state: QueryState,
    last_access: Instant,
}

type Sleeper = Box<dyn Fn(Duration) + Send + Sync>;

pub struct QueryClient<T> {
    transport: T,
    defaults: QueryDefaults,
    sleep: Sleeper,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl<T: Transport> QueryClient<T> {
    pub fn new(transport: T, defaults: QueryDefaults) -> Self {
        Self {
            transport,
            defaults,
            sleep: Box::new(std::thread::sleep),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the backoff sleep, e.g. to record delays in tests.
    pub fn with_sleeper(mut self, sleep: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    /// Read `key`, fetching through the transport when the cache can't answer.
    ///
    /// Cached data is served as-is when it is fresh, or when it is stale but
    /// `refetch_on_mount` is off. Entries idle past `gc_time` are dropped
    /// first, so they are fetched again. `Err` is only returned when
    /// `throw_on_error` is set and the fetch failed.
    pub fn fetch(&self, key: &str, request: HttpRequest) -> Result<QueryState, NormalizedFailure> {
        let now = Instant::now();
        self.collect_garbage_at(now);
        if let Some(entry) = self.lock().get_mut(key) {
            let has_data = entry.state.data.is_some();
            let fresh = !entry.state.is_stale(self.defaults.stale_time, now);
            if has_data && (fresh || !self.defaults.refetch_on_mount) {
                entry.last_access = now;
                return Ok(entry.state.clone());
            }
        }
        let state = self.refetch(key, request);
        match (&state.error, self.defaults.throw_on_error) {
            (Some(failure), true) => Err(failure.clone()),
            _ => Ok(state),
        }
    }

    /// Current cached state for `key`, without any I/O.
    pub fn get(&self, key: &str) -> Option<QueryState> {
        self.lock().get(key).map(|e| e.state.clone())
    }

    /// Mark `key` stale so the next trigger or mount refetches it.
    pub fn invalidate(&self, key: &str) -> bool {
        match self.lock().get_mut(key) {
            Some(entry) => {
                entry.state.updated_at = None;
                true
            }
            None => false,
        }
    }

    /// React to an environment event. Returns the keys that were refetched.
    pub fn on_trigger(&self, trigger: RefetchTrigger) -> Vec<String> {
        if !self.defaults.refetches_on(trigger) {
            return Vec::new();
        }
        let now = Instant::now();
        self.collect_garbage_at(now);
        let stale: Vec<(String, HttpRequest)> = self
            .lock()
            .iter()
            .filter(|(_, e)| e.state.is_stale(self.defaults.stale_time, now))
            .map(|(k, e)| (k.clone(), e.request.clone()))
            .collect();

        let mut keys = Vec::with_capacity(stale.len());
        for (key, request) in stale {
            self.refetch(&key, request);
            keys.push(key);
        }
        keys.sort();
        keys
    }

    /// Drop entries idle for longer than `gc_time`. Returns how many went.
    pub fn collect_garbage(&self) -> usize {
        self.collect_garbage_at(Instant::now())
    }

    pub fn collect_garbage_at(&self, now: Instant) -> usize {
        let gc_time = self.defaults.gc_time;
        let mut cache = self.lock();
        let before = cache.len();
        cache.retain(|_, e| now.saturating_duration_since(e.last_access) < gc_time);
        before - cache.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn refetch(&self, key: &str, request: HttpRequest) -> QueryState {
        let (result, failure_count) = self.run(&request);
        let now = Instant::now();

        let mut cache = self.lock();
        let entry = cache.entry(key.to_string()).or_insert_with(|| CacheEntry {
            request: request.clone(),
            state: QueryState::pending(),
            last_access: now,
        });
        entry.request = request;
        entry.last_access = now;
        entry.state.failure_count = failure_count;
        match result {
            Ok(data) => {
                entry.state.status = QueryStatus::Success;
                entry.state.data = Some(data);
                entry.state.error = None;
                entry.state.updated_at = Some(now);
            }
            Err(failure) => {
                entry.state.status = QueryStatus::Error;
                entry.state.error = Some(failure);
            }
        }
        entry.state.clone()
    }

    /// One fetch with the retry policy applied.
    fn run(&self, request: &HttpRequest) -> (Result<Envelope<Value>, NormalizedFailure>, u32) {
        let mut failures = 0;
        loop {
            match receive(self.transport.send(request.clone())) {
                Ok(data) => return (Ok(data), failures),
                Err(_) if failures < self.defaults.retry => {
                    (self.sleep)((self.defaults.retry_delay)(failures));
                    failures += 1;
                }
                Err(failure) => return (Err(failure), failures + 1),
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
