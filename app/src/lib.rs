//! Terminal front-end for the login request layer.
//!
//! # Overview
//! Supplies the I/O halves that `login-core` leaves to its host: a `ureq`
//! transport with a fixed timeout, environment-sourced settings, a
//! `tracing`-backed logger and a console notifier. [`App`] wires them
//! together explicitly; nothing is looked up from globals.

pub mod config;
pub mod logger;
pub mod notify;
pub mod transport;

use std::sync::Arc;

use login_core::{
    login_mutation, ApiClient, CachePolicy, LoginMutation, Logger, Notifier, QueryClient,
};

use config::Settings;
use logger::TracingLogger;
use transport::HttpTransport;

/// The request layer, built once at startup.
pub struct App {
    pub client: ApiClient,
    pub login: LoginMutation,
    pub queries: QueryClient<HttpTransport>,
    pub logger: Arc<dyn Logger>,
}

impl App {
    pub fn new(settings: &Settings, notifier: Arc<dyn Notifier>) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new(settings.env));
        Self::with_parts(settings, HttpTransport::new(), CachePolicy::default(), notifier, logger)
    }

    pub fn with_parts(
        settings: &Settings,
        transport: HttpTransport,
        policy: CachePolicy,
        notifier: Arc<dyn Notifier>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let client = ApiClient::new(&settings.base_url);
        let login = login_mutation(
            client.clone(),
            transport.clone(),
            &policy.mutations,
            notifier,
            logger.clone(),
        );
        let queries = QueryClient::new(transport, policy.queries);
        Self {
            client,
            login,
            queries,
            logger,
        }
    }
}
