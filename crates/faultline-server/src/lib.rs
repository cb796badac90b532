//! axum integration for faultline
//!
//! [`Server`] wraps a host router with the error boundary: handlers return
//! [`ApiError`], extractors reject with classified failures, unmatched
//! routes and methods fall back to protocol failures and panics are caught.
//! Every failure leaves as one JSON envelope with a matching log record.

mod boundary;
mod catalog;
mod extract;
mod failure;
mod fallback;
mod health;
mod panic;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use faultline_classifier::{Classifier, Rule};
use faultline_config::Config;
use faultline_i18n::{MessageCatalog, MessageResolver};
use http::HeaderName;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use extract::{Json, Path, Query, Validate, ValidatedJson, ValidatedQuery};
pub use failure::ApiError;

use crate::boundary::Boundary;

/// Host router wrapped with the faultline boundary
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Wrap `app` using the catalog described by the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the message catalog cannot be loaded or the
    /// configuration names an invalid locale or header
    pub fn new(config: Config, app: Router) -> anyhow::Result<Self> {
        Self::builder(config).build(app)
    }

    pub fn builder(config: Config) -> ServerBuilder {
        ServerBuilder {
            config,
            rules: Vec::new(),
            catalog: None,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address)
            .await
            .with_context(|| format!("failed to bind {}", self.listen_address))?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Optional customization of a [`Server`]
pub struct ServerBuilder {
    config: Config,
    rules: Vec<Rule>,
    catalog: Option<Arc<dyn MessageCatalog>>,
}

impl ServerBuilder {
    /// Register a classification rule evaluated ahead of the built-in ones
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Use `catalog` instead of the one described by `[i18n]`
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<dyn MessageCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Assemble the server around `app`
    ///
    /// # Errors
    ///
    /// Returns an error if the message catalog cannot be loaded or the
    /// configuration names an invalid locale or header
    pub fn build(self, app: Router) -> anyhow::Result<Server> {
        let config = self.config;

        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let resolver = match self.catalog {
            Some(catalog) => MessageResolver::from_shared(catalog),
            None => MessageResolver::new(catalog::from_config(&config.i18n)?),
        };
        let classifier = self.rules.into_iter().fold(Classifier::new(resolver), Classifier::with_rule);

        let state = Arc::new(Boundary {
            classifier,
            default_locale: config.i18n.locale().context("invalid i18n.default_locale")?,
            trace_header: HeaderName::try_from(config.server.trace_header.as_str())
                .with_context(|| format!("invalid server.trace_header '{}'", config.server.trace_header))?,
        });
        tracing::debug!(rules = ?state.classifier.rule_names(), "error boundary configured");

        let mut app = app;

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Applies to every route registered so far
        app = app
            .fallback(fallback::no_route)
            .method_not_allowed_fallback(fallback::method_not_allowed);

        // Innermost first: panics become parked failures before the boundary sees them
        app = app
            .layer(CatchPanicLayer::custom(panic::into_failure))
            .layer(axum::middleware::from_fn_with_state(state, boundary::error_boundary))
            .layer(TraceLayer::new_for_http());

        Ok(Server {
            router: app,
            listen_address,
        })
    }
}
