//! HTTP server assembly
//!
//! Builds the axum router over the shared application state and runs it
//! with CORS and graceful shutdown.

pub mod handlers;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use chrono::Duration as TtlDuration;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::data::{CountryProvider, ProviderError, RestCountriesClient};
use crate::gateway::CountryGateway;
use crate::users::UserStore;

/// Shared state handed to every handler
pub struct AppState {
    /// Country data gateway
    pub gateway: CountryGateway,
    /// Mock user store
    pub users: UserStore,
}

impl AppState {
    /// Builds state from configuration, wiring the real upstream client.
    pub fn new(config: &Config) -> Result<Arc<Self>, ProviderError> {
        let client = RestCountriesClient::new(Duration::from_secs(config.upstream_timeout_secs))?
            .with_base_url(config.upstream_url.clone());
        let ttl = TtlDuration::seconds(config.cache_ttl_secs as i64);
        Ok(Self::with_provider(Arc::new(client), ttl))
    }

    /// Builds state over an arbitrary provider, used by tests to swap the
    /// upstream for a fake.
    pub fn with_provider(provider: Arc<dyn CountryProvider>, ttl: TtlDuration) -> Arc<Self> {
        Arc::new(Self {
            gateway: CountryGateway::new(provider, ttl),
            users: UserStore::with_mock_data(),
        })
    }
}

/// Assembles the API router with all routes and middleware.
///
/// The static `search` segment takes precedence over the `{code}` capture,
/// so "search" is never interpreted as a country code.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/v1/countries", get(handlers::list_countries))
        .route("/api/v1/countries/search", get(handlers::search_countries))
        .route(
            "/api/v1/countries/region/{region}",
            get(handlers::list_by_region),
        )
        .route("/api/v1/countries/{code}", get(handlers::get_country))
        .route("/api/v1/users", post(handlers::create_user))
        .route(
            "/api/v1/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .patch(handlers::patch_user),
        )
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and serves the API until shutdown.
pub async fn serve(state: Arc<AppState>, address: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
