//! atlasd - REST backend for country data
//!
//! Fetches the country dataset from an upstream provider, caches it with a
//! time-based expiration, and serves paginated listing, code lookup, region
//! listing, and multi-field search over HTTP.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use atlasd::cli::{bind_address, Cli};
use atlasd::config::Config;
use atlasd::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = Config::load();
    let address = bind_address(&cli, &config);

    info!("Initializing state...");
    let state = AppState::new(&config)?;

    server::serve(state, &address).await?;
    Ok(())
}
