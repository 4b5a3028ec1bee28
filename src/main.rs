//! cycle-reach HTTP service.
//!
//! # Configuration
//!
//! - `ORS_API_KEY` - openrouteservice key (checked on first isochrone request)
//! - `ORS_BASE_URL`, `OVERPASS_URL` - provider endpoints
//! - `SERVICE_PORT` - HTTP port (default: 8000)
//! - `LOG_FORMAT` - `json` (default) or `text`
//! - `RUST_LOG` - log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use cycle_reach::config::ServiceConfig;
use cycle_reach::http::{AppState, create_router};
use cycle_reach::logging::init_logging;
use cycle_reach::ors::OrsClient;
use cycle_reach::overpass::OverpassClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env();
    init_logging(&config.logging);

    if config.ors.api_key.is_none() {
        warn!("ORS_API_KEY is not set, isochrone requests will fail");
    }

    // Blocking clients own an internal runtime and must be built outside tokio.
    let routing = OrsClient::new(config.ors.clone())?;
    let facilities = OverpassClient::new(config.overpass.clone())?;
    let state = AppState::new(Arc::new(routing), Arc::new(facilities));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve(state, config.port))
}

async fn serve(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
