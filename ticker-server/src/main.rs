use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ticker::Ticker;
use ticker_http::{CatalogClient, HttpPageFetcher};
use ticker_server::settings::{self, ConfigOrigin};
use ticker_server::{AppState, app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (cfg, origin) = settings::load()?;

    // RUST_LOG wins over the configured debug switch
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cfg.debug { "debug" } else { "info" }));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    info!(version = env!("CARGO_PKG_VERSION"), "ticker-parser starting");
    match origin {
        ConfigOrigin::File(path) => info!(path = %path.display(), "configuration loaded"),
        ConfigOrigin::Missing(path) => {
            warn!(path = %path.display(), "configuration file not found, using defaults");
        }
    }

    let http = ticker_http::default_client(None)?;
    let catalog = CatalogClient::new(http.clone(), &cfg.parser.catalog);

    let mut builder = Ticker::builder()
        .with_source(Arc::new(HttpPageFetcher::new(http)))
        .config(cfg.clone());
    if cfg.parser.use_catalog {
        builder = builder.with_instruments(Arc::new(catalog.clone()));
    }
    let ticker = builder.build()?;

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, use_catalog = cfg.parser.use_catalog, "listening");
    axum::serve(listener, app(AppState::new(ticker, catalog))).await?;

    Ok(())
}
