//! Gatehouse
//!
//! Entry point for the Gatehouse authentication gateway: an HTTP edge
//! service that validates opaque bearer tokens against the configured
//! OAuth2/OIDC provider and serves its endpoints behind that check.

use gatehouse::auth::cache::MemoryClaimsCache;
use gatehouse::auth::resolver::AuthResolver;
use gatehouse::config::Config;
use gatehouse::middleware::auth::AuthState;
use gatehouse::routes;
use gatehouse::services::oidc::OidcClient;

use common::clock::SystemClock;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often the claims cache sweeps out expired entries.
const CACHE_SWEEP_INTERVAL_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatehouse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gatehouse");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        "Configuration loaded successfully"
    );

    // Construct the provider client; aborts startup on bad configuration
    let oidc_client = Arc::new(OidcClient::new(&config).map_err(|e| {
        error!("Failed to construct OIDC client: {}", e);
        e
    })?);

    let clock = Arc::new(SystemClock);
    let cache = Arc::new(MemoryClaimsCache::new(clock.clone()));
    let resolver = Arc::new(AuthResolver::new(oidc_client, cache.clone(), clock));
    let auth_state = Arc::new(AuthState { resolver });

    // Periodic sweep so expired claim entries do not accumulate between
    // lookups (expiry is otherwise lazy).
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(CACHE_SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            cache.purge_expired().await;
        }
    });

    // Build application routes
    let app = routes::build_routes(auth_state);

    // Parse bind address
    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Gatehouse listening on {}", addr);

    // Start server with graceful shutdown support
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gatehouse shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
/// Returns when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
