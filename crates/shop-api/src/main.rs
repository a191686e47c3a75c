//! Stride Shop API - Mocked catalog and stock service.
//!
//! This binary serves the product catalog and stock levels on port 3333.
//! It exists so the storefront has an external collaborator to talk to in
//! development and in tests; the data comes from a JSON fixture loaded at
//! startup and never changes while the process runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::trace::TraceLayer;

use stride_shop_api::catalog::Catalog;
use stride_shop_api::config::ShopApiConfig;
use stride_shop_api::routes;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ShopApiConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stride_shop_api=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load the catalog fixture
    let catalog = Catalog::load(&config.fixture_path).expect("Failed to load catalog fixture");
    tracing::info!(
        products = catalog.products().len(),
        fixture = %config.fixture_path.display(),
        "catalog loaded"
    );

    // Build router
    let app = routes::router(catalog).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("shop-api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
