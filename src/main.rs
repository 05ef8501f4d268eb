use clap::Parser;
use placefinder::api::create_router;
use placefinder::build_state;
use placefinder::config::Config;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("placefinder=info,tower_http=info")),
        )
        .init();

    // 1. Configuration:
    let config = Config::parse();
    tracing::info!("Starting PlaceFinder on {}", config.bind);

    // 2. Shared components (dataset, favorites, rate limiter, upstream clients):
    let state = build_state(&config).await?;

    // 3. HTTP Router:
    let app = create_router(state);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
