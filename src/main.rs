use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use diarias_web::config::Config;
use diarias_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("diarias_web=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to read configuration")?;
    let addr = config.socket_addr().context("Invalid listen address")?;

    // Spelling amounts in words is left to the caller.
    let state = AppState::new();
    let router = app(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Per-diem service listening on http://{}", addr);
    tracing::info!("  POST /api/diarias/calcular    - chained itinerary");
    tracing::info!("  POST /api/simulacao/diaria    - single trip simulation");
    tracing::info!("  POST /api/simulacao/periodos  - standalone periods");

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
