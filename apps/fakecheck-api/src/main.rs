//! fakecheck server
//!
//! Serves the Polish fake-news classifier over HTTP. All artifacts (stop
//! words, morphological dictionary, TF-IDF vectorizer and the three
//! classifiers) are loaded once at startup; a missing or malformed
//! artifact aborts startup.
//!
//! - `GET /health`
//! - `POST /api/verify`
//! - `GET /api/verdict/pending`

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;
#[cfg(test)]
mod tests;

use api::{handle_health, handle_pending, handle_verify};
use state::AppState;

/// Command-line arguments for the fakecheck server
#[derive(Parser, Debug)]
#[command(name = "fakecheck-api")]
#[command(about = "Classifies Polish news articles as probably true or probably fake")]
struct Args {
    /// Directory holding the fitted artifacts
    #[arg(long, env = "FAKECHECK_ARTIFACT_DIR", default_value = "./artifacts")]
    artifact_dir: PathBuf,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Pipeline timeout per request in milliseconds
    #[arg(long, env = "FAKECHECK_TIMEOUT_MS", default_value = "10000")]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/verify", post(handle_verify))
        .route("/api/verdict/pending", get(handle_pending))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting fakecheck server on {}:{}", args.host, args.port);

    let state = AppState::load(&args.artifact_dir, args.timeout_ms)?;
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Pipeline timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
