//! HTTP server for lyrics generation
//!
//! JSON request/response shaping over the generation engine.

mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{LyricdConfig, ServerConfig};
use crate::engine::LyricGenerator;

pub use handlers::{AppState, LyricsRequest, LyricsResponse};
pub use routes::api_routes;

/// Build the application router
pub fn app(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut router = Router::new().merge(api_routes());

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    if config.request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Start the HTTP server
pub async fn start(generator: Arc<dyn LyricGenerator>, config: LyricdConfig) -> Result<()> {
    let state = Arc::new(AppState {
        generator,
        defaults: config.generation.clone(),
    });

    let app = app(state, &config.server);

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  POST /generate-pop-lyrics - Lyrics generation");

    axum::serve(listener, app).await?;

    Ok(())
}
