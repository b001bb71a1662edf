//! HTTP server command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::LyricdConfig;
use crate::engine::Executor;
use crate::loader;
use crate::server;

/// Start the lyrics-generation server
pub async fn serve(
    config: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
    model_repo: Option<String>,
) -> Result<()> {
    let mut config = match config {
        Some(path) => LyricdConfig::from_file(&path)?,
        None => LyricdConfig::default(),
    };

    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(repo) = model_repo {
        config.model.repo = repo;
    }

    // Load the checkpoint before binding so /health never reports a model
    // that is not actually in memory.
    let loaded = loader::load_model(&config.model)?;
    let executor = Arc::new(Executor::new(loaded, config.model.max_context));

    server::start(executor, config).await?;

    Ok(())
}
