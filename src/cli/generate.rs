//! One-shot generation command

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use futures::StreamExt;

use crate::config::{GenerationConfig, LyricdConfig};
use crate::engine::Executor;
use crate::loader;
use crate::prompt::LyricsPrompt;

/// Generate lyrics once and stream them to stdout
#[allow(clippy::too_many_arguments)]
pub async fn generate(
    config: Option<PathBuf>,
    artist: Option<String>,
    description: Option<String>,
    max_tokens: usize,
    temperature: f64,
    top_p: f64,
    top_k: usize,
    seed: Option<u64>,
) -> Result<()> {
    let config = match config {
        Some(path) => LyricdConfig::from_file(&path)?,
        None => LyricdConfig::default(),
    };

    let loaded = loader::load_model(&config.model)?;
    let executor = Executor::new(loaded, config.model.max_context);

    let prompt = LyricsPrompt::new(artist.as_deref(), description.as_deref());
    let gen_config = GenerationConfig {
        max_new_tokens: max_tokens,
        temperature,
        top_p,
        top_k: Some(top_k),
        seed,
        ..config.generation
    };

    println!("{}", prompt.render());

    let start = std::time::Instant::now();
    let mut token_count = 0usize;

    let rendered = prompt.render();
    let stream = executor.generate(&rendered, &gen_config);
    let mut stream = std::pin::pin!(stream);

    while let Some(result) = stream.next().await {
        match result {
            Ok(token) => {
                print!("{}", token.text);
                io::stdout().flush()?;
                token_count += 1;
            }
            Err(e) => {
                eprintln!("\nError during generation: {}", e);
                break;
            }
        }
    }

    let elapsed = start.elapsed();
    let tok_per_sec = token_count as f64 / elapsed.as_secs_f64();

    println!();
    tracing::info!(
        "Generated {} tokens in {:.2}s ({:.1} tok/s)",
        token_count,
        elapsed.as_secs_f64(),
        tok_per_sec
    );

    Ok(())
}
