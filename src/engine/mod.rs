//! Generation engine
//!
//! A pass-through layer over candle's decoding routine:
//! - Executor: owns a loaded checkpoint and runs the token loop
//! - LyricGenerator: the seam the HTTP layer generates through

mod executor;

pub use executor::{Executor, GeneratedToken};

use anyhow::Result;
use async_trait::async_trait;

use crate::config::GenerationConfig;

/// Text generation seam between the HTTP layer and the model.
///
/// Handlers only need a name for /health and a prompt-in, text-out call,
/// which keeps the HTTP surface testable without checkpoint files.
#[async_trait]
pub trait LyricGenerator: Send + Sync {
    /// Checkpoint name reported by /health
    fn model_name(&self) -> &str;

    /// Generate a completion for the prompt
    async fn generate_text(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}
