//! Lyricd - lyrics-generation server over a pretrained causal LM
//!
//! Lyricd is a thin wrapper around the candle inference stack,
//! providing CLI and HTTP interfaces for lyrics generation.
//!
//! # Architecture
//!
//! Lyricd follows the thin-layer design principle:
//! - **candle / tokenizers**: model weights, forward pass, sampling, tokenization
//! - **lyricd**: CLI, HTTP server, prompt templating, request/response shaping
//!
//! # Example
//!
//! ```bash
//! # Start the server with the configured checkpoint
//! lyricd serve --port 8000
//!
//! # One-shot generation
//! lyricd generate --artist "Dua Lipa" --description "dancing through heartbreak"
//!
//! # Prefetch a checkpoint from the HuggingFace Hub
//! lyricd pull TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod loader;
pub mod prompt;
pub mod server;

// Re-export key types
pub use config::{GenerationConfig, LyricdConfig, ModelConfig, ServerConfig};
pub use engine::{Executor, GeneratedToken, LyricGenerator};
pub use loader::{load_model, LoadedModel};
