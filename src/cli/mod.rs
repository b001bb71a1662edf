//! CLI commands

mod generate;
mod pull;
mod serve;

pub use generate::generate;
pub use pull::pull;
pub use serve::serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lyricd - lyrics-generation server over a pretrained causal LM
#[derive(Parser)]
#[command(name = "lyricd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the lyrics-generation server
    Serve {
        /// Config file (YAML or JSON)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// GGUF checkpoint repository (overrides config)
        #[arg(long)]
        model_repo: Option<String>,
    },

    /// Generate lyrics once and print them to stdout
    Generate {
        /// Config file (YAML or JSON)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Artist whose style to imitate
        #[arg(long, short)]
        artist: Option<String>,

        /// What the song is about
        #[arg(long, short)]
        description: Option<String>,

        /// Maximum new tokens to generate
        #[arg(long, default_value = "100")]
        max_tokens: usize,

        /// Sampling temperature (0 = greedy)
        #[arg(long, default_value = "0.9")]
        temperature: f64,

        /// Top-p nucleus sampling
        #[arg(long, default_value = "0.95")]
        top_p: f64,

        /// Top-k sampling
        #[arg(long, default_value = "50")]
        top_k: usize,

        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pull checkpoint files from the HuggingFace Hub
    Pull {
        /// Repository ID (e.g., "TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF")
        repo: String,

        /// Specific file to download (e.g., "tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf")
        #[arg(long)]
        file: Option<String>,

        /// Output directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
