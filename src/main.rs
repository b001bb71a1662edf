use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lyricd::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyricd=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            host,
            model_repo,
        } => {
            lyricd::cli::serve(config, port, host, model_repo).await?;
        }
        Commands::Generate {
            config,
            artist,
            description,
            max_tokens,
            temperature,
            top_p,
            top_k,
            seed,
        } => {
            lyricd::cli::generate(
                config,
                artist,
                description,
                max_tokens,
                temperature,
                top_p,
                top_k,
                seed,
            )
            .await?;
        }
        Commands::Pull { repo, file, output } => {
            lyricd::cli::pull(repo, file, output).await?;
        }
    }

    Ok(())
}
