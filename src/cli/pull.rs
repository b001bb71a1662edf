//! Pull checkpoint files from the HuggingFace Hub

use std::path::PathBuf;

use anyhow::Result;
use hf_hub::api::sync::Api;

/// Pull checkpoint files from the HuggingFace Hub
pub async fn pull(repo: String, file: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| {
        std::env::var("LYRICD_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models"))
    });

    std::fs::create_dir_all(&output_dir)?;

    println!("Downloading from: {}", repo);

    let api = Api::new()?;
    let repo_api = api.model(repo.clone());

    if let Some(ref filename) = file {
        // Download specific file
        println!("Downloading file: {}", filename);
        let path = repo_api.get(filename)?;

        let dest = output_dir.join(filename);
        std::fs::copy(&path, &dest)?;

        println!("Downloaded to: {}", dest.display());
    } else {
        // Download the files the loader looks for
        let model_name = repo.split('/').last().unwrap_or(&repo);
        let model_dir = output_dir.join(model_name);
        std::fs::create_dir_all(&model_dir)?;

        println!("Downloading to: {}", model_dir.display());

        let files_to_try = vec![
            "tokenizer.json",
            "tokenizer_config.json",
            "special_tokens_map.json",
            "config.json",
        ];

        for filename in files_to_try {
            match repo_api.get(filename) {
                Ok(cached_path) => {
                    let dest = model_dir.join(filename);
                    std::fs::copy(&cached_path, &dest)?;
                    println!("  Downloaded: {}", filename);
                }
                Err(_) => {
                    // File doesn't exist in this repo, skip
                }
            }
        }

        println!("\nFiles downloaded to: {}", model_dir.display());
        println!("GGUF weights must be pulled by name, e.g.:");
        println!("  lyricd pull {} --file <weights>.gguf", repo);
    }

    Ok(())
}
