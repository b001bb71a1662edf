//! Checkpoint loading
//!
//! Resolves the GGUF weights and `tokenizer.json` (local path first, then
//! the HuggingFace Hub cache) and hands construction of the model to
//! candle. All tensor and format handling lives in the library.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use candle_core::quantized::gguf_file;
use candle_core::Device;
use candle_transformers::models::quantized_llama::ModelWeights;
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;

use crate::config::ModelConfig;

/// Token strings tried when resolving the end-of-sequence id
const EOS_CANDIDATES: &[&str] = &["</s>", "<|endoftext|>", "<eos>", "<|end_of_text|>"];

/// A loaded checkpoint, ready to be wrapped in an executor
pub struct LoadedModel {
    /// Quantized model weights (forward pass lives in candle)
    pub model: ModelWeights,
    /// Tokenizer from `tokenizer.json`
    pub tokenizer: Tokenizer,
    /// End-of-sequence token id
    pub eos_token_id: u32,
    /// Device the weights were loaded onto
    pub device: Device,
    /// Display name reported by /health
    pub name: String,
}

/// Load the configured checkpoint
///
/// Model construction and tokenization are entirely the library's job;
/// this function only resolves file paths, the device and the EOS id.
pub fn load_model(config: &ModelConfig) -> Result<LoadedModel> {
    let device = config.device()?;
    tracing::info!(
        "Loading model {} on {}",
        config.repo,
        if device.is_cuda() { "cuda" } else { "cpu" }
    );

    let weights_path = resolve_weights(config)?;
    let tokenizer_path = resolve_tokenizer(config)?;

    let tokenizer = Tokenizer::from_file(&tokenizer_path)
        .map_err(|e| anyhow!("failed to load tokenizer {}: {}", tokenizer_path.display(), e))?;
    let eos_token_id = resolve_eos(&tokenizer);

    let start = std::time::Instant::now();
    let mut file = std::fs::File::open(&weights_path)
        .with_context(|| format!("failed to open weights {}", weights_path.display()))?;
    let content = gguf_file::Content::read(&mut file)
        .with_context(|| format!("failed to read GGUF {}", weights_path.display()))?;

    tracing::debug!(
        "GGUF container: {} tensors, {} metadata entries",
        content.tensor_infos.len(),
        content.metadata.len()
    );

    let model = ModelWeights::from_gguf(content, &mut file, &device)
        .with_context(|| format!("failed to build model from {}", weights_path.display()))?;

    tracing::info!("Model loaded successfully in {:.1?}", start.elapsed());

    Ok(LoadedModel {
        model,
        tokenizer,
        eos_token_id,
        device,
        name: config.repo.clone(),
    })
}

/// Resolve the weights file: explicit local path first, then the hub cache
fn resolve_weights(config: &ModelConfig) -> Result<PathBuf> {
    if let Some(ref path) = config.weights_path {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(anyhow!("weights_path does not exist: {}", path.display()));
    }

    let api = Api::new()?;
    let path = api
        .model(config.repo.clone())
        .get(&config.file)
        .with_context(|| format!("failed to fetch {} from {}", config.file, config.repo))?;
    Ok(path)
}

/// Resolve `tokenizer.json`: explicit local path first, then the hub cache
fn resolve_tokenizer(config: &ModelConfig) -> Result<PathBuf> {
    if let Some(ref path) = config.tokenizer_path {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(anyhow!("tokenizer_path does not exist: {}", path.display()));
    }

    let api = Api::new()?;
    let path = api
        .model(config.tokenizer_repo.clone())
        .get("tokenizer.json")
        .with_context(|| {
            format!("failed to fetch tokenizer.json from {}", config.tokenizer_repo)
        })?;
    Ok(path)
}

/// Pick the EOS id from the tokenizer vocabulary.
///
/// Tokenizers don't agree on the token string, so a few common spellings
/// are tried. Generation without a recognized EOS still terminates via the
/// token budget, so a miss is a warning rather than an error.
fn resolve_eos(tokenizer: &Tokenizer) -> u32 {
    for candidate in EOS_CANDIDATES {
        if let Some(id) = tokenizer.token_to_id(candidate) {
            tracing::debug!("EOS token: {} (id {})", candidate, id);
            return id;
        }
    }
    tracing::warn!("no EOS token found in tokenizer, stopping on token budget only");
    u32::MAX
}
