//! Inference executor
//!
//! Runs the prefill-then-step token loop on a loaded checkpoint. Sampling
//! (temperature, top-k, top-p, repetition penalty) is delegated to candle's
//! `LogitsProcessor`; nothing here touches logits beyond handing them over.

use anyhow::{anyhow, Result};
use async_stream::try_stream;
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::quantized_llama::ModelWeights;
use futures::Stream;
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::config::GenerationConfig;
use crate::engine::LyricGenerator;
use crate::loader::LoadedModel;

/// Inference executor
///
/// Wraps a loaded checkpoint and provides text generation. The model holds
/// mutable decode state (KV cache), so generations are serialized through a
/// lock; there is no request batching.
pub struct Executor {
    /// The loaded model; forward() needs exclusive access
    model: Mutex<ModelWeights>,
    /// Tokenizer for encoding/decoding
    tokenizer: Tokenizer,
    /// Device the model lives on
    device: Device,
    /// End-of-sequence token id
    eos_token_id: u32,
    /// Checkpoint name for /health
    name: String,
    /// Context window the generation budget is clamped against
    max_context: usize,
}

impl Executor {
    /// Create a new executor from a loaded checkpoint
    pub fn new(loaded: LoadedModel, max_context: usize) -> Self {
        Self {
            model: Mutex::new(loaded.model),
            tokenizer: loaded.tokenizer,
            device: loaded.device,
            eos_token_id: loaded.eos_token_id,
            name: loaded.name,
            max_context,
        }
    }

    /// Checkpoint name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generate text from a prompt
    ///
    /// Returns a stream of generated tokens. The stream ends on EOS, on the
    /// token budget, or immediately if the prompt tokenizes to nothing.
    pub fn generate<'a>(
        &'a self,
        prompt: &'a str,
        gen_config: &'a GenerationConfig,
    ) -> impl Stream<Item = Result<GeneratedToken>> + 'a {
        try_stream! {
            let encoding = self
                .tokenizer
                .encode(prompt, true)
                .map_err(|e| anyhow!("tokenization failed: {}", e))?;
            let prompt_tokens = encoding.get_ids().to_vec();

            if !prompt_tokens.is_empty() {
                let max_new = token_budget(
                    self.max_context,
                    prompt_tokens.len(),
                    gen_config.max_new_tokens,
                );
                tracing::debug!(
                    "prompt: {} tokens, budget: {} new tokens",
                    prompt_tokens.len(),
                    max_new
                );

                let mut logits_processor = build_logits_processor(gen_config);
                let mut all_tokens = prompt_tokens.clone();

                let mut model = self.model.lock().await;

                // Prefill: the whole prompt in one forward pass.
                // index_pos 0 resets the library's KV cache.
                let input = Tensor::new(prompt_tokens.as_slice(), &self.device)?.unsqueeze(0)?;
                let mut logits = model.forward(&input, 0)?.squeeze(0)?;

                for index in 0..max_new {
                    let adjusted = self.penalized_logits(&logits, gen_config, &all_tokens)?;
                    let next_token = logits_processor.sample(&adjusted)?;
                    all_tokens.push(next_token);

                    if next_token == self.eos_token_id {
                        tracing::debug!("hit EOS, stopping generation");
                        break;
                    }

                    let text = self
                        .tokenizer
                        .decode(&[next_token], true)
                        .map_err(|e| anyhow!("decode failed: {}", e))?;

                    yield GeneratedToken {
                        token_id: next_token,
                        text,
                    };

                    if index + 1 == max_new {
                        break;
                    }

                    let input = Tensor::new(&[next_token], &self.device)?.unsqueeze(0)?;
                    logits = model
                        .forward(&input, prompt_tokens.len() + index)?
                        .squeeze(0)?;
                }
            }
        }
    }

    /// Generate text and return the complete result
    pub async fn generate_text(
        &self,
        prompt: &str,
        gen_config: &GenerationConfig,
    ) -> Result<String> {
        use futures::StreamExt;

        let mut result = String::new();
        let mut stream = std::pin::pin!(self.generate(prompt, gen_config));

        while let Some(token_result) = stream.next().await {
            let token = token_result?;
            result.push_str(&token.text);

            if truncate_at_stop(&mut result, &gen_config.stop_sequences) {
                return Ok(result);
            }
        }

        Ok(result)
    }

    /// Apply the repetition penalty over the trailing token window
    fn penalized_logits(
        &self,
        logits: &Tensor,
        gen_config: &GenerationConfig,
        tokens: &[u32],
    ) -> Result<Tensor> {
        let logits = logits.to_dtype(DType::F32)?;
        if gen_config.repeat_penalty == 1.0 {
            return Ok(logits);
        }
        let start = tokens.len().saturating_sub(gen_config.repeat_last_n);
        Ok(candle_transformers::utils::apply_repeat_penalty(
            &logits,
            gen_config.repeat_penalty,
            &tokens[start..],
        )?)
    }
}

#[async_trait]
impl LyricGenerator for Executor {
    fn model_name(&self) -> &str {
        self.name()
    }

    async fn generate_text(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        Executor::generate_text(self, prompt, config).await
    }
}

/// Map the generation config onto the library's sampling strategy
fn build_logits_processor(gen_config: &GenerationConfig) -> LogitsProcessor {
    let seed = gen_config.seed.unwrap_or_else(rand::random);
    let temperature = gen_config.temperature;

    let sampling = if gen_config.is_greedy() {
        Sampling::ArgMax
    } else {
        match (gen_config.top_k, gen_config.top_p) {
            (Some(k), p) if p < 1.0 => Sampling::TopKThenTopP { k, p, temperature },
            (Some(k), _) => Sampling::TopK { k, temperature },
            (None, p) if p < 1.0 => Sampling::TopP { p, temperature },
            (None, _) => Sampling::All { temperature },
        }
    };

    LogitsProcessor::from_sampling(seed, sampling)
}

/// Clamp the requested token count to what fits in the context window
fn token_budget(max_context: usize, prompt_len: usize, requested: usize) -> usize {
    requested.min(max_context.saturating_sub(prompt_len))
}

/// Truncate at the earliest matched stop sequence. Returns true on a match.
fn truncate_at_stop(result: &mut String, stop_sequences: &[String]) -> bool {
    let earliest = stop_sequences
        .iter()
        .filter_map(|stop| result.find(stop.as_str()))
        .min();
    match earliest {
        Some(pos) => {
            result.truncate(pos);
            true
        }
        None => false,
    }
}

/// A generated token with its decoded text
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    /// Token ID
    pub token_id: u32,
    /// Decoded text
    pub text: String,
}
