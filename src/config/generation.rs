//! Generation configuration settings

use serde::{Deserialize, Serialize};

/// Configuration for text generation
///
/// Defaults match the sampling setup the service shipped with:
/// 100 new tokens, temperature 0.9, top-p 0.95, top-k 50 and a 1.2
/// repetition penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maximum number of new tokens to generate
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: usize,

    /// Temperature for sampling (0 = greedy)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Top-p nucleus sampling threshold (1.0 = disabled)
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Top-k sampling (None = disabled)
    #[serde(default = "default_top_k")]
    pub top_k: Option<usize>,

    /// Repetition penalty (1.0 = no penalty)
    #[serde(default = "default_repeat_penalty")]
    pub repeat_penalty: f32,

    /// Number of trailing tokens the repetition penalty looks at
    #[serde(default = "default_repeat_last_n")]
    pub repeat_last_n: usize,

    /// Stop sequences
    #[serde(default)]
    pub stop_sequences: Vec<String>,

    /// Random seed (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_new_tokens() -> usize {
    100
}

fn default_temperature() -> f64 {
    0.9
}

fn default_top_p() -> f64 {
    0.95
}

fn default_top_k() -> Option<usize> {
    Some(50)
}

fn default_repeat_penalty() -> f32 {
    1.2
}

fn default_repeat_last_n() -> usize {
    64
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            repeat_penalty: default_repeat_penalty(),
            repeat_last_n: default_repeat_last_n(),
            stop_sequences: Vec::new(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Create a greedy decoding config (temperature = 0)
    pub fn greedy() -> Self {
        Self {
            temperature: 0.0,
            top_p: 1.0,
            top_k: None,
            ..Default::default()
        }
    }

    /// Check if greedy decoding should be used
    pub fn is_greedy(&self) -> bool {
        self.temperature <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_new_tokens, 100);
        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.top_k, Some(50));
        assert_eq!(config.repeat_penalty, 1.2);
        assert!(!config.is_greedy());
    }

    #[test]
    fn test_greedy() {
        assert!(GenerationConfig::greedy().is_greedy());
    }
}
