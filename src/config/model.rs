//! Checkpoint and device configuration

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use candle_core::Device;
use serde::{Deserialize, Serialize};

/// Checkpoint selection and device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// HuggingFace repository holding the GGUF weights
    #[serde(default = "default_repo")]
    pub repo: String,

    /// GGUF file name inside the repository
    #[serde(default = "default_file")]
    pub file: String,

    /// Repository holding `tokenizer.json` (usually the base model repo)
    #[serde(default = "default_tokenizer_repo")]
    pub tokenizer_repo: String,

    /// Local weights file; wins over the hub when set and present
    #[serde(default)]
    pub weights_path: Option<PathBuf>,

    /// Local `tokenizer.json`; wins over the hub when set and present
    #[serde(default)]
    pub tokenizer_path: Option<PathBuf>,

    /// Device string: "auto", "cpu", "cuda" or "cuda:N"
    #[serde(default = "default_device")]
    pub device: String,

    /// Context window the generation budget is clamped against
    #[serde(default = "default_max_context")]
    pub max_context: usize,
}

fn default_repo() -> String {
    "TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF".to_string()
}

fn default_file() -> String {
    "tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf".to_string()
}

fn default_tokenizer_repo() -> String {
    "TinyLlama/TinyLlama-1.1B-Chat-v1.0".to_string()
}

fn default_device() -> String {
    "auto".to_string()
}

fn default_max_context() -> usize {
    2048
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            file: default_file(),
            tokenizer_repo: default_tokenizer_repo(),
            weights_path: None,
            tokenizer_path: None,
            device: default_device(),
            max_context: default_max_context(),
        }
    }
}

impl ModelConfig {
    /// Resolve the configured device string.
    ///
    /// "auto" picks CUDA when the binary was built with the `cuda` feature
    /// and a device is present, otherwise CPU. Unknown strings are an error
    /// at startup rather than at request time.
    pub fn device(&self) -> Result<Device> {
        match self.device.as_str() {
            "auto" => Ok(Device::cuda_if_available(0)?),
            "cpu" => Ok(Device::Cpu),
            s if s.starts_with("cuda") => {
                let ordinal = match s.strip_prefix("cuda").and_then(|r| r.strip_prefix(':')) {
                    Some(id) => id
                        .parse::<usize>()
                        .map_err(|_| anyhow!("invalid device ordinal in '{}'", s))?,
                    None => 0,
                };
                Ok(Device::new_cuda(ordinal)?)
            }
            other => Err(anyhow!("unknown device: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_cpu() {
        let config = ModelConfig {
            device: "cpu".to_string(),
            ..Default::default()
        };
        assert!(config.device().unwrap().is_cpu());
    }

    #[test]
    fn test_device_unknown() {
        let config = ModelConfig {
            device: "tpu".to_string(),
            ..Default::default()
        };
        assert!(config.device().is_err());
    }

    #[test]
    fn test_device_bad_ordinal() {
        let config = ModelConfig {
            device: "cuda:abc".to_string(),
            ..Default::default()
        };
        assert!(config.device().is_err());
    }
}
