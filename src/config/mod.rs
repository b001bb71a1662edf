//! Configuration system for lyricd
//!
//! LyricdConfig bundles the checkpoint selection, server settings and
//! default generation knobs. Every field has a serde default so an empty
//! config file (or no file at all) is valid.

mod generation;
mod model;
mod server;

pub use generation::GenerationConfig;
pub use model::ModelConfig;
pub use server::ServerConfig;

use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Lyricd configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricdConfig {
    /// Checkpoint and device selection
    #[serde(default)]
    pub model: ModelConfig,

    /// Server settings (only for `lyricd serve`)
    #[serde(default)]
    pub server: ServerConfig,

    /// Default generation settings, overridable per request
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl LyricdConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a file, dispatching on extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            other => Err(anyhow!(
                "unsupported config extension {:?} for {}",
                other,
                path.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lyricd_config_yaml() {
        let yaml = r#"
model:
  repo: Blackop29/lyrics-gguf
  file: lyrics.Q4_K_M.gguf
  tokenizer_repo: Blackop29/lyrics
  device: cpu

server:
  port: 9000
  host: 127.0.0.1

generation:
  max_new_tokens: 200
  temperature: 0.7
"#;
        let config: LyricdConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.model.repo, "Blackop29/lyrics-gguf");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.generation.max_new_tokens, 200);
        assert_eq!(config.generation.temperature, 0.7);
        // Unset fields keep their defaults
        assert_eq!(config.generation.top_k, Some(50));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config: LyricdConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.generation.max_new_tokens, 100);
    }

    #[test]
    fn test_from_file_dispatch() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("lyricd.yaml");
        std::fs::write(&yaml_path, "server:\n  port: 8001\n").unwrap();
        let config = LyricdConfig::from_file(&yaml_path).unwrap();
        assert_eq!(config.server.port, 8001);

        let json_path = dir.path().join("lyricd.json");
        std::fs::write(&json_path, r#"{"server":{"port":8002}}"#).unwrap();
        let config = LyricdConfig::from_file(&json_path).unwrap();
        assert_eq!(config.server.port, 8002);

        let toml_path = dir.path().join("lyricd.toml");
        std::fs::write(&toml_path, "").unwrap();
        assert!(LyricdConfig::from_file(&toml_path).is_err());
    }
}
