//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::engine::LyricGenerator;
use crate::prompt::{clean_output, LyricsPrompt};

/// Shared application state
pub struct AppState {
    /// The generation engine
    pub generator: Arc<dyn LyricGenerator>,
    /// Configured generation defaults; requests override per field
    pub defaults: GenerationConfig,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        model: state.generator.model_name().to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// Lyrics generation endpoint
pub async fn generate_lyrics(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LyricsRequest>,
) -> Response {
    let prompt = LyricsPrompt::new(request.artist.as_deref(), request.description.as_deref());

    // Request knobs override the configured defaults
    let gen_config = GenerationConfig {
        max_new_tokens: request.max_length.unwrap_or(state.defaults.max_new_tokens),
        temperature: request.temperature.unwrap_or(state.defaults.temperature),
        top_p: request.top_p.unwrap_or(state.defaults.top_p),
        top_k: request.top_k.or(state.defaults.top_k),
        seed: request.seed.or(state.defaults.seed),
        ..state.defaults.clone()
    };

    tracing::info!(
        artist = %prompt.artist(),
        max_new_tokens = gen_config.max_new_tokens,
        "generating lyrics"
    );

    match state
        .generator
        .generate_text(&prompt.render(), &gen_config)
        .await
    {
        Ok(text) => {
            let response = LyricsResponse {
                id: format!("lyr-{}", uuid::Uuid::new_v4()),
                created: chrono::Utc::now().timestamp(),
                lyrics: clean_output(&text),
                metadata: LyricsMetadata {
                    artist: prompt.artist().to_string(),
                    description: prompt.description().to_string(),
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("generation failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct LyricsRequest {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Maximum number of new tokens (wire name kept from the original API)
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct LyricsResponse {
    pub id: String,
    pub created: i64,
    pub lyrics: String,
    pub metadata: LyricsMetadata,
}

#[derive(Serialize)]
pub struct LyricsMetadata {
    pub artist: String,
    pub description: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_all_fields_optional() {
        let request: LyricsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.artist.is_none());
        assert!(request.description.is_none());
        assert!(request.max_length.is_none());
        assert!(request.temperature.is_none());
    }

    #[test]
    fn test_request_full_body() {
        let body = r#"{
            "artist": "The Weeknd",
            "description": "city nights",
            "max_length": 150,
            "temperature": 0.7,
            "top_p": 0.9,
            "top_k": 40
        }"#;
        let request: LyricsRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.artist.as_deref(), Some("The Weeknd"));
        assert_eq!(request.max_length, Some(150));
        assert_eq!(request.top_k, Some(40));
    }

    #[test]
    fn test_response_shape() {
        let response = LyricsResponse {
            id: "lyr-0".to_string(),
            created: 0,
            lyrics: "la la la".to_string(),
            metadata: LyricsMetadata {
                artist: "a pop artist".to_string(),
                description: "love and life".to_string(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["lyrics"], "la la la");
        assert_eq!(json["metadata"]["artist"], "a pop artist");
        assert_eq!(json["metadata"]["description"], "love and life");
    }
}
