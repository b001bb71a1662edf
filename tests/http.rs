//! HTTP surface tests
//!
//! Drive the router directly with a canned generator so no checkpoint
//! files are needed.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use lyricd::config::{GenerationConfig, ServerConfig};
use lyricd::server::{app, AppState};
use lyricd::LyricGenerator;

/// Generator returning a fixed reply, recording the prompt it was given
struct CannedGenerator {
    reply: &'static str,
    last_prompt: Mutex<Option<String>>,
    last_config: Mutex<Option<GenerationConfig>>,
}

impl CannedGenerator {
    fn new(reply: &'static str) -> Self {
        Self {
            reply,
            last_prompt: Mutex::new(None),
            last_config: Mutex::new(None),
        }
    }
}

#[async_trait]
impl LyricGenerator for CannedGenerator {
    fn model_name(&self) -> &str {
        "test-model"
    }

    async fn generate_text(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        *self.last_config.lock().unwrap() = Some(config.clone());
        Ok(self.reply.to_string())
    }
}

/// Generator that always fails
struct FailingGenerator;

#[async_trait]
impl LyricGenerator for FailingGenerator {
    fn model_name(&self) -> &str {
        "broken-model"
    }

    async fn generate_text(&self, _prompt: &str, _config: &GenerationConfig) -> Result<String> {
        Err(anyhow!("forward pass failed"))
    }
}

fn test_app(generator: Arc<dyn LyricGenerator>) -> axum::Router {
    let state = Arc::new(AppState {
        generator,
        defaults: GenerationConfig::default(),
    });
    app(state, &ServerConfig::default())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-pop-lyrics")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_model() {
    let app = test_app(Arc::new(CannedGenerator::new("x")));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model"], "test-model");
}

#[tokio::test]
async fn generate_returns_lyrics_and_metadata() {
    let generator = Arc::new(CannedGenerator::new("\nneon skyline, hold me close\n\n"));
    let app = test_app(generator.clone());

    let response = app
        .oneshot(post_json(
            r#"{"artist": "The Weeknd", "description": "city nights", "max_length": 150}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Output is trimmed before it goes on the wire
    assert_eq!(json["lyrics"], "neon skyline, hold me close");
    assert_eq!(json["metadata"]["artist"], "The Weeknd");
    assert_eq!(json["metadata"]["description"], "city nights");
    assert!(json["id"].as_str().unwrap().starts_with("lyr-"));
    assert!(json["created"].as_i64().unwrap() > 0);

    // The prompt fed to the model follows the fine-tuning template
    let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
    assert_eq!(
        prompt,
        "Write a song in the style of The Weeknd about city nights.\n\n[Verse 1]\n"
    );

    // Request knobs override the configured defaults
    let config = generator.last_config.lock().unwrap().clone().unwrap();
    assert_eq!(config.max_new_tokens, 150);
    assert_eq!(config.temperature, 0.9);
}

#[tokio::test]
async fn generate_fills_missing_fields_with_defaults() {
    let generator = Arc::new(CannedGenerator::new("la la la"));
    let app = test_app(generator.clone());

    let response = app.oneshot(post_json("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["metadata"]["artist"], "a pop artist");
    assert_eq!(json["metadata"]["description"], "love and life");

    let config = generator.last_config.lock().unwrap().clone().unwrap();
    assert_eq!(config.max_new_tokens, 100);
    assert_eq!(config.top_k, Some(50));
}

#[tokio::test]
async fn generate_failure_maps_to_500() {
    let app = test_app(Arc::new(FailingGenerator));

    let response = app.oneshot(post_json("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "forward pass failed");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = test_app(Arc::new(CannedGenerator::new("x")));

    let response = app.oneshot(post_json("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_content_type_is_rejected() {
    let app = test_app(Arc::new(CannedGenerator::new("x")));

    let request = Request::builder()
        .method("POST")
        .uri("/generate-pop-lyrics")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
