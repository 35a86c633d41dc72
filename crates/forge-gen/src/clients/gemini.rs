//! Gemini / Imagen client
//!
//! Card text comes from `generateContent` with a JSON response schema;
//! images come from the Imagen `predict` endpoint as base64 PNG payloads,
//! returned to callers as `data:image/png;base64,...` URIs. Card text and
//! art are requested concurrently and joined before returning.

use crate::client::*;
use crate::config::ForgeConfig;
use crate::options::AspectRatio;
use forge_core::{ForgeError, Result};
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const MAX_RETRIES: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

const CARD_FAILURE: &str = "Failed to generate content from AI. Please check your prompts and try again.";
const TILE_FAILURE: &str = "Failed to generate map tile from AI. Please check your prompt and try again.";
const MAP_FAILURE: &str = "Failed to generate map from AI. Please check your prompt and try again.";

/// Gemini client for card text and Imagen art
pub struct GeminiClient {
    api_key: String,
    api_url: String,
    text_model: String,
    image_model: String,
    card_candidates: u32,
    tile_candidates: u32,
}

impl GeminiClient {
    /// Create a new GeminiClient from config
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let api_key = config
            .api_key("gemini")
            .ok_or_else(|| {
                ForgeError::GenerationError(
                    "Gemini API key not configured. Set FORGE_GEMINI_API_KEY or add to .forge/config.toml"
                        .to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("gemini")
            .unwrap_or(DEFAULT_GEMINI_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            text_model: config.generation.text_model.clone(),
            image_model: config.generation.image_model.clone(),
            card_candidates: config.generation.card_candidates,
            tile_candidates: config.generation.tile_candidates,
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_url, model, method)
    }

    fn generate_card_text(&self, theme: &str) -> Result<CardText> {
        let payload = card_text_payload(theme);
        let response = self.post_json_with_retry(&self.endpoint(&self.text_model, "generateContent"), &payload)?;
        parse_card_text(&response)
    }

    fn generate_images(&self, prompt: &str, count: u32, ratio: AspectRatio) -> Result<Vec<String>> {
        let payload = image_payload(prompt, count, ratio);
        let response = self.post_json_with_retry(&self.endpoint(&self.image_model, "predict"), &payload)?;
        parse_image_predictions(&response)
    }

    fn post_json_with_retry(&self, url: &str, payload: &Value) -> Result<Value> {
        for attempt in 0..MAX_RETRIES {
            let agent = build_agent();
            let response = agent
                .post(url)
                .header("x-goog-api-key", &self.api_key)
                .header("Content-Type", "application/json")
                .send_json(payload);

            match response {
                Ok(mut ok) => {
                    return ok.body_mut().read_json().map_err(|e| {
                        ForgeError::GenerationError(format!(
                            "Failed to parse Gemini response: {}",
                            e
                        ))
                    });
                }
                Err(e) => {
                    if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                        tracing::debug!(attempt, error = %e, "retrying Gemini request");
                        sleep_backoff(attempt);
                        continue;
                    }
                    return Err(ForgeError::GenerationError(format!(
                        "Gemini API request failed: {}",
                        e
                    )));
                }
            }
        }

        Err(ForgeError::GenerationError(
            "Gemini API request failed after retries".to_string(),
        ))
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

fn is_retryable_error(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::Timeout(_)
        | ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound => true,
        ureq::Error::StatusCode(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
        _ => false,
    }
}

fn sleep_backoff(attempt: usize) {
    let delay_ms = RETRY_BASE_DELAY_MS.saturating_mul(1u64 << attempt);
    std::thread::sleep(Duration::from_millis(delay_ms));
}

/// Replace a low-level failure with the user-facing message, keeping the cause in the log
fn user_facing(message: &str, error: ForgeError) -> ForgeError {
    tracing::warn!(error = %error, "{}", message);
    ForgeError::GenerationError(format!("{} ({})", message, error))
}

impl GenerationClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn health_check(&self) -> Result<ClientStatus> {
        if self.api_key.is_empty() {
            return Ok(ClientStatus::NoApiKey);
        }
        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Ok(ClientStatus::Unavailable(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        Ok(ClientStatus::Available)
    }

    fn request_card_content(&self, request: &CardContentRequest) -> Result<CardContent> {
        let art_prompt = card_art_prompt(request);

        let (text, images) = std::thread::scope(|scope| {
            let text = scope.spawn(|| self.generate_card_text(&request.text_prompt));
            let images = scope.spawn(|| {
                self.generate_images(&art_prompt, self.card_candidates, request.aspect_ratio)
            });
            (join_worker(text), join_worker(images))
        });

        let text = text.map_err(|e| user_facing(CARD_FAILURE, e))?;
        let images = images.map_err(|e| user_facing(CARD_FAILURE, e))?;
        Ok(CardContent {
            image_candidates: images,
            text,
        })
    }

    fn request_map_tile(&self, request: &MapTileRequest) -> Result<TileContent> {
        let prompt = tile_prompt(request);
        let images = self
            .generate_images(&prompt, self.tile_candidates, AspectRatio::Square)
            .map_err(|e| user_facing(TILE_FAILURE, e))?;
        Ok(TileContent {
            image_candidates: images,
        })
    }

    fn request_map(&self, request: &MapRequest) -> Result<MapContent> {
        let prompt = map_prompt(request);
        let images = self
            .generate_images(&prompt, 1, AspectRatio::Square)
            .map_err(|e| user_facing(MAP_FAILURE, e))?;
        let image_uri = images.into_iter().next().ok_or_else(|| {
            ForgeError::GenerationError(format!("{} (no image was returned)", MAP_FAILURE))
        })?;
        Ok(MapContent { image_uri })
    }
}

fn join_worker<T>(handle: std::thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(ForgeError::GenerationError("request worker panicked".to_string())))
}

pub fn card_art_prompt(request: &CardContentRequest) -> String {
    format!(
        "{}, style of {}, {}, high detail, digital painting",
        request.art_prompt, request.art_style, request.art_keywords
    )
}

pub fn card_text_prompt(theme: &str) -> String {
    format!(
        "Based on the following theme, create content for a game card. Theme: \"{}\"",
        theme
    )
}

pub fn tile_prompt(request: &MapTileRequest) -> String {
    format!(
        "{}, {}, top-down view, game asset, seamless texture, high detail",
        request.prompt, request.art_keywords
    )
}

pub fn map_prompt(request: &MapRequest) -> String {
    format!(
        "A {} style map of a {}: {}, top-down cartographic view, high detail",
        request.map_style, request.map_type, request.prompt
    )
}

fn card_text_payload(theme: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": card_text_prompt(theme) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "name": {
                        "type": "STRING",
                        "description": "A creative and fitting name for the card (e.g., \"Blade of Judgment\")."
                    },
                    "description": {
                        "type": "STRING",
                        "description": "The card's game effect or action (e.g., \"Deals 15 damage to all adjacent enemies. Requires 3 energy.\")."
                    },
                    "flavorText": {
                        "type": "STRING",
                        "description": "A short, evocative, and thematic text for lore or mood (e.g., \"It was once a forest, until they came.\")."
                    }
                },
                "required": ["name", "description", "flavorText"]
            }
        }
    })
}

fn image_payload(prompt: &str, count: u32, ratio: AspectRatio) -> Value {
    json!({
        "instances": [{ "prompt": prompt }],
        "parameters": {
            "sampleCount": count,
            "aspectRatio": ratio.as_str(),
            "outputMimeType": "image/png"
        }
    })
}

/// Extract the card text JSON from a `generateContent` response
pub fn parse_card_text(response: &Value) -> Result<CardText> {
    let text = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.pointer("/content/parts/0/text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| {
            ForgeError::GenerationError("No card text in Gemini response".to_string())
        })?;

    serde_json::from_str(text)
        .map_err(|e| ForgeError::GenerationError(format!("Malformed card text: {}", e)))
}

/// Turn `predict` predictions into PNG data URIs, in response order
pub fn parse_image_predictions(response: &Value) -> Result<Vec<String>> {
    let predictions = response
        .get("predictions")
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            ForgeError::GenerationError(format!(
                "Unexpected Imagen response format: {}",
                serde_json::to_string_pretty(response).unwrap_or_default()
            ))
        })?;

    Ok(predictions
        .iter()
        .filter_map(|p| p.get("bytesBase64Encoded").and_then(|b| b.as_str()))
        .map(|b64| format!("data:image/png;base64,{}", b64))
        .collect())
}
