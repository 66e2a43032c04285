//! Request and response bodies exchanged with API clients.
//!
//! Provider wire formats live in [`crate::ai::types`].

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_STYLE: &str = "nice";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-2";

/// Who is replying: optional display name and persona description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Responder {
    pub name: Option<String>,
    pub persona: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentRequest {
    pub text: Option<String>,
    pub style: Option<String>,
    pub responder: Option<Responder>,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 1, max = 2000))]
    pub max_tokens: Option<u32>,
    pub model: Option<String>,
}

impl CommentRequest {
    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or(DEFAULT_STYLE)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_CHAT_MODEL)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

/// Image sizes accepted by the image endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    S256,
    #[serde(rename = "512x512")]
    S512,
    #[default]
    #[serde(rename = "1024x1024")]
    S1024,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::S256 => "256x256",
            ImageSize::S512 => "512x512",
            ImageSize::S1024 => "1024x1024",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRequest {
    pub topic: Option<String>,
    #[serde(rename = "splashText")]
    pub splash_text: Option<String>,
    pub style: Option<String>,
    #[serde(default)]
    pub size: ImageSize,
    pub model: Option<String>,
}

impl ImageRequest {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }
}

/// Artifacts produced by the image pipeline.
///
/// Threaded through the pipeline stages by value; each stage fills in what it
/// produced and every field may legitimately stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageArtifacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
