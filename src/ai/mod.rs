//! Provider integration for comment replies and thumbnail images
//!
//! Talks to an OpenAI-compatible API either through the raw HTTP client in
//! [`client`] or, for images, through the `async-openai` SDK when an API key
//! is configured.

pub mod client;
pub mod comment;
pub mod image;
pub mod mock;
pub mod sdk;
pub mod types;

pub use client::ProviderHttpClient;
pub use comment::CommentResponder;
pub use image::{select_generator, ImageGenerator, ImageJob, ProxyImageGenerator};
pub use mock::MockImageGenerator;
pub use sdk::SdkImageGenerator;

use crate::{Error, Result};

/// Image returned by a provider: a remote URL or an inline base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    Url(String),
    Base64(String),
}

impl GeneratedImage {
    /// Pick the payload out of a provider item. Inline data wins over a URL.
    pub fn from_parts(url: Option<String>, b64_json: Option<String>) -> Result<Self> {
        match (b64_json, url) {
            (Some(b64), _) if !b64.is_empty() => Ok(GeneratedImage::Base64(b64)),
            (_, Some(url)) if !url.is_empty() => Ok(GeneratedImage::Url(url)),
            _ => Err(Error::Upstream("no image data".to_string())),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            GeneratedImage::Url(url) => Some(url),
            GeneratedImage::Base64(_) => None,
        }
    }
}
