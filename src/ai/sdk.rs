//! Image generation through the `async-openai` SDK.

use super::image::{ImageGenerator, ImageJob};
use super::GeneratedImage;
use crate::models::ImageSize;
use crate::{Error, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateImageRequestArgs, Image, ImageModel, ImageSize as SdkImageSize};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;

pub struct SdkImageGenerator {
    client: Client<OpenAIConfig>,
}

impl SdkImageGenerator {
    /// Build a client for `api_key`, talking to `api_base` when given and to
    /// the SDK's default API base otherwise.
    pub fn new_with_client(api_key: &str, api_base: Option<&str>, http: reqwest::Client) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }

        // The SDK retries rate-limited calls by default; a zero elapsed-time
        // budget keeps every call to a single attempt.
        let backoff = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(config)
                .with_http_client(http)
                .with_backoff(backoff),
        }
    }
}

fn sdk_model(model: &str) -> ImageModel {
    match model {
        "dall-e-2" => ImageModel::DallE2,
        "dall-e-3" => ImageModel::DallE3,
        other => ImageModel::Other(other.to_string()),
    }
}

fn sdk_size(size: ImageSize) -> SdkImageSize {
    match size {
        ImageSize::S256 => SdkImageSize::S256x256,
        ImageSize::S512 => SdkImageSize::S512x512,
        ImageSize::S1024 => SdkImageSize::S1024x1024,
    }
}

#[async_trait]
impl ImageGenerator for SdkImageGenerator {
    fn strategy(&self) -> &'static str {
        "sdk"
    }

    async fn generate(&self, job: &ImageJob) -> Result<GeneratedImage> {
        let request = CreateImageRequestArgs::default()
            .prompt(job.prompt.clone())
            .model(sdk_model(&job.model))
            .n(1)
            .size(sdk_size(job.size))
            .build()?;

        let response = self.client.images().create(request).await.map_err(|e| {
            tracing::error!("OpenAI image request failed: {}", e);
            e
        })?;

        let image = response
            .data
            .first()
            .ok_or_else(|| Error::Upstream("no image data".to_string()))?;

        match image.as_ref() {
            Image::Url { url, .. } => GeneratedImage::from_parts(Some(url.clone()), None),
            Image::B64Json { b64_json, .. } => {
                GeneratedImage::from_parts(None, Some((**b64_json).clone()))
            }
        }
    }
}
