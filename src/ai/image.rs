use super::client::ProviderHttpClient;
use super::sdk::SdkImageGenerator;
use super::types::ImageGenerationRequest;
use super::GeneratedImage;
use crate::config::ProviderConfig;
use crate::models::ImageSize;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Everything a provider needs to render one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageJob {
    pub model: String,
    pub prompt: String,
    pub size: ImageSize,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Short name of the strategy, for logging.
    fn strategy(&self) -> &'static str;

    async fn generate(&self, job: &ImageJob) -> Result<GeneratedImage>;
}

/// Generates images by POSTing to `{base_url}/v1/images/generations`.
pub struct ProxyImageGenerator {
    http: ProviderHttpClient,
}

impl ProxyImageGenerator {
    pub fn new(http: ProviderHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ImageGenerator for ProxyImageGenerator {
    fn strategy(&self) -> &'static str {
        "proxy"
    }

    async fn generate(&self, job: &ImageJob) -> Result<GeneratedImage> {
        let request = ImageGenerationRequest {
            model: job.model.clone(),
            prompt: job.prompt.clone(),
            n: 1,
            size: job.size.as_str().to_string(),
        };

        let response = self.http.image_generation(&request).await?;

        let image_data = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::Upstream("no image data".to_string()))?;

        GeneratedImage::from_parts(image_data.url, image_data.b64_json)
    }
}

/// Choose the generation strategy for one request.
///
/// An API key selects the SDK client, otherwise a base URL selects the proxy.
/// Clients are built here, per request, so an unconfigured process still
/// starts and serves everything else.
pub fn select_generator(config: &ProviderConfig, client: Client) -> Result<Box<dyn ImageGenerator>> {
    if let Some(api_key) = &config.api_key {
        return Ok(Box::new(SdkImageGenerator::new_with_client(
            api_key,
            config.sdk_base_url.as_deref(),
            client,
        )));
    }

    ProviderHttpClient::from_config(config, client)
        .map(|http| Box::new(ProxyImageGenerator::new(http)) as Box<dyn ImageGenerator>)
        .ok_or_else(|| Error::Configuration("image service not configured".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job() -> ImageJob {
        ImageJob {
            model: "dall-e-2".to_string(),
            prompt: "YouTube thumbnail for a video about space.".to_string(),
            size: ImageSize::S512,
        }
    }

    fn proxy(server: &MockServer) -> ProxyImageGenerator {
        ProxyImageGenerator::new(ProviderHttpClient::new(server.uri(), None))
    }

    #[test]
    fn test_select_generator_prefers_sdk_with_key() {
        let config = ProviderConfig {
            api_key: Some("sk-test".to_string()),
            base_url: Some("http://provider.local".to_string()),
            sdk_base_url: None,
        };
        let generator = select_generator(&config, Client::new()).unwrap();
        assert_eq!(generator.strategy(), "sdk");
    }

    #[test]
    fn test_select_generator_uses_proxy_with_base_url_only() {
        let config = ProviderConfig {
            api_key: None,
            base_url: Some("http://provider.local".to_string()),
            sdk_base_url: None,
        };
        let generator = select_generator(&config, Client::new()).unwrap();
        assert_eq!(generator.strategy(), "proxy");
    }

    #[test]
    fn test_select_generator_unconfigured() {
        let err = select_generator(&ProviderConfig::default(), Client::new())
            .err()
            .unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_proxy_sends_job_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(body_partial_json(serde_json::json!({
                "model": "dall-e-2",
                "n": 1,
                "size": "512x512"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "url": "https://cdn.provider.local/img.png" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let image = proxy(&server).generate(&job()).await.unwrap();
        assert_eq!(
            image,
            GeneratedImage::Url("https://cdn.provider.local/img.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_proxy_handles_b64_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "b64_json": "iVBORw0KGgo=" }]
            })))
            .mount(&server)
            .await;

        let image = proxy(&server).generate(&job()).await.unwrap();
        assert_eq!(image, GeneratedImage::Base64("iVBORw0KGgo=".to_string()));
    }

    #[tokio::test]
    async fn test_proxy_empty_data_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{}]
            })))
            .mount(&server)
            .await;

        let err = proxy(&server).generate(&job()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_proxy_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .mount(&server)
            .await;

        let err = proxy(&server).generate(&job()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
