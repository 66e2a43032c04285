use super::types::{ChatCompletionRequest, ImageGenerationRequest, ImageGenerationResponse};
use crate::config::ProviderConfig;
use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const IMAGE_GENERATIONS_PATH: &str = "/v1/images/generations";

/// Minimal JSON-over-HTTP client for an OpenAI-compatible provider.
///
/// Every call is a single attempt: no retries and no timeout.
#[derive(Debug, Clone)]
pub struct ProviderHttpClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ProviderHttpClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self::new_with_client(base_url, api_key, Client::new())
    }

    pub fn new_with_client(base_url: String, api_key: Option<String>, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration, or `None` when no base URL is set.
    pub fn from_config(config: &ProviderConfig, client: Client) -> Option<Self> {
        config
            .base_url
            .as_ref()
            .map(|base_url| Self::new_with_client(base_url.clone(), config.api_key.clone(), client))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `request` to `path` and return the parsed JSON body.
    pub async fn post_json<Req: Serialize>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<serde_json::Value> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let mut builder = self.client.post(&url).json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request to provider: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Provider API error (status {}): {}", status, error_text);
            return Err(Error::Upstream(format!(
                "Provider API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse provider response: {}\nBody: {}", e, body);
            Error::Upstream(format!("Failed to parse provider response: {}", e))
        })
    }

    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let value = self.post_json(path, request).await?;
        decode(value)
    }

    /// Chat completion returning the raw provider payload.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<serde_json::Value> {
        self.post_json(CHAT_COMPLETIONS_PATH, request).await
    }

    pub async fn image_generation(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        self.post(IMAGE_GENERATIONS_PATH, request).await
    }
}

/// Decode a provider payload into a typed response.
pub fn decode<Resp: DeserializeOwned>(value: serde_json::Value) -> Result<Resp> {
    serde_json::from_value(value)
        .map_err(|e| Error::Upstream(format!("Unexpected provider response shape: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_attaches_bearer_when_key_present() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ProviderHttpClient::new(server.uri(), Some("test-key".to_string()));
        let body = client
            .post_json("/v1/echo", &serde_json::json!({"ping": 1}))
            .await
            .unwrap();

        assert_eq!(body, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_post_json_omits_authorization_without_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ProviderHttpClient::new(server.uri(), None);
        client
            .post_json("/v1/echo", &serde_json::json!({}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ProviderHttpClient::new(format!("{}/", server.uri()), None);
        client
            .post_json("/v1/echo", &serde_json::json!({}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ProviderHttpClient::new(server.uri(), None);
        let err = client
            .post_json("/v1/echo", &serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            Error::Upstream(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("overloaded"));
            }
            other => panic!("Expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = ProviderHttpClient::new(server.uri(), None);
        let err = client
            .post_json("/v1/echo", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_network_failure_is_http_error() {
        // Nothing listens on port 9 locally.
        let client = ProviderHttpClient::new("http://127.0.0.1:9".to_string(), None);
        let err = client
            .post_json("/v1/echo", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let config = ProviderConfig {
            api_key: Some("key".to_string()),
            base_url: None,
            sdk_base_url: None,
        };
        assert!(ProviderHttpClient::from_config(&config, Client::new()).is_none());

        let config = ProviderConfig {
            api_key: None,
            base_url: Some("http://provider.local/".to_string()),
            sdk_base_url: None,
        };
        let client = ProviderHttpClient::from_config(&config, Client::new()).unwrap();
        assert_eq!(
            client.endpoint(CHAT_COMPLETIONS_PATH),
            "http://provider.local/v1/chat/completions"
        );
    }
}
