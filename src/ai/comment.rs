//! Comment reply generation.

use super::client::{decode, ProviderHttpClient};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::ProviderConfig;
use crate::models::{CommentReply, CommentRequest};
use crate::{prompts, Error, Result};
use reqwest::Client;

pub struct CommentResponder {
    http: ProviderHttpClient,
}

impl CommentResponder {
    pub fn new(http: ProviderHttpClient) -> Self {
        Self { http }
    }

    /// Build a responder from configuration. A base URL is mandatory.
    pub fn from_config(config: &ProviderConfig, client: Client) -> Result<Self> {
        ProviderHttpClient::from_config(config, client)
            .map(Self::new)
            .ok_or_else(|| Error::Configuration("provider base URL is not configured".to_string()))
    }

    /// Generate a reply. Ranges of `temperature` and `max_tokens` are
    /// expected to be validated by the caller.
    pub async fn reply(&self, request: &CommentRequest) -> Result<CommentReply> {
        let text = required_text(request)?;

        let chat = ChatCompletionRequest {
            model: request.model().to_string(),
            messages: build_messages(request, text),
            temperature: request.temperature(),
            max_tokens: request.max_tokens(),
        };

        tracing::debug!(
            model = %chat.model,
            temperature = chat.temperature,
            max_tokens = chat.max_tokens,
            "Requesting comment reply"
        );

        let raw = self.http.chat_completion(&chat).await?;
        let parsed: ChatCompletionResponse = decode(raw.clone())?;
        let response = extract_reply(&parsed)?;

        Ok(CommentReply {
            response,
            raw: Some(raw),
        })
    }
}

/// Run the comment pipeline: field check, configuration check, completion.
pub async fn respond(
    config: &ProviderConfig,
    client: Client,
    request: CommentRequest,
) -> Result<CommentReply> {
    required_text(&request)?;
    let responder = CommentResponder::from_config(config, client)?;
    responder.reply(&request).await
}

pub fn required_text(request: &CommentRequest) -> Result<&str> {
    request
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| Error::Validation("missing field: text".to_string()))
}

pub fn build_messages(request: &CommentRequest, text: &str) -> Vec<ChatMessage> {
    let responder = request.responder.clone().unwrap_or_default();
    let name = responder
        .name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(prompts::DEFAULT_RESPONDER_NAME);
    let persona = responder
        .persona
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(prompts::DEFAULT_RESPONDER_PERSONA);
    let style = request.style();

    let system = prompts::render(
        prompts::COMMENT_SYSTEM,
        &[("name", name), ("persona", persona), ("style", style)],
    );
    let user = prompts::render(prompts::COMMENT_USER, &[("text", text), ("style", style)]);

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Pull the reply text out of the first choice.
///
/// An empty reply is returned as `""` rather than treated as an error.
pub fn extract_reply(response: &ChatCompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| Error::Upstream("no completion returned".to_string()))?;

    Ok(choice
        .message
        .as_ref()
        .and_then(|message| message.content.clone())
        .or_else(|| choice.text.clone())
        .unwrap_or_default())
}
