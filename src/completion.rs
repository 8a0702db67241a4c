//! Chat-completion service
//!
//! Implements the request/response contract in front of the inference
//! adapter: select the latest user message, frame it behind the sentinel
//! delimiter, run generation, strip the echoed frame from the raw output
//! and assemble the response object.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, Role};
use crate::config::GatewayConfig;
use crate::error::Result;
use crate::infer::InferenceAdapter;

/// Canned assistant content returned when no user message exists
pub const NO_USER_MESSAGE_CONTENT: &str = "No user message found.";

/// The chat-completion pipeline
#[derive(Debug, Clone)]
pub struct CompletionService {
    adapter: InferenceAdapter,
    default_model: String,
    sentinel: String,
}

impl CompletionService {
    /// Build the service from an adapter and the gateway configuration
    #[must_use]
    pub fn new(adapter: InferenceAdapter, config: &GatewayConfig) -> Self {
        Self {
            adapter,
            default_model: config.model_id.clone(),
            sentinel: config.sentinel.clone(),
        }
    }

    /// Run one chat completion
    ///
    /// Requests without a user-role message short-circuit to the canned
    /// response and never reach the model.
    ///
    /// # Errors
    ///
    /// Adapter failures propagate unchanged; there are no retries.
    pub fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let Some(user_message) = last_user_message(&request.messages) else {
            return Ok(self.build_response(request, NO_USER_MESSAGE_CONTENT.to_string()));
        };

        let prompt = format!("{}\n{}", self.sentinel, user_message);
        let raw = self.adapter.generate(&prompt)?;
        let content = clean_completion(&raw, &self.sentinel).to_string();

        Ok(self.build_response(request, content))
    }

    /// Assemble a response around `content`
    fn build_response(
        &self,
        request: &ChatCompletionRequest,
        content: String,
    ) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: format!("chatcmpl-{}", uuid::Uuid::new_v4()),
            object: "chat.completion".to_string(),
            created: unix_timestamp(),
            model: resolve_model(request.model.as_deref(), &self.default_model),
            choices: vec![Choice {
                index: 0,
                message: ChatMessage::new(Role::Assistant, content),
            }],
        }
    }
}

/// Content of the most recent user-role message, if any
#[must_use]
pub fn last_user_message(messages: &[ChatMessage]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

/// Strip the echoed prompt frame from raw model output
///
/// Takes everything after the last occurrence of the sentinel and trims
/// surrounding whitespace. When the model did not echo the sentinel the
/// whole text is returned trimmed — degraded output, not an error.
#[must_use]
pub fn clean_completion<'a>(raw: &'a str, sentinel: &str) -> &'a str {
    raw.rsplit(sentinel).next().unwrap_or(raw).trim()
}

/// Resolve the advertised model name: declared and non-empty, or default
fn resolve_model(declared: Option<&str>, default_model: &str) -> String {
    match declared {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_model.to_string(),
    }
}

/// Current Unix timestamp in seconds
#[allow(clippy::cast_possible_wrap)]
fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
