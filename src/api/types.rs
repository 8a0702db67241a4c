//! Wire types for the gateway's HTTP surface
//!
//! Fixed-shape structs serialized only at the endpoint boundary. The chat
//! types follow the OpenAI chat-completion request/response layout.

use serde::{Deserialize, Serialize};

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System framing message
    System,
    /// End-user message
    User,
    /// Model-produced message
    Assistant,
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role
    pub role: Role,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Construct a message
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Chat completion request
///
/// An empty message list, or a list without any user-role entry, is a valid
/// degenerate input — it yields the canned fallback response, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier; absent or empty means "use the configured default"
    #[serde(default)]
    pub model: Option<String>,
    /// Conversation history, oldest first
    pub messages: Vec<ChatMessage>,
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Unique response id
    pub id: String,
    /// Object type, always "chat.completion"
    pub object: String,
    /// Unix timestamp at construction
    pub created: i64,
    /// Resolved model identifier
    pub model: String,
    /// Completion choices (a single entry at index 0)
    pub choices: Vec<Choice>,
}

/// One completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Choice index, 0 for single-completion responses
    pub index: usize,
    /// The assistant message
    pub message: ChatMessage,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is alive
    pub status: String,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Static informational message
    pub message: String,
}

/// Error body for 5xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description
    pub error: String,
}
