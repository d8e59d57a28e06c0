//! Anthropic Messages API wire format types

use serde::{Deserialize, Serialize};

/// Anthropic messages API request
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest {
    /// Model identifier
    pub model: String,
    /// Maximum tokens to generate (required by Anthropic)
    pub max_tokens: u32,
    /// Conversation messages
    pub messages: Vec<AnthropicMessage>,
}

/// Anthropic message
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    /// Role ("user" or "assistant")
    pub role: String,
    /// Plain text content
    pub content: String,
}

/// Anthropic messages API response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicResponse {
    /// Content blocks
    pub content: Vec<AnthropicContentBlock>,
    /// Token accounting
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

/// Content block in an Anthropic response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicContentBlock {
    /// Block type (e.g. "text")
    #[serde(rename = "type")]
    pub block_type: String,
    /// Text payload for text blocks
    #[serde(default)]
    pub text: Option<String>,
}

/// Anthropic token accounting
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicUsage {
    /// Tokens consumed by the prompt
    pub input_tokens: u32,
    /// Tokens generated in the reply
    pub output_tokens: u32,
}
