//! Google Generative Language API wire format types

use serde::{Deserialize, Serialize};

/// Google `generateContent` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest {
    /// Conversation contents
    pub contents: Vec<GoogleContent>,
    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GoogleGenerationConfig>,
}

/// Generation parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    /// Maximum tokens to generate
    pub max_output_tokens: u32,
}

/// A content entry (request or response side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleContent {
    /// Role ("user" or "model")
    #[serde(default)]
    pub role: Option<String>,
    /// Content parts
    pub parts: Vec<GooglePart>,
}

/// A single content part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GooglePart {
    /// Text payload
    #[serde(default)]
    pub text: Option<String>,
}

/// Google `generateContent` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GoogleCandidate>,
    /// Token accounting
    #[serde(default)]
    pub usage_metadata: Option<GoogleUsageMetadata>,
}

/// A single response candidate
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCandidate {
    /// Candidate content
    pub content: GoogleContent,
}

/// Google token accounting
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleUsageMetadata {
    /// Tokens consumed by the prompt
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Tokens generated across candidates
    #[serde(default)]
    pub candidates_token_count: u32,
}
