//! Request and response bodies for the OpenAI-compatible API.
//!
//! Only the fields ezlo reads are modelled; everything else is ignored.

use serde::{Deserialize, Serialize};

use super::ChatMessage;
use crate::errors::GenerationError;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormatBody>,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormatBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice.
    pub fn into_content(self) -> Result<String, GenerationError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationError::malformed("chat completion", "no message content"))
    }
}

#[derive(Debug, Serialize)]
pub struct ImageRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub n: u8,
    pub size: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageResponse {
    pub fn into_url(self) -> Result<String, GenerationError> {
        self.data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| GenerationError::malformed("image generation", "no image url"))
    }
}

#[derive(Debug, Serialize)]
pub struct SpeechRequest<'a> {
    pub model: &'a str,
    pub voice: &'a str,
    pub input: &'a str,
}

/// Structured body the ideas prompt asks for: `{"ideas": ["...", ...]}`.
#[derive(Debug, Deserialize)]
pub struct IdeasPayload {
    pub ideas: Vec<String>,
}

impl IdeasPayload {
    pub fn parse(content: &str) -> Result<Self, GenerationError> {
        serde_json::from_str(content)
            .map_err(|e| GenerationError::malformed("ideas", e.to_string()))
    }
}
