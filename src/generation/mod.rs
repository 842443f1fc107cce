//! Generation backend abstraction.
//!
//! The workflow only talks to [`GenerationClient`]. The real implementation
//! is [`OpenAiClient`]; tests use a recording stub.

pub mod openai;
pub mod schema;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

pub use openai::OpenAiClient;

pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-annotated prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Shape the text completion is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonObject,
}

/// Resolution requested for banner images.
pub const BANNER_SIZE: &str = "1792x1024";

/// The three generation capabilities ezlo relies on.
///
/// Every call is a single request/response with no timeout or retry.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Chat completion; returns the first choice's message content.
    async fn complete(&self, messages: &[ChatMessage], format: ResponseFormat) -> Result<String>;

    /// Image generation; returns a transient download URL.
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String>;

    /// Fetch the bytes behind a URL returned by `generate_image`.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;

    /// Speech synthesis; returns encoded audio (mp3).
    async fn synthesize_speech(&self, input: &str) -> Result<Vec<u8>>;
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Recording stub. Completions are served from a queue; every call is logged.
    #[derive(Default)]
    pub struct StubClient {
        pub completions: Mutex<VecDeque<String>>,
        pub image_url: String,
        pub image_bytes: Vec<u8>,
        pub audio_bytes: Vec<u8>,
        /// When set, `download` fails as an expired image URL would.
        pub fail_download: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl StubClient {
        pub fn with_completions<I, S>(completions: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                completions: Mutex::new(completions.into_iter().map(Into::into).collect()),
                image_url: "https://images.test/banner.png".to_string(),
                image_bytes: b"\x89PNG fake".to_vec(),
                audio_bytes: b"ID3 fake".to_vec(),
                fail_download: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl GenerationClient for StubClient {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _format: ResponseFormat,
        ) -> Result<String> {
            let prompt = messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            self.record(format!("complete:{}", prompt));
            self.completions
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GenerationError::malformed("chat completion", "stub exhausted"))
        }

        async fn generate_image(&self, prompt: &str, size: &str) -> Result<String> {
            self.record(format!("image:{}:{}", size, prompt));
            Ok(self.image_url.clone())
        }

        async fn download(&self, url: &str) -> Result<Vec<u8>> {
            self.record(format!("download:{}", url));
            if self.fail_download {
                return Err(GenerationError::Api {
                    status: 403,
                    body: "Request has expired".to_string(),
                });
            }
            Ok(self.image_bytes.clone())
        }

        async fn synthesize_speech(&self, input: &str) -> Result<Vec<u8>> {
            self.record(format!("speech:{}", input));
            Ok(self.audio_bytes.clone())
        }
    }
}
