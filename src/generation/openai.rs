use async_trait::async_trait;
use serde::Serialize;

use super::schema::{
    ChatRequest, ChatResponse, ImageRequest, ImageResponse, ResponseFormatBody, SpeechRequest,
};
use super::{ChatMessage, GenerationClient, ResponseFormat, Result};
use crate::errors::GenerationError;
use crate::settings::GenerationSettings;

/// `GenerationClient` backed by an OpenAI-compatible HTTP API.
pub struct OpenAiClient {
    http: reqwest::Client,
    settings: GenerationSettings,
}

impl OpenAiClient {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "sending generation request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(body)
            .send()
            .await?;

        check_status(resp).await
    }
}

/// Turn a non-2xx response into `GenerationError::Api`, keeping the body text.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "generation API returned error status");
    Err(GenerationError::Api {
        status: status.as_u16(),
        body,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(what: &'static str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| GenerationError::malformed(what, e.to_string()))
}

#[async_trait]
impl GenerationClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage], format: ResponseFormat) -> Result<String> {
        let request = ChatRequest {
            model: &self.settings.text_model,
            messages,
            response_format: match format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(ResponseFormatBody {
                    kind: "json_object",
                }),
            },
        };

        let raw = self.post("chat/completions", &request).await?.text().await?;
        tracing::debug!(response = %raw, "chat completion response");

        parse_json::<ChatResponse>("chat completion", &raw)?.into_content()
    }

    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String> {
        let request = ImageRequest {
            model: &self.settings.image_model,
            prompt,
            n: 1,
            size,
        };

        let raw = self
            .post("images/generations", &request)
            .await?
            .text()
            .await?;
        tracing::debug!(response = %raw, "image generation response");

        parse_json::<ImageResponse>("image generation", &raw)?.into_url()
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(%url, "downloading generated asset");
        let resp = check_status(self.http.get(url).send().await?).await?;
        Ok(resp.bytes().await?.to_vec())
    }

    async fn synthesize_speech(&self, input: &str) -> Result<Vec<u8>> {
        let request = SpeechRequest {
            model: &self.settings.speech_model,
            voice: &self.settings.speech_voice,
            input,
        };

        let bytes = self.post("audio/speech", &request).await?.bytes().await?;
        tracing::debug!(len = bytes.len(), "speech synthesis response");
        Ok(bytes.to_vec())
    }
}
