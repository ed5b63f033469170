use futures_util::{StreamExt, TryStreamExt, stream};
use reqwest::Client;
use serde::Serialize;

use crate::{
    completion::{CompletionClient, CompletionError, CompletionRequest, DeltaStream, Message},
    error::Result,
    provider::{ApiKey, GROQ},
    sse::delta_stream,
};

/// Streaming client for Groq's OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: ApiKey,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<Message>,
    stream: bool,
}

impl GroqClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: GROQ.api_url.into(),
        }
    }

    /// Validate a raw credential and build a client for it
    pub fn from_key(key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(ApiKey::new(key)?))
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl CompletionClient for GroqClient {
    fn complete(&self, request: CompletionRequest) -> DeltaStream {
        let client = self.client.clone();
        let api_key = self.api_key.clone();
        let api_url = self.api_url.clone();
        let body = ChatRequest {
            model: request.model.id(),
            messages: request.messages,
            stream: true,
        };

        let response = async move {
            tracing::debug!(model = body.model, url = %api_url, "Sending completion request");

            let resp = client
                .post(&api_url)
                .bearer_auth(api_key.expose())
                .json(&body)
                .send()
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let message = resp.text().await.unwrap_or_default();
                tracing::error!(status, %message, "Completion request rejected");
                return Err(CompletionError::Api { status, message });
            }

            Ok::<_, CompletionError>(delta_stream(resp.bytes_stream()))
        };

        stream::once(response).try_flatten().boxed()
    }
}
