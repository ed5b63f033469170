use futures_util::stream::BoxStream;
use serde::Serialize;

use crate::provider::Model;

/// Lazy sequence of text fragments produced by a completion call
pub type DeltaStream = BoxStream<'static, Result<String, CompletionError>>;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Upstream error mid-stream: {message}")]
    Stream { message: String },

    #[error("Malformed stream event: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CompletionError {
    /// Connection failures, rate limits and server errors
    pub fn is_transient(&self) -> bool {
        match self {
            CompletionError::Request(e) => e.is_timeout() || e.is_connect(),
            CompletionError::Api { status, .. } => *status == 429 || *status >= 500,
            CompletionError::Stream { .. } | CompletionError::Decode(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
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

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    pub fn with_system_and_user(
        model: Model,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model,
            messages: vec![Message::system(system), Message::user(user)],
        }
    }

    /// Content of the last user message
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// A chat-completion backend bound to one credential
pub trait CompletionClient: Send + Sync {
    /// Nothing is sent until the returned stream is first polled
    fn complete(&self, request: CompletionRequest) -> DeltaStream;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limits_and_server_errors_are_transient() {
        let api = |status| CompletionError::Api {
            status,
            message: String::new(),
        };
        assert!(api(429).is_transient());
        assert!(api(503).is_transient());
        assert!(!api(401).is_transient());
        assert!(!CompletionError::Stream {
            message: "boom".into()
        }
        .is_transient());
    }

    #[test]
    fn request_keeps_system_then_user() {
        let request = CompletionRequest::with_system_and_user(Model::Llama3_8b, "sys", "hello");
        assert_eq!(request.messages[0], Message::system("sys"));
        assert_eq!(request.user_content(), Some("hello"));
        assert_eq!(
            serde_json::to_value(&request.messages[1]).unwrap(),
            serde_json::json!({"role": "user", "content": "hello"})
        );
    }
}
