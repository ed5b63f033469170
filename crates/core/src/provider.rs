use std::{fmt, str::FromStr};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: &'static str },

    #[error("Unknown model `{0}`, expected one of: llama3-70b-8192, llama3-8b-8192, mixtral-8x7b-32768")]
    UnknownModel(String),
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub env_var: &'static str,
}

/// Groq's OpenAI-compatible chat completions endpoint
pub const GROQ: ProviderConfig = ProviderConfig {
    api_url: "https://api.groq.com/openai/v1/chat/completions",
    env_var: "GROQ_API_KEY",
};

/// Models offered for summarization
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Model {
    #[default]
    Llama3_70b,
    Llama3_8b,
    Mixtral8x7b,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Llama3_70b, Model::Llama3_8b, Model::Mixtral8x7b];

    /// Identifier sent to the completion API
    pub fn id(&self) -> &'static str {
        match self {
            Model::Llama3_70b => "llama3-70b-8192",
            Model::Llama3_8b => "llama3-8b-8192",
            Model::Mixtral8x7b => "mixtral-8x7b-32768",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Model::Llama3_70b => "Llama 3 70B",
            Model::Llama3_8b => "Llama 3 8B",
            Model::Mixtral8x7b => "Mixtral 8x7B",
        }
    }

    /// Context window in tokens
    pub fn context_window(&self) -> usize {
        match self {
            Model::Llama3_70b | Model::Llama3_8b => 8192,
            Model::Mixtral8x7b => 32768,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Model::ALL
            .into_iter()
            .find(|model| model.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProviderError::UnknownModel(s.to_string()))
    }
}

/// API credential; never printed
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ProviderError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ProviderError::MissingApiKey {
                env_var: GROQ.env_var,
            });
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
