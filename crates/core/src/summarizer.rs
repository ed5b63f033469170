use std::sync::Arc;

use futures_util::StreamExt;

use crate::{
    completion::{CompletionClient, CompletionError, CompletionRequest, DeltaStream},
    prompt::{chunk_prompt, final_prompt_from_captions, final_prompt_from_summaries},
    provider::Model,
    types::{Captions, Chunk, VideoMetadata},
};

/// Summarizes one chunk of captions at a time
#[derive(Clone)]
pub struct ChunkSummarizer {
    client: Arc<dyn CompletionClient>,
    model: Model,
}

impl ChunkSummarizer {
    const SYSTEM_PROMPT: &str = include_str!("./prompts/chunk_summarizer.txt");

    pub fn new(client: Arc<dyn CompletionClient>, model: Model) -> Self {
        Self { client, model }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn summarize(&self, metadata: &VideoMetadata, chunk: &Chunk) -> DeltaStream {
        tracing::debug!(model = %self.model, chunk = chunk.index, words = chunk.word_count, "Summarizing chunk");
        self.client.complete(CompletionRequest::with_system_and_user(
            self.model,
            Self::SYSTEM_PROMPT,
            chunk_prompt(metadata, &chunk.text),
        ))
    }
}

/// Body of the final summary prompt
#[derive(Debug, Clone, Copy)]
pub enum FinalInput<'a> {
    Captions(&'a Captions),
    ChunkSummaries(&'a [String]),
}

/// Writes the summary of the whole video
#[derive(Clone)]
pub struct VideoSummarizer {
    client: Arc<dyn CompletionClient>,
    model: Model,
}

impl VideoSummarizer {
    const SYSTEM_PROMPT: &str = include_str!("./prompts/video_summarizer.txt");

    pub fn new(client: Arc<dyn CompletionClient>, model: Model) -> Self {
        Self { client, model }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn summarize(&self, url: &str, metadata: &VideoMetadata, input: FinalInput<'_>) -> DeltaStream {
        let prompt = match input {
            FinalInput::Captions(captions) => final_prompt_from_captions(url, metadata, captions),
            FinalInput::ChunkSummaries(summaries) => {
                final_prompt_from_summaries(url, metadata, summaries)
            }
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Summarizing video");
        self.client.complete(CompletionRequest::with_system_and_user(
            self.model,
            Self::SYSTEM_PROMPT,
            prompt,
        ))
    }
}

/// Both summarizers, configured with the same client and model
#[derive(Clone)]
pub struct Summarizers {
    pub chunk: ChunkSummarizer,
    pub video: VideoSummarizer,
}

impl Summarizers {
    pub fn new(client: Arc<dyn CompletionClient>, model: Model) -> Self {
        Self {
            chunk: ChunkSummarizer::new(Arc::clone(&client), model),
            video: VideoSummarizer::new(client, model),
        }
    }

    pub fn model(&self) -> Model {
        self.video.model()
    }
}

/// Drain `deltas`, handing each fragment to `on_delta` before pulling the
/// next, and return the full text
pub async fn accumulate<F>(mut deltas: DeltaStream, mut on_delta: F) -> Result<String, CompletionError>
where
    F: FnMut(&str),
{
    let mut text = String::new();
    while let Some(delta) = deltas.next().await {
        let delta = delta?;
        on_delta(&delta);
        text.push_str(&delta);
    }
    Ok(text)
}
