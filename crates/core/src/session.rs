use std::sync::Arc;

use crate::{
    chunker::ChunkLimit,
    completion::CompletionClient,
    pipeline::RunState,
    provider::Model,
    sink::RunSink,
    summarizer::Summarizers,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingVideo {
    pub title: &'static str,
    pub url: &'static str,
}

pub const TRENDING_VIDEOS: [TrendingVideo; 3] = [
    TrendingVideo {
        title: "Intro to Large Language Models",
        url: "https://youtu.be/zjkBMFhNj_g",
    },
    TrendingVideo {
        title: "What's next for AI agents",
        url: "https://youtu.be/pBBe1pk8hf4",
    },
    TrendingVideo {
        title: "Making AI accessible",
        url: "https://youtu.be/c3b-JASoPi0",
    },
];

/// Everything that outlives a single run: the remembered URL, the selected
/// model and chunk size, and the summarizers built for that model.
pub struct Session {
    client: Arc<dyn CompletionClient>,
    model: Model,
    chunk_limit: ChunkLimit,
    languages: Vec<String>,
    last_url: Option<String>,
    summarizers: Option<Summarizers>,
    state: RunState,
}

impl Session {
    pub fn new(client: Arc<dyn CompletionClient>, model: Model) -> Self {
        Self {
            client,
            model,
            chunk_limit: ChunkLimit::default(),
            languages: vec!["en".to_string()],
            last_url: None,
            summarizers: None,
            state: RunState::Idle,
        }
    }

    pub fn with_chunk_limit(mut self, chunk_limit: ChunkLimit) -> Self {
        self.chunk_limit = chunk_limit;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.set_languages(languages);
        self
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn chunk_limit(&self) -> ChunkLimit {
        self.chunk_limit
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Remember `url` for the next run; blank input forgets the current one
    pub fn submit_url(&mut self, url: impl Into<String>) {
        let url = url.into().trim().to_string();
        self.last_url = (!url.is_empty()).then_some(url);
    }

    /// Remember one of [`TRENDING_VIDEOS`], numbered from 1
    pub fn select_trending(&mut self, number: usize) -> Option<TrendingVideo> {
        let video = *TRENDING_VIDEOS.get(number.checked_sub(1)?)?;
        self.submit_url(video.url);
        Some(video)
    }

    /// Switch models; the summarizers are rebuilt on the next run and the
    /// display is reset. Returns whether anything changed.
    pub fn select_model(&mut self, model: Model, sink: &mut dyn RunSink) -> bool {
        if model == self.model {
            return false;
        }
        tracing::info!(from = %self.model, to = %model, "Model changed");
        self.model = model;
        self.invalidate(sink);
        true
    }

    /// Swap the completion client, e.g. for a different credential
    pub fn replace_client(&mut self, client: Arc<dyn CompletionClient>, sink: &mut dyn RunSink) {
        self.client = client;
        self.invalidate(sink);
    }

    pub fn set_chunk_limit(&mut self, chunk_limit: ChunkLimit) {
        self.chunk_limit = chunk_limit;
    }

    pub fn set_languages(&mut self, languages: Vec<String>) {
        let languages: Vec<String> = languages
            .into_iter()
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .collect();
        if !languages.is_empty() {
            self.languages = languages;
        }
    }

    /// Forget the URL and summarizers and start over from `Idle`
    pub fn restart(&mut self, sink: &mut dyn RunSink) {
        tracing::info!("Session restarted");
        self.last_url = None;
        self.summarizers = None;
        self.state = RunState::Idle;
        sink.reset();
    }

    /// Summarizers for the selected model, built on first use
    pub fn summarizers(&mut self) -> &Summarizers {
        let (client, model) = (&self.client, self.model);
        self.summarizers
            .get_or_insert_with(|| Summarizers::new(Arc::clone(client), model))
    }

    pub(crate) fn enter(&mut self, state: RunState, sink: &mut dyn RunSink) {
        tracing::debug!(from = ?self.state, to = ?state, "Run state");
        self.state = state;
        sink.state_changed(state);
    }

    fn invalidate(&mut self, sink: &mut dyn RunSink) {
        self.summarizers = None;
        sink.reset();
    }
}
