use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tubesum_core::{Captions, SourceError, VideoMetadata, VideoSource};

#[derive(Clone)]
pub struct MockVideoSource {
    pub metadata: Option<VideoMetadata>,
    pub captions: Option<Captions>,
    pub metadata_calls: Arc<Mutex<Vec<String>>>,
    pub caption_calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    pub fail_with: Option<String>,
}

impl MockVideoSource {
    pub fn new(caption_text: &str) -> Self {
        Self {
            metadata: Some(sample_metadata()),
            captions: Captions::new(caption_text, "en"),
            metadata_calls: Arc::new(Mutex::new(Vec::new())),
            caption_calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// A video whose captions hold `words` distinct words
    pub fn with_words(words: usize) -> Self {
        Self::new(&numbered_words(words))
    }

    pub fn without_metadata(mut self) -> Self {
        self.metadata = None;
        self
    }

    pub fn without_captions(mut self) -> Self {
        self.captions = None;
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("unused")
        }
    }

    fn error(&self, url: &str) -> Option<SourceError> {
        self.fail_with.as_ref().map(|reason| SourceError::YtDlp {
            url: url.to_string(),
            reason: reason.clone(),
        })
    }
}

#[async_trait]
impl VideoSource for MockVideoSource {
    async fn fetch_metadata(&self, url: &str) -> Result<Option<VideoMetadata>, SourceError> {
        self.metadata_calls.lock().unwrap().push(url.to_string());
        if let Some(e) = self.error(url) {
            return Err(e);
        }
        Ok(self.metadata.clone())
    }

    async fn fetch_captions(
        &self,
        url: &str,
        languages: &[String],
    ) -> Result<Option<Captions>, SourceError> {
        self.caption_calls
            .lock()
            .unwrap()
            .push((url.to_string(), languages.to_vec()));
        if let Some(e) = self.error(url) {
            return Err(e);
        }
        Ok(self.captions.clone())
    }
}

pub fn sample_metadata() -> VideoMetadata {
    serde_json::from_value(json!({
        "title": "Intro to Large Language Models",
        "author_name": "Andrej Karpathy",
    }))
    .unwrap()
}

/// `w0 w1 w2 ...`
pub fn numbered_words(count: usize) -> String {
    (0..count)
        .map(|i| format!("w{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}
