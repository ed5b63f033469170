use tubesum_core::{Captions, Notice, RunSink, RunState, VideoMetadata};

/// Everything the pipeline told the presentation layer, in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub states: Vec<RunState>,
    pub videos: Vec<(String, VideoMetadata)>,
    pub captions: Vec<Captions>,
    pub chunked: Vec<(usize, usize)>,
    pub chunk_deltas: Vec<(usize, String)>,
    pub chunk_summaries: Vec<(usize, String)>,
    pub summary_deltas: Vec<String>,
    pub summaries: Vec<String>,
    pub notices: Vec<Notice>,
    pub resets: usize,
}

impl RecordingSink {
    pub fn chunk_text(&self, index: usize) -> String {
        self.chunk_deltas
            .iter()
            .filter(|(i, _)| *i == index)
            .map(|(_, d)| d.as_str())
            .collect()
    }

    pub fn summary_text(&self) -> String {
        self.summary_deltas.concat()
    }
}

impl RunSink for RecordingSink {
    fn state_changed(&mut self, state: RunState) {
        self.states.push(state);
    }

    fn video_fetched(&mut self, url: &str, metadata: &VideoMetadata) {
        self.videos.push((url.to_string(), metadata.clone()));
    }

    fn captions_fetched(&mut self, captions: &Captions) {
        self.captions.push(captions.clone());
    }

    fn chunked(&mut self, words: usize, chunks: usize) {
        self.chunked.push((words, chunks));
    }

    fn chunk_delta(&mut self, index: usize, delta: &str) {
        self.chunk_deltas.push((index, delta.to_string()));
    }

    fn chunk_finished(&mut self, index: usize, summary: &str) {
        self.chunk_summaries.push((index, summary.to_string()));
    }

    fn summary_delta(&mut self, delta: &str) {
        self.summary_deltas.push(delta.to_string());
    }

    fn summary_finished(&mut self, summary: &str) {
        self.summaries.push(summary.to_string());
    }

    fn notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}
