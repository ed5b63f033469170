use std::fmt;

use crate::{
    pipeline::RunState,
    types::{Captions, VideoMetadata},
};

/// User-facing messages that end a run early
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoUrl,
    VideoUnavailable { url: String },
    CouldNotParseVideo { url: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoUrl => {
                f.write_str("Please provide a video URL or pick one of the trending videos.")
            }
            Notice::VideoUnavailable { url } => write!(f, "Could not fetch video data for {url}."),
            Notice::CouldNotParseVideo { .. } => f.write_str(
                "Sorry could not parse video. Please try again or use a different video.",
            ),
        }
    }
}

/// Presentation surface for a run.
///
/// Deltas arrive in order and each one is delivered before the next is
/// requested from the model.
pub trait RunSink {
    fn state_changed(&mut self, _state: RunState) {}

    fn video_fetched(&mut self, _url: &str, _metadata: &VideoMetadata) {}

    fn captions_fetched(&mut self, _captions: &Captions) {}

    fn chunked(&mut self, _words: usize, _chunks: usize) {}

    fn chunk_delta(&mut self, index: usize, delta: &str);

    fn chunk_finished(&mut self, _index: usize, _summary: &str) {}

    fn summary_delta(&mut self, delta: &str);

    fn summary_finished(&mut self, _summary: &str) {}

    fn notice(&mut self, notice: &Notice);

    /// Discard everything shown so far
    fn reset(&mut self) {}
}
