//! Tubesum Core Library
//!
//! Fetches a YouTube video's metadata and captions, splits long captions into
//! word-bounded chunks, and streams chunk and final summaries from a chat
//! completion model.

pub mod chunker;
pub mod completion;
pub mod error;
pub mod format;
pub mod groq;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod sink;
pub mod source;
pub mod sse;
pub mod summarizer;
pub mod types;
pub mod vtt;

// Re-export commonly used items at crate root
pub use chunker::{ChunkLimit, ChunkLimitError, chunk_count, chunk_words};
pub use completion::{
    CompletionClient, CompletionError, CompletionRequest, DeltaStream, Message, Role,
};
pub use error::{Result, SummaryStage, TubesumError};
pub use format::{format_duration, format_metadata_readable, preview};
pub use groq::GroqClient;
pub use pipeline::{Pipeline, RunOutcome, RunState};
pub use provider::{ApiKey, GROQ, Model, ProviderConfig, ProviderError};
pub use session::{Session, TRENDING_VIDEOS, TrendingVideo};
pub use sink::{Notice, RunSink};
pub use source::{SourceError, VideoSource, YouTubeSource};
pub use summarizer::{ChunkSummarizer, FinalInput, Summarizers, VideoSummarizer, accumulate};
pub use types::{Captions, Chunk, RunReport, VideoMetadata};
