use std::fmt;

use uuid::Uuid;

use crate::{
    chunker::chunk_words,
    error::{Result, SummaryStage, TubesumError},
    session::Session,
    sink::{Notice, RunSink},
    source::VideoSource,
    summarizer::{FinalInput, accumulate},
    types::{Captions, RunReport, VideoMetadata},
};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    FetchingVideo,
    FetchingCaptions,
    Chunking,
    SummarizingChunks { index: usize, total: usize },
    SummarizingFinal,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => f.write_str("Waiting for a video"),
            RunState::FetchingVideo => f.write_str("Parsing video"),
            RunState::FetchingCaptions => f.write_str("Reading captions"),
            RunState::Chunking => f.write_str("Chunking captions"),
            RunState::SummarizingChunks { index, total } => {
                write!(f, "Summarizing chunk {}/{}", index + 1, total)
            }
            RunState::SummarizingFinal => f.write_str("Generating summary"),
        }
    }
}

/// How a run that did not fail ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunReport),
    NoUrl,
    VideoUnavailable,
    CaptionsUnavailable,
}

/// Fetch → chunk → summarize chunks → summarize video, one step at a time
pub struct Pipeline<V> {
    source: V,
}

impl<V: VideoSource> Pipeline<V> {
    pub fn new(source: V) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    /// Summarize the session's remembered URL.
    ///
    /// Completion errors abort the run and discard its progress; the session
    /// is back in [`RunState::Idle`] either way.
    #[tracing::instrument(skip_all, fields(run_id = %Uuid::new_v4(), url = session.last_url()))]
    pub async fn run(&self, session: &mut Session, sink: &mut dyn RunSink) -> Result<RunOutcome> {
        let Some(url) = session.last_url().map(str::to_owned) else {
            sink.notice(&Notice::NoUrl);
            return Ok(RunOutcome::NoUrl);
        };

        let result = self.run_url(&url, session, sink).await;
        session.enter(RunState::Idle, sink);

        match &result {
            Ok(RunOutcome::Completed(report)) => {
                tracing::info!(chunks = report.chunk_count, "Run completed")
            }
            Ok(outcome) => tracing::info!(?outcome, "Run ended early"),
            Err(e) => tracing::error!(error = %e, transient = e.is_transient(), "Run failed"),
        }
        result
    }

    async fn run_url(
        &self,
        url: &str,
        session: &mut Session,
        sink: &mut dyn RunSink,
    ) -> Result<RunOutcome> {
        session.enter(RunState::FetchingVideo, sink);
        let Some(metadata) = self.fetch_metadata(url).await else {
            sink.notice(&Notice::VideoUnavailable {
                url: url.to_string(),
            });
            return Ok(RunOutcome::VideoUnavailable);
        };
        sink.video_fetched(url, &metadata);

        session.enter(RunState::FetchingCaptions, sink);
        let Some(captions) = self.fetch_captions(url, session.languages()).await else {
            sink.notice(&Notice::CouldNotParseVideo {
                url: url.to_string(),
            });
            return Ok(RunOutcome::CaptionsUnavailable);
        };
        sink.captions_fetched(&captions);

        session.enter(RunState::Chunking, sink);
        let chunks = chunk_words(captions.text(), session.chunk_limit().words());
        let total = chunks.len();
        tracing::info!(
            words = captions.word_count(),
            chunks = total,
            limit = %session.chunk_limit(),
            "Chunked captions"
        );
        sink.chunked(captions.word_count(), total);

        let summarizers = session.summarizers().clone();

        // zero and one chunk both go straight to the final summary
        let mut chunk_summaries = Vec::new();
        if total > 1 {
            chunk_summaries.reserve(total);
            for chunk in &chunks {
                let index = chunk.index;
                session.enter(RunState::SummarizingChunks { index, total }, sink);

                let deltas = summarizers.chunk.summarize(&metadata, chunk);
                let summary = accumulate(deltas, |delta| sink.chunk_delta(index, delta))
                    .await
                    .map_err(|source| TubesumError::Completion {
                        stage: SummaryStage::Chunk { index, total },
                        source,
                    })?;

                sink.chunk_finished(index, &summary);
                chunk_summaries.push(summary);
            }
        }

        session.enter(RunState::SummarizingFinal, sink);
        let input = if chunk_summaries.is_empty() {
            FinalInput::Captions(&captions)
        } else {
            FinalInput::ChunkSummaries(&chunk_summaries)
        };
        let deltas = summarizers.video.summarize(url, &metadata, input);
        let summary = accumulate(deltas, |delta| sink.summary_delta(delta))
            .await
            .map_err(|source| TubesumError::Completion {
                stage: SummaryStage::Final,
                source,
            })?;
        sink.summary_finished(&summary);

        Ok(RunOutcome::Completed(RunReport {
            url: url.to_string(),
            metadata,
            chunk_count: total,
            chunk_summaries,
            summary,
        }))
    }

    async fn fetch_metadata(&self, url: &str) -> Option<VideoMetadata> {
        self.source
            .fetch_metadata(url)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch video data"))
            .ok()
            .flatten()
    }

    async fn fetch_captions(&self, url: &str, languages: &[String]) -> Option<Captions> {
        self.source
            .fetch_captions(url, languages)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch captions"))
            .ok()
            .flatten()
    }
}
