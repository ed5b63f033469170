use std::fmt;

use thiserror::Error;

use crate::{completion::CompletionError, provider::ProviderError};

/// Which summarization call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStage {
    Chunk { index: usize, total: usize },
    Final,
}

impl fmt::Display for SummaryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryStage::Chunk { index, total } => write!(f, "chunk {}/{}", index + 1, total),
            SummaryStage::Final => f.write_str("final summary"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TubesumError {
    #[error("Summarizing {stage} failed: {source}")]
    Completion {
        stage: SummaryStage,
        #[source]
        source: CompletionError,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl TubesumError {
    /// Worth trying the same run again later
    pub fn is_transient(&self) -> bool {
        match self {
            TubesumError::Completion { source, .. } => source.is_transient(),
            TubesumError::Provider(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TubesumError>;
