use std::{fmt, num::NonZeroUsize, str::FromStr};

use crate::types::Chunk;

#[derive(Debug, thiserror::Error)]
pub enum ChunkLimitError {
    #[error("Chunk size {0} is outside {min}..={max} words", min = ChunkLimit::MIN, max = ChunkLimit::MAX)]
    OutOfRange(usize),

    #[error("Chunk size {0} is not a multiple of {step} words", step = ChunkLimit::STEP)]
    OffStep(usize),

    #[error("Chunk size must be a whole number: {0}")]
    NotANumber(#[from] std::num::ParseIntError),
}

/// Number of caption words per chunk, as offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimit(NonZeroUsize);

impl ChunkLimit {
    pub const MIN: usize = 1_000;
    pub const MAX: usize = 10_000;
    pub const STEP: usize = 500;
    pub const DEFAULT: usize = 4_500;

    pub fn new(words: usize) -> Result<Self, ChunkLimitError> {
        if !(Self::MIN..=Self::MAX).contains(&words) {
            return Err(ChunkLimitError::OutOfRange(words));
        }
        if words % Self::STEP != 0 {
            return Err(ChunkLimitError::OffStep(words));
        }
        NonZeroUsize::new(words)
            .map(Self)
            .ok_or(ChunkLimitError::OutOfRange(words))
    }

    pub fn words(&self) -> NonZeroUsize {
        self.0
    }
}

impl Default for ChunkLimit {
    fn default() -> Self {
        Self(NonZeroUsize::new(Self::DEFAULT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for ChunkLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChunkLimit {
    type Err = ChunkLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim().parse()?)
    }
}

/// Split `text` into chunks of at most `limit` whitespace-delimited words.
///
/// Every chunk but the last holds exactly `limit` words; empty text yields no
/// chunks.
pub fn chunk_words(text: &str, limit: NonZeroUsize) -> Vec<Chunk> {
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .chunks(limit.get())
        .enumerate()
        .map(|(index, words)| Chunk {
            index,
            text: words.join(" "),
            word_count: words.len(),
        })
        .collect()
}

pub fn chunk_count(word_count: usize, limit: NonZeroUsize) -> usize {
    word_count.div_ceil(limit.get())
}
