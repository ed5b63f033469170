use std::fmt::Write;

use crate::types::{Captions, VideoMetadata};

/// User prompt for summarizing one chunk
pub fn chunk_prompt(metadata: &VideoMetadata, chunk_text: &str) -> String {
    format!("Video data: {metadata}\n\n{chunk_text}\n\n")
}

fn final_prompt_header(url: &str, metadata: &VideoMetadata) -> String {
    format!("Video URL: {url}\n\nVideo Data: {metadata}\n\n")
}

/// User prompt for the final summary when the captions fit in one chunk
pub fn final_prompt_from_captions(url: &str, metadata: &VideoMetadata, captions: &Captions) -> String {
    let mut prompt = final_prompt_header(url, metadata);
    let _ = write!(prompt, "Captions: {}\n\n", captions.text());
    prompt
}

/// User prompt for the final summary built from chunk summaries, in order
pub fn final_prompt_from_summaries(
    url: &str,
    metadata: &VideoMetadata,
    summaries: &[String],
) -> String {
    let mut prompt = final_prompt_header(url, metadata);
    prompt.push_str("Summaries:\n\n");
    for (i, summary) in summaries.iter().enumerate() {
        let _ = write!(prompt, "Chunk {}:\n\n{summary}\n\n---\n\n", i + 1);
    }
    prompt
}
