//! Server-sent events decoding for streamed chat completions.

use futures_util::{Stream, StreamExt, TryStreamExt, future, stream};
use serde::Deserialize;

use crate::completion::{CompletionError, DeltaStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Data(String),
    Done,
}

/// Line-buffered decoder; events may arrive split across network chunks
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);

            // comments, `event:`, `id:` and blank separators carry nothing we use
            let Some(data) = line.trim_end().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim_start();
            if data == "[DONE]" {
                events.push(SseEvent::Done);
            } else if !data.is_empty() {
                events.push(SseEvent::Data(data.to_string()));
            }
        }
        events
    }
}

#[derive(Debug, Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<StreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamErrorBody {
    message: String,
}

/// Text carried by one `data:` payload, `None` for role-only or empty deltas
fn parse_delta(data: &str) -> Result<Option<String>, CompletionError> {
    let chunk: ChatChunk = serde_json::from_str(data)?;

    if let Some(error) = chunk.error {
        return Err(CompletionError::Stream {
            message: error.message,
        });
    }

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty()))
}

/// Turn a response body into text deltas, ending at `data: [DONE]`
pub fn delta_stream<S, B, E>(body: S) -> DeltaStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + 'static,
    E: 'static,
    CompletionError: From<E>,
{
    let mut decoder = SseDecoder::default();

    body.map_err(CompletionError::from)
        .map_ok(move |bytes| {
            stream::iter(
                decoder
                    .push(bytes.as_ref())
                    .into_iter()
                    .map(Ok::<_, CompletionError>),
            )
        })
        .try_flatten()
        .try_take_while(|event| future::ready(Ok(!matches!(event, SseEvent::Done))))
        .try_filter_map(|event| {
            future::ready(match event {
                SseEvent::Data(data) => parse_delta(&data),
                SseEvent::Done => Ok(None),
            })
        })
        .boxed()
}
