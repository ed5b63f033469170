use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use futures_util::{StreamExt, stream};
use tubesum_core::{CompletionClient, CompletionError, CompletionRequest, DeltaStream};

/// Replies to every request with the same deltas, or with the next scripted
/// reply when one is queued
#[derive(Clone)]
pub struct MockCompletionClient {
    pub deltas: Vec<String>,
    pub scripted: Arc<Mutex<VecDeque<Vec<String>>>>,
    pub calls: Arc<Mutex<Vec<CompletionRequest>>>,
    pub fail_after: Option<usize>,
}

impl MockCompletionClient {
    pub fn new(deltas: &[&str]) -> Self {
        Self {
            deltas: deltas.iter().map(|d| d.to_string()).collect(),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_after: None,
        }
    }

    /// Queue one reply per upcoming request, in order
    pub fn scripted(replies: &[&[&str]]) -> Self {
        let client = Self::new(&["unscripted"]);
        client.scripted.lock().unwrap().extend(
            replies
                .iter()
                .map(|reply| reply.iter().map(|d| d.to_string()).collect()),
        );
        client
    }

    /// Requests numbered `n` and later (from 0) fail with a 503
    pub fn failing_from(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::new(&["ok"])
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn user_prompts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.user_content().map(str::to_owned))
            .collect()
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(&self, request: CompletionRequest) -> DeltaStream {
        let mut calls = self.calls.lock().unwrap();
        calls.push(request);
        let number = calls.len() - 1;

        if self.fail_after.is_some_and(|n| number >= n) {
            return stream::iter(vec![
                Ok("partial".to_string()),
                Err(CompletionError::Api {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                }),
            ])
            .boxed();
        }

        let deltas = self
            .scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.deltas.clone());
        stream::iter(deltas.into_iter().map(Ok)).boxed()
    }
}
