#![cfg(test)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AdapterError, AdapterResult};
use crate::llm_client::LLMClient;
use crate::llm_types::GenerateRequest;

/// [`LLMClient`] returning a fixed reply and counting calls.
pub struct StaticLLM {
    reply: String,
    calls: AtomicUsize,
}

impl StaticLLM {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `generate` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LLMClient for StaticLLM {
    async fn generate(&self, _request: GenerateRequest) -> AdapterResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// [`LLMClient`] failing every call with a service error.
pub struct FailingLLM {
    message: String,
}

impl FailingLLM {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl LLMClient for FailingLLM {
    async fn generate(&self, _request: GenerateRequest) -> AdapterResult<String> {
        Err(AdapterError::Service(self.message.clone()))
    }
}

/// [`LLMClient`] capturing every request for prompt assertions.
pub struct RecordingLLM {
    reply: String,
    seen: Mutex<Vec<GenerateRequest>>,
}

impl RecordingLLM {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// All requests observed so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl LLMClient for RecordingLLM {
    async fn generate(&self, request: GenerateRequest) -> AdapterResult<String> {
        self.seen.lock().expect("lock poisoned").push(request);
        Ok(self.reply.clone())
    }
}
