//! Deterministic stand-ins for the external capabilities, shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::acquisition::{ExtractError, PageTextExtractor};
use crate::llm_client::{Generator, LlmError};
use crate::render::RenderOptions;
use crate::state::AppState;

pub struct StubGenerator {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        })
    }

    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(&self, resume_text: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(resume_text.to_string());
        self.reply.clone().map_err(|message| LlmError::Api {
            status: 503,
            message,
        })
    }
}

pub struct StubExtractor {
    pages: Option<Vec<String>>,
}

impl StubExtractor {
    pub fn pages(pages: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            pages: Some(pages.iter().map(|p| p.to_string()).collect()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { pages: None })
    }
}

impl PageTextExtractor for StubExtractor {
    fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        self.pages.clone().ok_or_else(|| ExtractError::Unreadable {
            primary: "failed to load PDF: invalid file header".to_string(),
            fallback: "invalid file header".to_string(),
        })
    }
}

pub fn state_with(generator: Arc<StubGenerator>, extractor: Arc<StubExtractor>) -> AppState {
    AppState {
        generator,
        extractor,
        render_options: RenderOptions::default(),
        max_upload_bytes: 1024 * 1024,
    }
}
