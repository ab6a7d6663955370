use std::sync::Arc;

use crate::acquisition::PageTextExtractor;
use crate::llm_client::Generator;
use crate::render::RenderOptions;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only immutable configuration and stateless capabilities.
#[derive(Clone)]
pub struct AppState {
    /// Generation service. Production: `LlmClient`; tests swap in a stub.
    pub generator: Arc<dyn Generator>,
    /// Document-to-text capability for uploaded resumes.
    pub extractor: Arc<dyn PageTextExtractor>,
    pub render_options: RenderOptions,
    pub max_upload_bytes: usize,
}
