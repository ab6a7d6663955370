//! Axum route handlers for the Questions API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use tracing::debug;

use crate::acquisition::ResumeSource;
use crate::errors::{AppError, ErrorKind};
use crate::generation::pipeline::{self, PipelineOutcome};
use crate::generation::questions::QuestionList;
use crate::render::RenderedDocument;
use crate::state::AppState;

/// Multipart field carrying the uploaded PDF.
pub const RESUME_FILE_FIELD: &str = "resume";
/// Multipart field carrying pasted resume text.
pub const RESUME_TEXT_FIELD: &str = "resume_text";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DocumentPayload {
    pub filename: &'static str,
    pub mime_type: &'static str,
    pub pages: usize,
    pub content_base64: String,
}

impl From<&RenderedDocument> for DocumentPayload {
    fn from(document: &RenderedDocument) -> Self {
        Self {
            filename: RenderedDocument::FILENAME,
            mime_type: RenderedDocument::MIME_TYPE,
            pages: document.page_count,
            content_base64: STANDARD.encode(&document.bytes),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QuestionsResponse {
    Success {
        questions: QuestionList,
        document: DocumentPayload,
    },
    Warning {
        code: &'static str,
        message: &'static str,
        questions: QuestionList,
    },
}

impl QuestionsResponse {
    fn no_questions() -> Self {
        QuestionsResponse::Warning {
            code: ErrorKind::EmptyResult.code(),
            message: ErrorKind::EmptyResult.headline(),
            questions: QuestionList::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request parsing
// ────────────────────────────────────────────────────────────────────────────

/// Reads the resume fields out of a multipart body. Unknown fields are skipped;
/// a repeated field keeps its last value.
pub async fn read_resume_source(mut multipart: Multipart) -> Result<ResumeSource, AppError> {
    let mut source = ResumeSource::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FILE_FIELD) => {
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read '{RESUME_FILE_FIELD}': {e}"))
                })?;
                debug!("Received resume upload ({} bytes)", data.len());
                source.document = Some(data);
            }
            Some(RESUME_TEXT_FIELD) => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read '{RESUME_TEXT_FIELD}': {e}"))
                })?;
                source.pasted_text = Some(text);
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    Ok(source)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/questions
///
/// Runs the full pipeline and returns the questions for display together with
/// the rendered PDF (base64) for download.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<QuestionsResponse>, AppError> {
    let source = read_resume_source(multipart).await?;

    let response = match pipeline::run(source, &state).await? {
        PipelineOutcome::Ready {
            questions,
            document,
        } => QuestionsResponse::Success {
            document: DocumentPayload::from(&document),
            questions,
        },
        PipelineOutcome::NoQuestions => QuestionsResponse::no_questions(),
    };

    Ok(Json(response))
}

/// POST /api/v1/questions/document
///
/// Same pipeline, but answers with the PDF itself as an attachment.
/// An empty result still answers with the JSON warning.
pub async fn handle_download_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let source = read_resume_source(multipart).await?;

    let response = match pipeline::run(source, &state).await? {
        PipelineOutcome::Ready { document, .. } => (
            [
                (header::CONTENT_TYPE, RenderedDocument::MIME_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"{}\"",
                        RenderedDocument::FILENAME
                    ),
                ),
            ],
            document.bytes,
        )
            .into_response(),
        PipelineOutcome::NoQuestions => Json(QuestionsResponse::no_questions()).into_response(),
    };

    Ok(response)
}
