use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::acquisition::ExtractError;
use crate::llm_client::LlmError;
use crate::render::RenderError;

/// How a failure is presented to the user. Warnings are input problems the user
/// can fix; errors are faults in a collaborator or the document pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// The user-facing failure taxonomy of the question pipeline.
///
/// `EmptyResult` is not carried by `AppError`: an empty question list is a valid
/// outcome, reported through the same code and message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputMissing,
    DocumentParse,
    GenerationService,
    EmptyResult,
    FormatEncoding,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InputMissing => "INPUT_MISSING",
            ErrorKind::DocumentParse => "DOCUMENT_PARSE_ERROR",
            ErrorKind::GenerationService => "GENERATION_SERVICE_ERROR",
            ErrorKind::EmptyResult => "EMPTY_RESULT",
            ErrorKind::FormatEncoding => "FORMAT_ENCODING_ERROR",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            ErrorKind::InputMissing | ErrorKind::EmptyResult => Severity::Warning,
            ErrorKind::DocumentParse | ErrorKind::GenerationService | ErrorKind::FormatEncoding => {
                Severity::Error
            }
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::InputMissing => StatusCode::BAD_REQUEST,
            ErrorKind::DocumentParse | ErrorKind::FormatEncoding => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorKind::GenerationService => StatusCode::BAD_GATEWAY,
            ErrorKind::EmptyResult => StatusCode::OK,
        }
    }

    /// Fixed part of the user message. Variants with a detail append it after a colon.
    pub fn headline(self) -> &'static str {
        match self {
            ErrorKind::InputMissing => "Please provide a resume PDF or paste your resume.",
            ErrorKind::DocumentParse => "The uploaded document could not be read",
            ErrorKind::GenerationService => "Something went wrong while generating questions",
            ErrorKind::EmptyResult => "No questions were generated. Please check your resume.",
            ErrorKind::FormatEncoding => "The questions could not be written to the PDF",
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume document or text provided")]
    InputMissing,

    #[error("Document parse error: {0}")]
    DocumentParse(String),

    #[error("Generation service error: {0}")]
    GenerationService(String),

    #[error("Format encoding error: question {question} contains unsupported character {ch:?}")]
    FormatEncoding { question: usize, ch: char },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The taxonomy entry for this error, or `None` for request-shape and internal failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::InputMissing => Some(ErrorKind::InputMissing),
            AppError::DocumentParse(_) => Some(ErrorKind::DocumentParse),
            AppError::GenerationService(_) => Some(ErrorKind::GenerationService),
            AppError::FormatEncoding { .. } => Some(ErrorKind::FormatEncoding),
            AppError::Validation(_) | AppError::Internal(_) => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::InputMissing => ErrorKind::InputMissing.headline().to_string(),
            AppError::DocumentParse(detail) => {
                format!("{}: {detail}", ErrorKind::DocumentParse.headline())
            }
            AppError::GenerationService(detail) => {
                format!("{}: {detail}", ErrorKind::GenerationService.headline())
            }
            AppError::FormatEncoding { question, ch } => format!(
                "{}: question {question} contains the character {ch:?}, \
                 which the PDF text encoding cannot represent",
                ErrorKind::FormatEncoding.headline()
            ),
            AppError::Validation(msg) => msg.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        AppError::DocumentParse(e.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::GenerationService(e.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Unencodable { question, ch } => AppError::FormatEncoding { question, ch },
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, severity) = match self.kind() {
            Some(kind) => (kind.status(), kind.code(), kind.severity()),
            None => match &self {
                AppError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", Severity::Error)
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    Severity::Error,
                ),
            },
        };

        match (&self, severity) {
            (AppError::Internal(e), _) => tracing::error!("Internal error: {e:?}"),
            (_, Severity::Error) => tracing::error!("{self}"),
            (_, Severity::Warning) => tracing::warn!("{self}"),
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "severity": severity,
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_kinds_are_input_missing_and_empty_result() {
        assert_eq!(ErrorKind::InputMissing.severity(), Severity::Warning);
        assert_eq!(ErrorKind::EmptyResult.severity(), Severity::Warning);
        assert_eq!(ErrorKind::DocumentParse.severity(), Severity::Error);
        assert_eq!(ErrorKind::GenerationService.severity(), Severity::Error);
        assert_eq!(ErrorKind::FormatEncoding.severity(), Severity::Error);
    }

    #[test]
    fn test_generation_message_includes_underlying_error() {
        let err = AppError::from(LlmError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        });
        assert_eq!(err.kind(), Some(ErrorKind::GenerationService));
        let msg = err.user_message();
        assert!(msg.starts_with("Something went wrong while generating questions"));
        assert!(msg.contains("Unauthorized"), "got: {msg}");
    }

    #[test]
    fn test_unencodable_render_error_maps_to_format_encoding() {
        let err = AppError::from(RenderError::Unencodable {
            question: 3,
            ch: '漢',
        });
        assert_eq!(err.kind(), Some(ErrorKind::FormatEncoding));
        assert!(err.user_message().contains("question 3"));
    }

    #[test]
    fn test_other_render_errors_are_internal() {
        let err = AppError::from(RenderError::Empty);
        assert!(err.kind().is_none());
        assert_eq!(err.user_message(), "An internal server error occurred");
    }

    #[test]
    fn test_input_missing_response_is_bad_request() {
        let response = AppError::InputMissing.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_generation_failure_response_is_bad_gateway() {
        let response = AppError::GenerationService("quota exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Severity::Warning).unwrap(), "warning");
        assert_eq!(serde_json::to_value(Severity::Error).unwrap(), "error");
    }
}
