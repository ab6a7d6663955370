//! The per-request pipeline: Acquisition → Generation → Rendering.
//!
//! Each run owns its values end to end; nothing is cached or shared between runs.

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::acquisition::{acquire_blocking, ResumeSource};
use crate::errors::AppError;
use crate::generation::questions::QuestionList;
use crate::render::{render_questions, RenderOptions, RenderedDocument};
use crate::state::AppState;

/// Terminal state of a successful run.
#[derive(Debug)]
pub enum PipelineOutcome {
    Ready {
        questions: QuestionList,
        document: RenderedDocument,
    },
    /// The service answered but produced no usable lines. The renderer was not run.
    NoQuestions,
}

pub async fn run(source: ResumeSource, state: &AppState) -> Result<PipelineOutcome, AppError> {
    let request_id = Uuid::new_v4();
    run_steps(source, state)
        .instrument(info_span!("generate_questions", %request_id))
        .await
}

async fn run_steps(source: ResumeSource, state: &AppState) -> Result<PipelineOutcome, AppError> {
    let resume = acquire_blocking(source, state.extractor.clone()).await?;
    info!(
        "Resume text acquired ({} chars), calling generation service",
        resume.as_str().chars().count()
    );

    let raw = state.generator.generate(resume.as_str()).await?;
    drop(resume);

    let questions = QuestionList::parse(&raw);
    if questions.is_empty() {
        warn!("Generation service returned no non-blank lines");
        return Ok(PipelineOutcome::NoQuestions);
    }
    info!("Parsed {} question(s)", questions.len());

    let document = render_blocking(questions.clone(), state.render_options.clone()).await?;

    Ok(PipelineOutcome::Ready {
        questions,
        document,
    })
}

/// Runs `render_questions` on the blocking pool.
async fn render_blocking(
    questions: QuestionList,
    options: RenderOptions,
) -> Result<RenderedDocument, AppError> {
    let document = tokio::task::spawn_blocking(move || render_questions(&questions, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in rendering: {e}")))??;
    Ok(document)
}
