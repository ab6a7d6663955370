// Question generation: parse the model reply into a QuestionList and run the
// per-request pipeline behind the HTTP handlers.
// All generation-service calls go through llm_client; nothing here talks HTTP to it.

pub mod handlers;
pub mod pipeline;
pub mod questions;
