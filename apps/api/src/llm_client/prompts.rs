// Prompt constants for interview question generation.
// The reply is parsed line by line, so the prompt asks for one question per line.

/// System prompt for question generation.
pub const QUESTIONS_SYSTEM: &str = "You are an experienced technical interviewer. \
    You read a candidate's resume and write interview questions grounded in the \
    skills, projects and experience it describes. \
    Respond with the questions only. \
    Do NOT include headings, explanations, numbering or markdown.";

/// Question generation prompt template. Replace `{resume_text}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate between 5 and 10 technical interview questions for the candidate whose resume follows.

Rules:
- Write exactly one question per line.
- Do not number the questions or prefix them with bullets.
- Cover the candidate's strongest technical skills and most significant projects.
- Mix conceptual questions with practical, experience-based ones.

RESUME:
{resume_text}
"#;
