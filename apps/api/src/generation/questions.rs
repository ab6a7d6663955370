//! QuestionList — the ordered, de-blanked questions parsed from a raw model reply.

use serde::Serialize;

/// Ordered interview questions. Every entry is trimmed and non-empty.
/// Duplicates are kept; order matches the model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionList(Vec<String>);

impl QuestionList {
    /// Splits on line breaks (`\n` or `\r\n`), trims each line and drops blank ones.
    pub fn parse(raw: &str) -> Self {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Entries as displayed and printed: `"1. first"`, `"2. second"`, ...
    pub fn numbered(&self) -> impl Iterator<Item = String> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {q}", i + 1))
    }
}

impl FromIterator<String> for QuestionList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        QuestionList(iter.into_iter().filter(|q| !q.trim().is_empty()).collect())
    }
}
