//! Windows-1252 (PDF WinAnsiEncoding) text encoding for the built-in fonts.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::render::RenderError;

/// What to do with a character the single-byte encoding cannot represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingPolicy {
    /// Fail the render with `RenderError::Unencodable`.
    #[default]
    Strict,
    /// Substitute `?` and keep going.
    Replace,
}

#[derive(Debug, Error)]
#[error("unknown encoding policy '{0}'")]
pub struct ParsePolicyError(String);

impl FromStr for EncodingPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(EncodingPolicy::Strict),
            "replace" => Ok(EncodingPolicy::Replace),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for EncodingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingPolicy::Strict => f.write_str("strict"),
            EncodingPolicy::Replace => f.write_str("replace"),
        }
    }
}

/// Byte for `c` in Windows-1252, if it has one. Control characters have none.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Applies `policy` to one question. Whitespace is left alone: layout collapses it.
///
/// `question` is the 1-based number used in the error.
pub fn sanitize(text: &str, question: usize, policy: EncodingPolicy) -> Result<String, RenderError> {
    let representable = |c: char| c.is_whitespace() || win_ansi_byte(c).is_some();

    match policy {
        EncodingPolicy::Strict => match text.chars().find(|&c| !representable(c)) {
            Some(ch) => Err(RenderError::Unencodable { question, ch }),
            None => Ok(text.to_string()),
        },
        EncodingPolicy::Replace => Ok(text
            .chars()
            .map(|c| if representable(c) { c } else { '?' })
            .collect()),
    }
}

/// Encodes an already-sanitized line. Anything unmapped becomes `?`.
pub fn encode_line(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}
