//! Bulk text parser for word pairs.
//!
//! # Format
//! ```text
//! apple - a round fruit with red or green skin
//! book - a written or printed work
//! ```
//!
//! One pair per line. The first `-` separates the word from the definition,
//! so a definition may itself contain dashes.

use serde::{Deserialize, Serialize};

/// Pair parsed from bulk input, before it is given an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    pub word: String,
    pub definition: String,
    pub line_number: usize,
}

/// Result of parsing bulk input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBulk {
    pub pairs: Vec<RawPair>,
    /// 1-based line numbers that were not blank but could not be read as a pair.
    pub skipped: Vec<usize>,
}

/// Parse bulk input into raw pairs.
pub fn parse(content: &str) -> ParsedBulk {
    let mut parsed = ParsedBulk::default();

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some((word, definition)) => parsed.pairs.push(RawPair {
                word: word.to_string(),
                definition: definition.to_string(),
                line_number,
            }),
            None => {
                tracing::debug!(line_number, "skipping malformed pair line");
                parsed.skipped.push(line_number);
            }
        }
    }

    parsed
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (word, definition) = line.split_once('-')?;
    let word = word.trim();
    let definition = definition.trim();
    if word.is_empty() || definition.is_empty() {
        return None;
    }
    Some((word, definition))
}
