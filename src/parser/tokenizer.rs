// file: src/parser/tokenizer.rs
// description: quote-aware, best-effort delimited line tokenizer
// reference: single-pass state machine, not RFC 4180 strict

use super::sanitizer::Sanitizer;
use crate::error::{PipelineError, Result};
use tracing::debug;

/// Header row plus the non-blank data rows of one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLines {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Lines produced by the split, blank ones included.
    pub line_count: usize,
}

pub struct LineParser {
    delimiter: char,
    sanitizer: Sanitizer,
}

impl LineParser {
    pub fn new() -> Self {
        Self::with_delimiter(',')
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            sanitizer: Sanitizer::new(),
        }
    }

    /// Expects sanitized text. Fails only when there is no line after the header.
    pub fn parse(&self, text: &str) -> Result<ParsedLines> {
        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        if lines.len() < 2 {
            return Err(PipelineError::InsufficientData { lines: lines.len() });
        }

        let header = self.parse_line(lines[0]);
        let rows: Vec<Vec<String>> = lines[1..]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line))
            .collect();

        debug!(
            "Tokenized {} lines into {} header fields and {} rows",
            lines.len(),
            header.len(),
            rows.len()
        );

        Ok(ParsedLines {
            header,
            rows,
            line_count: lines.len(),
        })
    }

    /// Splits one line. A `"` toggles quoting and is dropped; the delimiter
    /// inside quotes is kept as data. Unbalanced quotes are tolerated.
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for ch in line.chars() {
            if ch == '"' {
                in_quotes = !in_quotes;
            } else if ch == self.delimiter && !in_quotes {
                fields.push(self.sanitizer.clean_field(&current));
                current.clear();
            } else {
                current.push(ch);
            }
        }

        fields.push(self.sanitizer.clean_field(&current));
        fields
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}
