// file: src/parser/sanitizer.rs
// description: strips byte-order marks, control and zero-width characters
// reference: Unicode C0/C1 control ranges

use super::patterns::{CONTROL_CHARS, INVISIBLE_CHARS};

const BOM: char = '\u{FEFF}';

/// Whitespace for trimming purposes; a stray BOM counts as blank.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

pub struct Sanitizer;

impl Sanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Whole-text cleanup. Idempotent; `\r`, `\n` and tab are kept.
    pub fn sanitize(&self, text: &str) -> String {
        let without_bom = text.strip_prefix(BOM).unwrap_or(text);
        CONTROL_CHARS
            .replace_all(without_bom, "")
            .trim_matches(is_blank)
            .to_string()
    }

    /// Field cleanup applied by the tokenizer when a field is flushed.
    pub fn clean_field(&self, raw: &str) -> String {
        let trimmed = raw.trim_matches(is_blank);
        let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
        let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
        INVISIBLE_CHARS.replace_all(unquoted, "").into_owned()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_bom_removed() {
        let sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.sanitize("\u{FEFF}name,price"), "name,price");
    }

    #[test]
    fn test_controls_removed_line_breaks_kept() {
        let sanitizer = Sanitizer::new();
        let text = "  name\u{0000},price\r\n\u{001B}apple,10\n\u{009F}  ";
        assert_eq!(sanitizer.sanitize(text), "name,price\r\napple,10");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let sanitizer = Sanitizer::new();
        let once = sanitizer.sanitize("\u{FEFF} a\u{0007},b\r\nc,d \n");
        assert_eq!(sanitizer.sanitize(&once), once);

        let stacked = sanitizer.sanitize("\u{FEFF} \u{FEFF}x");
        assert_eq!(stacked, "x");
        assert_eq!(sanitizer.sanitize(&stacked), stacked);
    }

    #[test]
    fn test_clean_field() {
        let sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.clean_field("  \"apple\"  "), "apple");
        assert_eq!(sanitizer.clean_field("ap\u{200B}ple\u{FEFF}"), "apple");
        assert_eq!(sanitizer.clean_field("\""), "");
        assert_eq!(sanitizer.clean_field("\"\"x\"\""), "\"x\"");
    }
}
