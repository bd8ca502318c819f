// file: src/utils/validation.rs
// description: input validation for uploaded files and settings
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let metadata = fs::metadata(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_csv_extension(path: &Path) -> Result<()> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") | Some("txt") => Ok(()),
            _ => Err(PipelineError::Validation(format!(
                "File is not a CSV file: {}",
                path.display()
            ))),
        }
    }

    /// `max_mb == 0` disables the limit.
    pub fn validate_file_size(size: u64, max_mb: usize) -> Result<()> {
        let max_bytes = (max_mb as u64) * 1_048_576;
        if max_bytes > 0 && size > max_bytes {
            return Err(PipelineError::Validation(format!(
                "File too large: {} bytes (limit {} MB)",
                size, max_mb
            )));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_top_n(top_n: usize) -> Result<()> {
        if top_n == 0 {
            return Err(PipelineError::Validation(
                "Top-N cut-off must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn truncate_label(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            format!("{}..", text.chars().take(max_chars).collect::<String>())
        }
    }
}
