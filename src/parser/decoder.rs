// file: src/parser/decoder.rs
// description: byte decoding with strict UTF-8 first and EUC-KR fallback
// reference: https://docs.rs/encoding_rs

use encoding_rs::{EUC_KR, UTF_8};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceEncoding {
    Utf8,
    EucKr,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceEncoding::Utf8 => write!(f, "UTF-8"),
            SourceEncoding::EucKr => write!(f, "EUC-KR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: SourceEncoding,
}

pub struct Decoder;

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Never fails: bytes that are not valid UTF-8 are read as EUC-KR, with
    /// unmappable sequences replaced by U+FFFD. A UTF-8 BOM is left in the
    /// text for the sanitizer.
    pub fn decode(&self, bytes: &[u8]) -> DecodedText {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
            debug!("Decoded {} bytes as UTF-8", bytes.len());
            return DecodedText {
                text: text.into_owned(),
                encoding: SourceEncoding::Utf8,
            };
        }

        let (text, had_errors) = EUC_KR.decode_without_bom_handling(bytes);
        if had_errors {
            debug!(
                "EUC-KR fallback replaced malformed sequences in {} bytes",
                bytes.len()
            );
        } else {
            debug!("Decoded {} bytes as EUC-KR", bytes.len());
        }

        DecodedText {
            text: text.into_owned(),
            encoding: SourceEncoding::EucKr,
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
