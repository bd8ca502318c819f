// file: src/parser/mod.rs
// description: decoding, sanitization and tokenizing of uploaded files
// reference: internal module structure

pub mod decoder;
pub mod patterns;
pub mod sanitizer;
pub mod tokenizer;

pub use decoder::{DecodedText, Decoder, SourceEncoding};
pub use sanitizer::Sanitizer;
pub use tokenizer::{LineParser, ParsedLines};
