// file: src/parser/patterns.rs
// description: compiled regex patterns for text sanitization and numeric coercion
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // C0 and C1 controls except tab, line feed and carriage return
    pub static ref CONTROL_CHARS: Regex = Regex::new(
        r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x9F]"
    ).expect("CONTROL_CHARS regex is valid");

    // zero-width space / non-joiner / joiner and stray byte-order marks
    pub static ref INVISIBLE_CHARS: Regex = Regex::new(
        r"[\x{200B}-\x{200D}\x{FEFF}]"
    ).expect("INVISIBLE_CHARS regex is valid");

    // anything a header may not keep: ASCII word chars, whitespace and Hangul survive
    pub static ref HEADER_NOISE: Regex = Regex::new(
        r"[^A-Za-z0-9_\sㄱ-ㅎㅏ-ㅣ가-힣]"
    ).expect("HEADER_NOISE regex is valid");

    pub static ref PRICE_NOISE: Regex = Regex::new(
        r"[^0-9.\-]"
    ).expect("PRICE_NOISE regex is valid");

    pub static ref QUANTITY_NOISE: Regex = Regex::new(
        r"[^0-9\-]"
    ).expect("QUANTITY_NOISE regex is valid");

    pub static ref FLOAT_PREFIX: Regex = Regex::new(
        r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)"
    ).expect("FLOAT_PREFIX regex is valid");

    pub static ref INTEGER_PREFIX: Regex = Regex::new(
        r"^-?[0-9]+"
    ).expect("INTEGER_PREFIX regex is valid");
}
