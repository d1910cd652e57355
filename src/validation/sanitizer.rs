//! Input screening for user-entered text.
//!
//! Detects markup and injection patterns in case titles, descriptions and
//! update text. Detections are logged; the text itself is left untouched
//! because the server owns escaping.

use lazy_static::lazy_static;
use regex::Regex;

use crate::logging::structured::LogContext;

/// Size limit for a single free-text field.
pub const MAX_FIELD_SIZE: usize = 100_000; // 100KB per field

lazy_static! {
    /// XSS detection patterns
    static ref XSS_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)<script[^>]*>").unwrap(),
        Regex::new(r"(?i)javascript:").unwrap(),
        Regex::new(r"(?i)on\w+\s*=").unwrap(),
        Regex::new(r"(?i)<iframe[^>]*>").unwrap(),
        Regex::new(r"(?i)<object[^>]*>").unwrap(),
        Regex::new(r"(?i)<embed[^>]*>").unwrap(),
    ];

    /// NoSQL operator injection patterns (the API is backed by a document store)
    static ref QUERY_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#"(?i)\{\s*"?\$(where|ne|gt|lt|regex|expr)"?\s*:"#).unwrap(),
        Regex::new(r"(?i)\$where").unwrap(),
    ];
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScreeningResult {
    pub xss_detections: usize,
    pub query_detections: usize,
    pub oversized: bool,
}

impl ScreeningResult {
    pub fn total_detections(&self) -> usize {
        self.xss_detections + self.query_detections + usize::from(self.oversized)
    }

    pub fn has_detections(&self) -> bool {
        self.total_detections() > 0
    }
}

/// Scan one field of user input.
pub fn screen_text(field: &str, text: &str, ctx: &LogContext) -> ScreeningResult {
    let mut result = ScreeningResult::default();

    if text.len() > MAX_FIELD_SIZE {
        log::debug!(
            "{} SIZE_LIMIT_EXCEEDED field={} size={} limit={}",
            ctx,
            field,
            text.len(),
            MAX_FIELD_SIZE
        );
        result.oversized = true;
    }

    for pattern in XSS_PATTERNS.iter() {
        if pattern.is_match(text) {
            log::debug!(
                "{} PATTERN_DETECTED type=xss field={} pattern={}",
                ctx,
                field,
                pattern.as_str()
            );
            result.xss_detections += 1;
        }
    }

    for pattern in QUERY_PATTERNS.iter() {
        if pattern.is_match(text) {
            log::debug!(
                "{} PATTERN_DETECTED type=query field={} pattern={}",
                ctx,
                field,
                pattern.as_str()
            );
            result.query_detections += 1;
        }
    }

    if result.has_detections() {
        log::warn!(
            "{} INPUT_DETECTIONS field={} xss={} query={} oversized={}",
            ctx,
            field,
            result.xss_detections,
            result.query_detections,
            result.oversized
        );
    }

    result
}

/// Scan several fields at once and sum the detections.
pub fn screen_fields(fields: &[(&str, &str)], ctx: &LogContext) -> ScreeningResult {
    fields
        .iter()
        .map(|(field, text)| screen_text(field, text, ctx))
        .fold(ScreeningResult::default(), |mut acc, r| {
            acc.xss_detections += r.xss_detections;
            acc.query_detections += r.query_detections;
            acc.oversized |= r.oversized;
            acc
        })
}
