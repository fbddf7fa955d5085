//! Extraction results and output rendering

use crate::span::Position;
use serde::{Deserialize, Serialize};

/// Line/column extent of an extracted callable
///
/// Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl Location {
    pub fn from_positions(start: Position, end: Position) -> Self {
        Location {
            start_line: start.line,
            end_line: end.line,
            start_column: start.column,
            end_column: end.column,
        }
    }
}

/// Outcome of a lookup; every failure is reported through `error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ExtractionResult {
    pub fn found(code: String, location: Location) -> Self {
        ExtractionResult {
            found: true,
            code: Some(code),
            location: Some(location),
            error: None,
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        ExtractionResult {
            found: false,
            code: None,
            location: None,
            error: Some(error.into()),
        }
    }
}

/// Render the extracted code, or the error message for a failed lookup
pub fn render_text(result: &ExtractionResult) -> String {
    match (&result.code, &result.error) {
        (Some(code), _) if result.found => code.clone(),
        (_, Some(error)) => error.clone(),
        _ => String::new(),
    }
}

/// Render the full result as pretty-printed JSON
pub fn render_json(result: &ExtractionResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}
