//! fnscope core library - locate a named function in TypeScript and JavaScript
//! sources and return its exact source text

#![deny(warnings)]

// Global invariants enforced in this crate:
// - One parse and one traversal per lookup
// - No global mutable state; each lookup owns its source map, comments, and best match
// - No randomness, clocks, threads, or async
// - Every failure is reported through ExtractionResult, never by panicking

pub mod config;
pub mod keys;
pub mod language;
pub mod matcher;
pub mod parser;
pub mod result;
pub mod span;

pub use config::{ExtractConfig, LeadingComments};
pub use matcher::{Candidate, Priority, Shape};
pub use result::{render_json, render_text, ExtractionResult, Location};
pub use span::Position;

use anyhow::{Context, Result};
use std::path::Path;
use swc_common::{sync::Lrc, SourceMap};

/// Extract the function named `name` from the file at `path` with default settings
pub fn extract_function(path: &Path, name: &str) -> ExtractionResult {
    extract_function_with_config(path, name, &ExtractConfig::default())
}

/// Extract the function named `name` from the file at `path`
///
/// Read failures, parse failures, and missing names all come back as a
/// result with `found: false` and an error message.
pub fn extract_function_with_config(
    path: &Path,
    name: &str,
    config: &ExtractConfig,
) -> ExtractionResult {
    let source = match std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
    {
        Ok(source) => source,
        Err(e) => return ExtractionResult::not_found(format!("{:#}", e)),
    };

    extract_from_source(&source, &path.to_string_lossy(), name, config)
}

/// Extract the function named `name` from in-memory source
///
/// `filename` selects the dialect and appears in error messages.
pub fn extract_from_source(
    source: &str,
    filename: &str,
    name: &str,
    config: &ExtractConfig,
) -> ExtractionResult {
    tracing::debug!(file = filename, name, "extracting function");

    // The source map drops a byte order mark; columns must agree with it
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    match locate(source, filename, name, config) {
        Ok(Some((code, location))) => ExtractionResult::found(code, location),
        Ok(None) => {
            ExtractionResult::not_found(format!("Function '{}' not found in {}", name, filename))
        }
        Err(e) => ExtractionResult::not_found(format!("{:#}", e)),
    }
}

/// Parse, match, and slice; `Ok(None)` means the name is not defined
fn locate(
    source: &str,
    filename: &str,
    name: &str,
    config: &ExtractConfig,
) -> Result<Option<(String, Location)>> {
    let cm: Lrc<SourceMap> = Default::default();
    let parsed = parser::parse_source(source, &cm, filename)?;

    let Some(candidate) = matcher::find_best_match(&parsed.program, name) else {
        return Ok(None);
    };

    let extent = span::compute_span(&candidate, &parsed.comments, config);
    let start = Position::lookup(extent.lo, &cm);
    let end = Position::lookup(extent.hi, &cm);
    let code = span::slice_source(source, start, end);

    Ok(Some((code, Location::from_positions(start, end))))
}
