//! Span computation and source slicing
//!
//! Global invariants enforced:
//! - The end of an extracted span is always the matched node's own end
//! - The start only ever moves left, over attached comments and decorators
//! - Slicing works on lines split at `\n` and UTF-16 columns, the same
//!   coordinates the source map reports

use crate::config::{ExtractConfig, LeadingComments};
use crate::matcher::Candidate;
use swc_common::comments::{Comment, CommentKind, Comments};
use swc_common::{BytePos, SourceMap, Span};

/// A point in the source: 1-based line, 0-based column in UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Resolve a byte position through the source map
    pub fn lookup(pos: BytePos, source_map: &SourceMap) -> Self {
        let loc = source_map.lookup_char_pos(pos);
        Position {
            line: loc.line as u32,
            column: loc.col.0 as u32,
        }
    }
}

/// Compute the span to extract for a candidate
///
/// The start is moved to the earliest leading comment if that comment starts
/// before the node, then to the earliest decorator if that decorator starts
/// before the start so far.
pub fn compute_span(candidate: &Candidate, comments: &dyn Comments, config: &ExtractConfig) -> Span {
    let node = candidate.span;
    let mut lo = node.lo;

    if let Some(comment_lo) = earliest_leading_comment(node.lo, comments, config.leading_comments) {
        if comment_lo < lo {
            tracing::debug!(from = lo.0, to = comment_lo.0, "extending start over leading comment");
            lo = comment_lo;
        }
    }

    if config.include_decorators {
        if let Some(decorator_lo) = candidate.decorators.iter().map(|d| d.lo).min() {
            if decorator_lo < lo {
                tracing::debug!(from = lo.0, to = decorator_lo.0, "extending start over decorator");
                lo = decorator_lo;
            }
        }
    }

    Span::new(lo, node.hi)
}

/// Start of the earliest comment the parser attached in front of `pos`
fn earliest_leading_comment(
    pos: BytePos,
    comments: &dyn Comments,
    mode: LeadingComments,
) -> Option<BytePos> {
    if mode == LeadingComments::None {
        return None;
    }

    comments
        .get_leading(pos)?
        .iter()
        .filter(|comment| mode == LeadingComments::All || is_doc_comment(comment))
        .map(|comment| comment.span.lo)
        .min()
}

/// `/** ... */` style block comment
fn is_doc_comment(comment: &Comment) -> bool {
    comment.kind == CommentKind::Block && comment.text.starts_with('*')
}

/// Slice `source` between two positions
///
/// A single-line range yields the text between the two columns. A
/// multi-line range yields the tail of the first line, the interior lines
/// untouched, and the head of the last line, joined with `\n`.
pub fn slice_source(source: &str, start: Position, end: Position) -> String {
    let lines: Vec<&str> = source.split('\n').collect();
    if start.line == 0 || end.line < start.line {
        return String::new();
    }

    let first = (start.line - 1) as usize;
    let last = ((end.line - 1) as usize).min(lines.len().saturating_sub(1));
    if first > last {
        return String::new();
    }

    if first == last {
        let line = lines[first];
        let from = byte_offset(line, start.column);
        let to = byte_offset(line, end.column).max(from);
        return line[from..to].to_string();
    }

    let head = lines[first];
    let tail = lines[last];

    let mut selected: Vec<&str> = Vec::with_capacity(last - first + 1);
    selected.push(&head[byte_offset(head, start.column)..]);
    selected.extend_from_slice(&lines[first + 1..last]);
    selected.push(&tail[..byte_offset(tail, end.column)]);

    selected.join("\n")
}

/// Byte offset of a UTF-16 column within `line`, clamped to the line end
///
/// A column falling inside a surrogate pair rounds up to the next character.
fn byte_offset(line: &str, column: u32) -> usize {
    let column = column as usize;
    let mut units = 0;
    for (idx, ch) in line.char_indices() {
        if units >= column {
            return idx;
        }
        units += ch.len_utf16();
    }
    line.len()
}
