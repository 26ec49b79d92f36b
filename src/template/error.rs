//! Error types for template parsing and rendering.

use thiserror::Error;

/// The template text is malformed. Parsing stops at the first error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An open marker has no matching close marker before the end of input.
    #[error("unterminated directive starting at offset {offset}")]
    UnterminatedDirective { offset: usize },

    /// A branch or block-close marker outside any block, or a block that is
    /// structurally invalid.
    #[error("malformed block at offset {offset}: {reason}")]
    MalformedBlock { offset: usize, reason: &'static str },

    /// A reference with a zero-length path, such as `%(%)`.
    #[error("empty path in reference at offset {offset}")]
    EmptyPath { offset: usize },

    /// A reference whose path cannot be split into usable segments, or whose
    /// close marker is on a later line.
    #[error("malformed reference at offset {offset}: {reason}")]
    MalformedReference { offset: usize, reason: &'static str },
}

impl ParseError {
    /// Byte offset of the offending directive in the template text.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedDirective { offset }
            | ParseError::MalformedBlock { offset, .. }
            | ParseError::EmptyPath { offset }
            | ParseError::MalformedReference { offset, .. } => *offset,
        }
    }
}

/// A reference could not be resolved during rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A segment is missing, or a non-final segment selected a scalar.
    #[error("unresolved path '{path}'")]
    UnresolvedPath { path: String },

    /// A positional iteration variable is used outside a loop that binds it.
    #[error("iteration variable '{name}' is not bound by an enclosing block")]
    UnboundIterationVariable { name: String },

    /// An inline reference resolved to a collection.
    #[error("reference '{path}' resolves to a {kind}, expected a scalar")]
    NotAScalar { path: String, kind: &'static str },
}

/// Any failure of the template engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Convert a byte offset into a 1-based `(line, column)` pair.
///
/// Columns count characters, not bytes. Offsets past the end clamp to the
/// end of the text.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = &text[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
