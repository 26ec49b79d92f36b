//! Template parser.
//!
//! Turns template text into a [`Document`]. The parser knows nothing about
//! configuration values: nested iteration references inside a path are kept
//! as [`Part::Binding`] and resolved at render time.
//!
//! Block layout (default markers):
//!
//! ```text
//! %{%(Solver/Parallel%)
//! %:True
//! ...parallel stage...
//! %:False
//! ...serial stage...
//! %}
//! ```
//!
//! After the discriminator, horizontal whitespace and one newline are
//! skipped. Text before the first branch marker is an implicit default
//! branch, which is how iterating blocks are usually written:
//!
//! ```text
//! %{%(Zones%)
//! topoSet -dict system/topoSetDict.%(0%)
//! %}
//! ```

use super::ast::{Block, Branch, Document, Node, Part, Path, Reference, Segment};
use super::error::ParseError;
use super::syntax::Syntax;

/// Parse template text with the given markers.
pub fn parse(text: &str, syntax: &Syntax) -> Result<Document, ParseError> {
    let mut parser = Parser {
        text,
        syntax,
        pos: 0,
    };
    let (nodes, _) = parser.parse_nodes(None)?;
    Ok(Document::new(nodes))
}

/// Why a run of nodes ended.
enum Stop {
    Eof,
    /// A branch marker; the offset is where the marker began.
    Branch(usize),
    BlockClose,
}

struct Parser<'a> {
    text: &'a str,
    syntax: &'a Syntax,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at(&self, marker: &str) -> bool {
        self.rest().starts_with(marker)
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Parse nodes until end of input, or a branch / block-close marker when
    /// inside the block that opened at `block`.
    fn parse_nodes(&mut self, block: Option<usize>) -> Result<(Vec<Node>, Stop), ParseError> {
        let mut nodes = Vec::new();
        let mut literal = String::new();

        let stop = loop {
            if self.at(&self.syntax.block_open) {
                flush(&mut literal, &mut nodes);
                nodes.push(self.parse_block()?);
            } else if self.at(&self.syntax.inline_open) {
                flush(&mut literal, &mut nodes);
                nodes.push(Node::VarRef(self.parse_reference()?));
            } else if self.at(&self.syntax.branch) {
                if block.is_none() {
                    return Err(ParseError::MalformedBlock {
                        offset: self.pos,
                        reason: "branch marker outside of a block",
                    });
                }
                let offset = self.pos;
                self.pos += self.syntax.branch.len();
                break Stop::Branch(offset);
            } else if self.at(&self.syntax.block_close) {
                if block.is_none() {
                    return Err(ParseError::MalformedBlock {
                        offset: self.pos,
                        reason: "block close without a matching block open",
                    });
                }
                self.pos += self.syntax.block_close.len();
                break Stop::BlockClose;
            } else if let Some(ch) = self.peek() {
                literal.push(ch);
                self.pos += ch.len_utf8();
            } else {
                break Stop::Eof;
            }
        };

        flush(&mut literal, &mut nodes);
        Ok((nodes, stop))
    }

    fn parse_block(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.pos += self.syntax.block_open.len();

        if !self.at(&self.syntax.inline_open) {
            return Err(ParseError::MalformedBlock {
                offset: start,
                reason: "block must open with a discriminator reference",
            });
        }
        let discriminator = self.parse_reference()?;
        self.skip_line_end();

        let mut branches: Vec<Branch> = Vec::new();
        let (leading, mut stop) = self.parse_nodes(Some(start))?;
        let labeled_follow = matches!(stop, Stop::Branch(_));
        if !leading.is_empty() && !(labeled_follow && is_blank(&leading)) {
            branches.push(Branch {
                label: None,
                body: Document::new(leading),
            });
        }

        loop {
            match stop {
                Stop::Eof => return Err(ParseError::UnterminatedDirective { offset: start }),
                Stop::BlockClose => {
                    self.skip_newline();
                    break;
                }
                Stop::Branch(marker) => {
                    let label = self.parse_label(start)?;
                    if label.is_none() && branches.iter().any(|b| b.label.is_none()) {
                        return Err(ParseError::MalformedBlock {
                            offset: marker,
                            reason: "block has more than one default branch",
                        });
                    }
                    let (body, next) = self.parse_nodes(Some(start))?;
                    branches.push(Branch {
                        label,
                        body: Document::new(body),
                    });
                    stop = next;
                }
            }
        }

        if branches.is_empty() {
            return Err(ParseError::MalformedBlock {
                offset: start,
                reason: "block has no branches",
            });
        }

        Ok(Node::Block(Block {
            discriminator,
            branches,
            offset: start,
        }))
    }

    /// Read a branch label up to and including the end of its line.
    fn parse_label(&mut self, block_start: usize) -> Result<Option<String>, ParseError> {
        let Some(len) = self.rest().find('\n') else {
            return Err(ParseError::UnterminatedDirective {
                offset: block_start,
            });
        };
        let label = self.rest()[..len].trim();
        let label = (!label.is_empty()).then(|| label.to_string());
        self.pos += len + 1;
        Ok(label)
    }

    /// Skip a `\n` or `\r\n` directly at the cursor.
    fn skip_newline(&mut self) {
        if self.at("\r\n") {
            self.pos += 2;
        } else if self.at("\n") {
            self.pos += 1;
        }
    }

    /// Skip spaces and tabs, then a single `\n` or `\r\n`.
    fn skip_line_end(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches([' ', '\t']);
        let mut skipped = rest.len() - trimmed.len();
        if trimmed.starts_with("\r\n") {
            skipped += 2;
        } else if trimmed.starts_with('\n') {
            skipped += 1;
        }
        self.pos += skipped;
    }

    fn parse_reference(&mut self) -> Result<Reference, ParseError> {
        let start = self.pos;
        self.pos += self.syntax.inline_open.len();

        let mut segments = Vec::new();
        let mut parts = Vec::new();
        let mut text = String::new();

        loop {
            if self.at(&self.syntax.inline_close) {
                self.pos += self.syntax.inline_close.len();
                match finish_segment(&mut parts, &mut text) {
                    Some(segment) => segments.push(segment),
                    None if segments.is_empty() => {
                        return Err(ParseError::EmptyPath { offset: start });
                    }
                    None => {
                        return Err(ParseError::MalformedReference {
                            offset: start,
                            reason: "empty path segment",
                        });
                    }
                }
                break;
            }

            if self.at(&self.syntax.inline_open) {
                text_into_parts(&mut parts, &mut text);
                parts.push(Part::Binding(self.parse_binding()?));
                continue;
            }

            match self.peek() {
                None => return Err(ParseError::UnterminatedDirective { offset: start }),
                Some('\n') => return Err(self.line_break_error(start)),
                Some(ch) if self.syntax.is_separator(ch) => {
                    let Some(segment) = finish_segment(&mut parts, &mut text) else {
                        return Err(ParseError::MalformedReference {
                            offset: start,
                            reason: "empty path segment",
                        });
                    };
                    segments.push(segment);
                    self.pos += ch.len_utf8();
                }
                Some(ch) => {
                    text.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }

        Ok(Reference {
            path: Path::new(segments),
            offset: start,
        })
    }

    /// Parse a nested reference inside a path.
    ///
    /// The name is not checked here: a name no enclosing block binds fails
    /// at render time, and only if the reference is actually evaluated.
    fn parse_binding(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += self.syntax.inline_open.len();

        let Some(len) = self.rest().find(self.syntax.inline_close.as_str()) else {
            return Err(ParseError::UnterminatedDirective { offset: start });
        };
        let raw = &self.rest()[..len];
        if raw.contains('\n') {
            return Err(self.line_break_error(start));
        }
        if raw.contains(self.syntax.inline_open.as_str()) {
            return Err(ParseError::MalformedReference {
                offset: start,
                reason: "references nest only one level deep",
            });
        }

        let name = raw.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyPath { offset: start });
        }

        let name = name.to_string();
        self.pos += len + self.syntax.inline_close.len();
        Ok(name)
    }

    /// Error for a reference interrupted by a line break at the cursor.
    ///
    /// If a close marker follows later the reference spans lines; otherwise
    /// it is never closed at all.
    fn line_break_error(&self, start: usize) -> ParseError {
        if self.rest().contains(self.syntax.inline_close.as_str()) {
            ParseError::MalformedReference {
                offset: start,
                reason: "reference spans lines",
            }
        } else {
            ParseError::UnterminatedDirective { offset: start }
        }
    }
}

fn flush(literal: &mut String, nodes: &mut Vec<Node>) {
    if !literal.is_empty() {
        nodes.push(Node::Literal(std::mem::take(literal)));
    }
}

fn is_blank(nodes: &[Node]) -> bool {
    nodes
        .iter()
        .all(|n| matches!(n, Node::Literal(text) if text.trim().is_empty()))
}

fn text_into_parts(parts: &mut Vec<Part>, text: &mut String) {
    if !text.is_empty() {
        parts.push(Part::Text(std::mem::take(text)));
    }
}

/// Close the current segment, trimming whitespace at its outer edges.
///
/// Returns `None` when nothing but whitespace was collected.
fn finish_segment(parts: &mut Vec<Part>, text: &mut String) -> Option<Segment> {
    text_into_parts(parts, text);
    let mut taken = std::mem::take(parts);

    if let Some(Part::Text(first)) = taken.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Part::Text(last)) = taken.last_mut() {
        *last = last.trim_end().to_string();
    }
    taken.retain(|p| !matches!(p, Part::Text(t) if t.is_empty()));

    (!taken.is_empty()).then(|| Segment::new(taken))
}
