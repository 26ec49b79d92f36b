//! Directive template engine.
//!
//! Templates are plain text with three kinds of directive:
//!
//! - `%(path%)` substitutes a scalar from the configuration tree. Path
//!   segments are separated by `/` or `.`; list elements are selected by
//!   ordinal.
//! - `%{%(path%)` ... `%}` is a block. If `path` resolves to a scalar, the
//!   branch whose `%:label` matches is rendered once. If it resolves to a
//!   list or mapping, the body is rendered once per element, with the element
//!   bound to the positional name of the block's nesting depth (`%(0%)` for
//!   the outermost loop, `%(1%)` inside it, and so on). If it does not
//!   resolve, nothing is rendered.
//! - `%:label` starts a branch; an empty label marks the default branch.
//!
//! Bindings can be used inside paths: `%(Zones/%(0%)/PartNameList%)`.
//!
//! # Example
//!
//! ```text
//! %{%(Parallel%)
//! %:True
//! runCommand mpiexec -np %(Cores%) %(SolverName%) -parallel
//! %:False
//! runCommand %(SolverName%)
//! %}
//! ```

mod ast;
mod error;
mod eval;
mod parser;
mod render;
mod resolve;
mod scope;
mod syntax;


pub use ast::{Block, Branch, DirectiveCounts, Document, Node, Part, Path, Reference, Segment};
pub use error::{ParseError, ResolveError, TemplateError, line_col};
pub use parser::parse;
pub use render::render;
pub use resolve::{Resolved, resolve};
pub use scope::IterationScope;
pub use syntax::Syntax;

use crate::tree::ConfigTree;
use tracing::debug;

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    document: Document,
}

impl Template {
    /// Parse with the default markers.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, &Syntax::default())
    }

    /// Parse with custom markers.
    pub fn parse_with(text: &str, syntax: &Syntax) -> Result<Self, ParseError> {
        let document = parse(text, syntax)?;
        debug!(
            bytes = text.len(),
            blocks = document.counts().blocks,
            "template parsed"
        );
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn render(&self, tree: &ConfigTree) -> Result<String, ResolveError> {
        render(&self.document, tree)
    }
}

/// Parse and render in one step with the default markers.
pub fn render_str(text: &str, tree: &ConfigTree) -> Result<String, TemplateError> {
    Ok(Template::parse(text)?.render(tree)?)
}
