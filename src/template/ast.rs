//! Parsed template document.

use std::fmt;

/// An immutable parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// True when the document is a single run of literal text (or nothing).
    pub fn is_literal(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n, Node::Literal(_)))
    }

    /// Count directives, including those nested in branch bodies.
    pub fn counts(&self) -> DirectiveCounts {
        let mut counts = DirectiveCounts::default();
        tally(&self.nodes, 1, &mut counts);
        counts
    }
}

fn tally(nodes: &[Node], depth: usize, counts: &mut DirectiveCounts) {
    for node in nodes {
        match node {
            Node::Literal(_) => {}
            Node::VarRef(_) => counts.references += 1,
            Node::Block(block) => {
                counts.blocks += 1;
                counts.branches += block.branches.len();
                counts.max_depth = counts.max_depth.max(depth);
                for branch in &block.branches {
                    tally(branch.body.nodes(), depth + 1, counts);
                }
            }
        }
    }
}

/// Directive statistics for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectiveCounts {
    pub references: usize,
    pub blocks: usize,
    pub branches: usize,
    /// Deepest block nesting level (0 when there are no blocks).
    pub max_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text copied to the output verbatim.
    Literal(String),
    /// Inline substitution of a scalar.
    VarRef(Reference),
    /// Conditional or iterating block.
    Block(Block),
}

/// A path reference and where it starts in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub path: Path,
    pub offset: usize,
}

/// A segmented key path, e.g. `Zones/%(0%)/PartNameList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// If the whole path is one positional name (`0`, `1`, ...), return it.
    ///
    /// Such a path refers to an iteration binding rather than the tree.
    pub fn iteration_name(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [segment] => match segment.parts() {
                [Part::Text(text)] if is_positional(text) => Some(text),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// One path segment: literal text, nested iteration references, or a mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    parts: Vec<Part>,
}

impl Segment {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                Part::Text(text) => f.write_str(text)?,
                Part::Binding(name) => write!(f, "%({}%)", name)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    /// A nested reference, resolved against the iteration scope.
    Binding(String),
}

/// A block directive: discriminator plus its branches, in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub discriminator: Reference,
    pub branches: Vec<Branch>,
    pub offset: usize,
}

impl Block {
    /// Branch to render for a scalar discriminator with the given label.
    ///
    /// The first labeled branch that lists `label` wins; otherwise the default
    /// branch, if any.
    pub fn select(&self, label: &str) -> Option<&Branch> {
        self.branches
            .iter()
            .find(|b| b.matches(label))
            .or_else(|| self.default_branch())
    }

    pub fn default_branch(&self) -> Option<&Branch> {
        self.branches.iter().find(|b| b.label.is_none())
    }

    /// Body repeated for each element of a collection discriminator.
    ///
    /// Labels are ignored for iteration: the default branch is used, or the
    /// first branch when every branch is labeled.
    pub fn iteration_body(&self) -> Option<&Document> {
        self.default_branch()
            .or_else(|| self.branches.first())
            .map(|b| &b.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// `None` marks the default branch. A label may list several
    /// whitespace-separated alternatives.
    pub label: Option<String>,
    pub body: Document,
}

impl Branch {
    /// True when the whole label equals `value`, or one of its
    /// whitespace-separated alternatives does.
    pub fn matches(&self, value: &str) -> bool {
        self.label.as_deref().is_some_and(|label| {
            label == value.trim() || label.split_whitespace().any(|alt| alt == value)
        })
    }
}

fn is_positional(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_path(parts: &[&str]) -> Path {
        Path::new(
            parts
                .iter()
                .map(|p| Segment::new(vec![Part::Text(p.to_string())]))
                .collect(),
        )
    }

    fn branch(label: Option<&str>, text: &str) -> Branch {
        Branch {
            label: label.map(str::to_string),
            body: Document::new(vec![Node::Literal(text.to_string())]),
        }
    }

    fn block(branches: Vec<Branch>) -> Block {
        Block {
            discriminator: Reference {
                path: text_path(&["flag"]),
                offset: 2,
            },
            branches,
            offset: 0,
        }
    }

    #[test]
    fn test_iteration_name() {
        assert_eq!(text_path(&["0"]).iteration_name(), Some("0"));
        assert_eq!(text_path(&["12"]).iteration_name(), Some("12"));
        assert_eq!(text_path(&["zones"]).iteration_name(), None);
        assert_eq!(text_path(&["zones", "0"]).iteration_name(), None);
    }

    #[test]
    fn test_path_display() {
        let path = Path::new(vec![
            Segment::new(vec![Part::Text("Zones".into())]),
            Segment::new(vec![Part::Binding("0".into())]),
            Segment::new(vec![Part::Text("Parts".into())]),
        ]);
        assert_eq!(path.to_string(), "Zones/%(0%)/Parts");
    }

    #[test]
    fn test_select_prefers_labeled_match() {
        let b = block(vec![
            branch(None, "default"),
            branch(Some("True"), "yes"),
        ]);
        assert_eq!(b.select("True").unwrap().label.as_deref(), Some("True"));
        assert!(b.select("False").unwrap().label.is_none());
    }

    #[test]
    fn test_select_alternatives() {
        let b = block(vec![branch(Some("simpleFoam pimpleFoam"), "incompressible")]);
        assert!(b.select("pimpleFoam").is_some());
        assert!(b.select("simpleFoam").is_some());
        assert!(b.select("buoyantFoam").is_none());
    }

    #[test]
    fn test_select_whole_label_with_space() {
        let b = block(vec![
            branch(Some("fast run"), "quick"),
            branch(Some("fast"), "single"),
        ]);
        assert_eq!(b.select("fast run").unwrap().label.as_deref(), Some("fast run"));
        assert_eq!(b.select("run").unwrap().label.as_deref(), Some("fast run"));
        assert_eq!(b.select("fast").unwrap().label.as_deref(), Some("fast run"));
    }

    #[test]
    fn test_iteration_body_falls_back_to_first_branch() {
        let b = block(vec![branch(Some("a"), "first"), branch(Some("b"), "second")]);
        assert_eq!(
            b.iteration_body(),
            Some(&Document::new(vec![Node::Literal("first".into())]))
        );
    }

    #[test]
    fn test_counts() {
        let inner = Node::Block(block(vec![branch(None, "x")]));
        let outer = Block {
            branches: vec![Branch {
                label: None,
                body: Document::new(vec![inner]),
            }],
            ..block(vec![])
        };
        let doc = Document::new(vec![
            Node::Literal("a".into()),
            Node::VarRef(Reference {
                path: text_path(&["x"]),
                offset: 1,
            }),
            Node::Block(outer),
        ]);
        let counts = doc.counts();
        assert_eq!(counts.references, 1);
        assert_eq!(counts.blocks, 2);
        assert_eq!(counts.branches, 2);
        assert_eq!(counts.max_depth, 2);
        assert!(!doc.is_literal());
    }
}
