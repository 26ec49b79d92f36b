//! Iteration bindings visible to nested directives.

use std::borrow::Cow;

/// Stack of iteration bindings, one frame per enclosing iterating block.
///
/// Frame `n` is visible under the positional name `"n"`. A scope lives for a
/// single render call, so concurrent renders never share one.
#[derive(Debug, Default)]
pub struct IterationScope<'a> {
    frames: Vec<Cow<'a, str>>,
}

impl<'a> IterationScope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Text bound to a positional name, if that depth is currently bound.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let index: usize = name.parse().ok()?;
        self.frames.get(index).map(|frame| frame.as_ref())
    }

    pub(crate) fn push(&mut self, binding: Cow<'a, str>) {
        self.frames.push(binding);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_lookup() {
        let mut scope = IterationScope::new();
        assert_eq!(scope.lookup("0"), None);

        scope.push(Cow::Borrowed("porous1"));
        scope.push(Cow::Owned("Body001".to_string()));
        assert_eq!(scope.depth(), 2);
        assert_eq!(scope.lookup("0"), Some("porous1"));
        assert_eq!(scope.lookup("1"), Some("Body001"));
        assert_eq!(scope.lookup("2"), None);
        assert_eq!(scope.lookup("x"), None);

        scope.pop();
        assert_eq!(scope.lookup("1"), None);
        assert_eq!(scope.depth(), 1);
    }
}
