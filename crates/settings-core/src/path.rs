//! Key decomposition shared by insertion and lookup.
//!
//! A key such as `"display/zoom"` splits on `/` into components. Every
//! component but the last names a map to descend into; the last names the
//! leaf entry.
//!
//! Empty components are kept as literal empty-string keys: `"a//b"` is
//! `["a", "", "b"]`, `"/a"` is `["", "a"]`, and `""` is `[""]`. Nothing is
//! rejected, so every key resolves to at least one component.

/// A key split into parent components and a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'a> {
    parents: Vec<&'a str>,
    leaf: &'a str,
}

impl<'a> KeyPath<'a> {
    /// Split a key on `/`.
    pub fn parse(key: &'a str) -> Self {
        match key.rsplit_once('/') {
            Some((head, leaf)) => Self {
                parents: head.split('/').collect(),
                leaf,
            },
            None => Self {
                parents: Vec::new(),
                leaf: key,
            },
        }
    }

    /// Components that must resolve to maps, outermost first.
    pub fn parents(&self) -> &[&'a str] {
        &self.parents
    }

    /// The final component, naming the entry that holds the value.
    pub fn leaf(&self) -> &'a str {
        self.leaf
    }

    /// All components in order, leaf last.
    pub fn components(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parents
            .iter()
            .copied()
            .chain(std::iter::once(self.leaf))
    }
}
