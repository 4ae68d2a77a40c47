use std::collections::HashMap;

use super::{matches::TopMatches, Freq};

/// A trie node. Children are created lazily on insert and never removed
/// from the trie (they are only detached briefly while a path is rebuilt).
///
/// Terms can be arbitrarily long, so nothing here recurses per level.
#[derive(Debug, Default)]
pub struct Node {
    children: HashMap<char, Node>,
    pub top: TopMatches,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the child for `ch`, creating an empty one if absent.
    pub fn get_or_create_child(&mut self, ch: char) -> &mut Node {
        self.children.entry(ch).or_default()
    }

    /// Read-only child lookup. `None` means no inserted term continues with `ch` here.
    pub fn child(&self, ch: char) -> Option<&Node> {
        self.children.get(&ch)
    }

    /// Walk `prefix` from this node without creating anything.
    pub fn find(&self, prefix: &str) -> Option<&Node> {
        let mut node = self;
        for ch in prefix.chars() {
            node = node.child(ch)?;
        }
        Some(node)
    }

    pub fn children(&self) -> impl Iterator<Item = (&char, &Node)> {
        self.children.iter()
    }

    /// Detach the child for `ch`. Put it back with `put_child()`.
    pub fn take_child(&mut self, ch: char) -> Option<Node> {
        self.children.remove(&ch)
    }

    pub fn put_child(&mut self, ch: char, node: Node) {
        self.children.insert(ch, node);
    }

    /// Recompute this node's cache from its children's caches plus the term
    /// ending here, if any. Children must already be up to date.
    pub fn rebuild_top(&mut self, own: Option<(&str, Freq)>, cap: usize) {
        let mut top = TopMatches::default();
        if let Some((term, freq)) = own {
            top.update(term, freq, cap);
        }
        for child in self.children.values() {
            for (freq, term) in child.top.iter() {
                top.update(term, *freq, cap);
            }
        }
        self.top = top;
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        let mut n = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            n += 1;
            stack.extend(node.children.values());
        }
        n
    }
}

// The derived drop would recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Node> = self.children.drain().map(|(_, n)| n).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, n)| n));
        }
    }
}
