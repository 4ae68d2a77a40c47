mod matches;
mod trie;

use std::collections::HashMap;

use trie::Node;

/// Term frequency. Any value is valid; higher ranks first.
pub type Freq = i64;

/// Default number of ranked suggestions kept per prefix.
pub const DEFAULT_TOP_K: usize = 5;

/// Normalize a word: lowercase, strip numbers, replace dashes with spaces.
pub fn normalize_word(s: &str) -> String {
    s.to_lowercase()
        .replace('-', " ")
        .chars()
        .filter(|c| !c.is_numeric())
        .collect::<String>()
        .trim()
        .to_string()
}

/// In-memory trie where every node caches the top-K terms under its prefix,
/// so a lookup costs only the walk to the prefix node.
///
/// The root is the empty prefix and is updated on every insert, so it holds
/// the global top-K.
///
/// There is no internal locking. Callers sharing an instance across threads
/// must serialize writers against readers (the HTTP server wraps it in an RwLock).
#[derive(Debug)]
pub struct Autocomplete {
    root: Node,
    registry: HashMap<String, Freq>,
    top_k: usize,
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self::new()
    }
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::with_top_k(DEFAULT_TOP_K)
    }

    /// Create an index that keeps `top_k` suggestions per prefix. 0 falls back to the default.
    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            root: Node::new(),
            registry: HashMap::new(),
            top_k: if top_k == 0 { DEFAULT_TOP_K } else { top_k },
        }
    }

    /// Insert a term or overwrite its frequency. Re-inserting a term replaces
    /// its previous frequency on every node of its path.
    pub fn insert(&mut self, term: &str, freq: Freq) {
        let prev = self.registry.insert(term.to_string(), freq);
        let cap = self.top_k;

        // A lowered frequency can let back in a term that an earlier, full
        // cache on the path had cut, so those caches are recomputed.
        if prev.is_some_and(|p| freq < p) {
            rebuild_path(&mut self.root, term, &self.registry, cap);
            log::debug!("re-ranked '{}' ({} -> {})", term, prev.unwrap_or(freq), freq);
            return;
        }

        let mut node = &mut self.root;
        node.top.update(term, freq, cap);
        for ch in term.chars() {
            node = node.get_or_create_child(ch);
            node.top.update(term, freq, cap);
        }

        log::debug!("indexed '{}' ({})", term, freq);
    }

    /// Best ranked terms starting with `prefix`. Empty if no term has the prefix.
    pub fn suggestions(&self, prefix: &str) -> Vec<String> {
        match self.root.find(prefix) {
            Some(node) => node.top.terms(),
            None => Vec::new(),
        }
    }

    /// Like `suggestions()`, with the frequency of each term.
    pub fn top_matches(&self, prefix: &str) -> Vec<(String, Freq)> {
        match self.root.find(prefix) {
            Some(node) => node.top.iter().map(|(f, t)| (t.clone(), *f)).collect(),
            None => Vec::new(),
        }
    }

    /// Current frequency of a term, if it has been inserted.
    pub fn frequency(&self, term: &str) -> Option<Freq> {
        self.registry.get(term).copied()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Number of trie nodes, including the root.
    pub fn num_nodes(&self) -> usize {
        self.root.count()
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

/// Rebuild the caches on the path of `term` bottom-up. The path is detached
/// from the trie node by node, then rebuilt and reattached from the deepest
/// node up, so stack use doesn't grow with the term length.
fn rebuild_path(root: &mut Node, term: &str, registry: &HashMap<String, Freq>, cap: usize) {
    // (symbol, byte length of the prefix the node represents, node)
    let mut path: Vec<(char, usize, Node)> = Vec::new();
    for (i, ch) in term.char_indices() {
        let parent = match path.last_mut() {
            Some((_, _, n)) => n,
            None => &mut *root,
        };
        match parent.take_child(ch) {
            Some(child) => path.push((ch, i + ch.len_utf8(), child)),
            None => break,
        }
    }

    let own = |end: usize| registry.get(&term[..end]).map(|f| (&term[..end], *f));

    while let Some((ch, end, mut node)) = path.pop() {
        node.rebuild_top(own(end), cap);
        let parent = match path.last_mut() {
            Some((_, _, n)) => n,
            None => &mut *root,
        };
        parent.put_child(ch, node);
    }
    root.rebuild_top(own(0), cap);
}
