use std::cmp::Ordering;

use super::Freq;

/// Bounded list of the best ranked (frequency, term) pairs for one prefix.
/// Kept sorted by frequency descending, ties broken by term ascending.
#[derive(Debug, Clone, Default)]
pub struct TopMatches {
    items: Vec<(Freq, String)>,
}

impl TopMatches {
    /// Record `term` with `freq`, replacing any existing entry for the term,
    /// and keep at most `cap` entries.
    pub fn update(&mut self, term: &str, freq: Freq, cap: usize) {
        self.items.retain(|(_, t)| t != term);
        self.items.push((freq, term.to_string()));
        self.items.sort_by(rank);
        self.items.truncate(cap);
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Freq, String)> {
        self.items.iter()
    }

    /// Terms in rank order.
    pub fn terms(&self) -> Vec<String> {
        self.items.iter().map(|(_, t)| t.clone()).collect()
    }
}

/// Ordering key: higher frequency first, then lexicographically smaller term.
pub fn rank(a: &(Freq, String), b: &(Freq, String)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}
