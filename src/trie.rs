//! The immutable scan engine.

use crate::matching::Match;

/// Sentinel "no state". Row 0 of every automaton array is reserved for it.
pub(crate) const NIL: u32 = 0;
/// The automaton entry state.
pub(crate) const ROOT: u32 = 1;
/// State ids stay below 2^31; the top bit is reserved.
pub(crate) const MAX_STATES: usize = i32::MAX as usize;

/// An immutable multi-pattern matcher.
///
/// Produced by [`TrieBuilder::build`](crate::TrieBuilder::build) or
/// [`decode`](crate::decode). The automaton is a value: all state lives in
/// read-only arrays, so one `Trie` can be scanned from any number of
/// threads at once, e.g. behind an `Arc`:
///
/// ```
/// # use multimatch::TrieBuilder;
/// use std::sync::Arc;
///
/// let mut builder = TrieBuilder::new();
/// builder.add_pattern("needle")?;
/// let trie = Arc::new(builder.build()?);
/// let other = Arc::clone(&trie);
/// // Both handles can scan concurrently.
/// # Ok::<(), multimatch::MultimatchError>(())
/// ```
#[derive(Clone)]
pub struct Trie {
    /// Goto table with failure resolution baked in, one row per state.
    pub(crate) next: Vec<[u32; 256]>,
    /// Pattern length terminating at each state, 0 for interior states.
    pub(crate) dict_len: Vec<u32>,
    /// Next state up the suffix-output chain, `NIL` when there is none.
    pub(crate) dict_link: Vec<u32>,
    /// Pattern id per state, meaningful only where `dict_len > 0`.
    pub(crate) pattern_id: Vec<u32>,
}

impl Trie {
    /// Scan `input` once, handing every match to `callback` as
    /// `(end_pos, length, pattern_id)`.
    ///
    /// For a fixed end position the direct terminal is reported first,
    /// then the suffix patterns along the dictionary chain, shortest
    /// failure hop first; earlier end positions precede later ones.
    /// Returning `false` from the callback stops the scan immediately.
    pub fn walk<F>(&self, input: &[u8], mut callback: F)
    where
        F: FnMut(usize, usize, u32) -> bool,
    {
        let mut state = ROOT as usize;
        for (end, &byte) in input.iter().enumerate() {
            state = self.next[state][byte as usize] as usize;

            if self.dict_len[state] > 0
                && !callback(end, self.dict_len[state] as usize, self.pattern_id[state])
            {
                return;
            }

            let mut suffix = self.dict_link[state] as usize;
            while suffix != NIL as usize {
                if !callback(end, self.dict_len[suffix] as usize, self.pattern_id[suffix]) {
                    return;
                }
                suffix = self.dict_link[suffix] as usize;
            }
        }
    }

    /// Collect every match in `input`, in emission order.
    ///
    /// Matches may overlap; a pattern that is a suffix of another and ends
    /// at the same byte is reported separately.
    pub fn match_all<'a>(&self, input: &'a [u8]) -> Vec<Match<'a>> {
        let mut matches = Vec::new();
        self.walk(input, |end, len, pattern| {
            let pos = end + 1 - len;
            matches.push(Match::new(pos, &input[pos..=end], pattern));
            true
        });
        matches
    }

    /// The first match in emission order, or `None`.
    pub fn match_first<'a>(&self, input: &'a [u8]) -> Option<Match<'a>> {
        let mut first = None;
        self.walk(input, |end, len, pattern| {
            let pos = end + 1 - len;
            first = Some(Match::new(pos, &input[pos..=end], pattern));
            false
        });
        first
    }

    pub(crate) fn state_count(&self) -> usize {
        self.next.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrieBuilder;

    fn build(patterns: &[&str]) -> Trie {
        let mut builder = TrieBuilder::new();
        builder.add_patterns(patterns).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn empty_automaton_scans_cleanly() {
        let mut builder = TrieBuilder::new();
        let trie = builder.build().unwrap();

        assert_eq!(trie.state_count(), 2);
        assert!(trie.match_all(b"anything at all").is_empty());
        assert!(trie.match_first(b"anything at all").is_none());
    }

    #[test]
    fn single_symbol_positions() {
        let trie = build(&["o"]);
        let positions: Vec<usize> = trie
            .match_all(b"Aho-Corasick")
            .iter()
            .map(|m| m.pos())
            .collect();
        assert_eq!(positions, vec![2, 5]);
    }

    #[test]
    fn no_match_is_empty_not_an_error() {
        let trie = build(&["Gazorpazopfield", "Knuth", "O"]);
        assert!(trie.match_all(b"Aho-Corasick").is_empty());
        assert!(trie.match_first(b"Aho-Corasick").is_none());
    }

    #[test]
    fn match_first_stops_the_scan_early() {
        let trie = build(&["Hedvig"]);
        let input = b"...Hedvig...Hedvig...";
        let first = trie.match_first(input).unwrap();
        assert_eq!(first.pos(), 3);
        assert_eq!(first.bytes(), b"Hedvig");
    }

    #[test]
    fn trie_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Trie>();
    }
}
