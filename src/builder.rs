//! Mutable construction side of the automaton.
//!
//! All trie nodes live in a `Vec` arena and reference each other by index,
//! so the cycles the failure links introduce later cost nothing in
//! ownership terms. Children stay sparse here; the flattener widens them
//! into full 256-entry rows at `build` time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use smallvec::SmallVec;

use crate::flatten;
use crate::links;
use crate::trie::{Trie, MAX_STATES};
use crate::MultimatchError;

/// Index into the builder's node arena.
///
/// Slot 0 is the `NIL` sentinel and slot 1 the root, so arena indices
/// double as the state ids of the flattened automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeIdx(u32);

impl NodeIdx {
    pub(crate) const NIL: NodeIdx = NodeIdx(0);
    pub(crate) const ROOT: NodeIdx = NodeIdx(1);

    #[inline]
    pub(crate) fn get(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn id(self) -> u32 {
        self.0
    }
}

/// A node in the builder trie.
pub(crate) struct TrieNode {
    /// Children as (byte, index) pairs, kept sorted by byte.
    pub(crate) children: SmallVec<[(u8, NodeIdx); 4]>,
    /// Longest proper suffix of this node's path that is itself a path.
    pub(crate) fail: NodeIdx,
    /// Nearest terminal on the failure chain, `NIL` when there is none.
    pub(crate) dict: NodeIdx,
    /// Length of the pattern terminating here, 0 for interior nodes.
    pub(crate) pattern_len: u32,
    /// Meaningful only when `pattern_len > 0`.
    pub(crate) pattern_id: u32,
}

impl Default for TrieNode {
    fn default() -> Self {
        Self {
            children: SmallVec::new(),
            fail: NodeIdx::NIL,
            dict: NodeIdx::NIL,
            pattern_len: 0,
            pattern_id: 0,
        }
    }
}

impl TrieNode {
    /// Look up the child reached on `byte`.
    #[inline]
    pub(crate) fn child(&self, byte: u8) -> Option<NodeIdx> {
        self.children
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|pos| self.children[pos].1)
    }
}

/// Accumulates patterns into a trie and compiles them into a [`Trie`].
///
/// Pattern ids are dense and assigned in insertion order. Re-inserting the
/// bytes of an existing pattern still allocates a fresh id and the terminal
/// node keeps only the newest one, so duplicates resolve last-insert-wins.
///
/// ```
/// use multimatch::TrieBuilder;
///
/// let mut builder = TrieBuilder::new();
/// builder.add_patterns(["he", "she", "his", "hers"])?;
/// let trie = builder.build()?;
/// assert_eq!(trie.match_all(b"ushers").len(), 3);
/// # Ok::<(), multimatch::MultimatchError>(())
/// ```
pub struct TrieBuilder {
    nodes: Vec<TrieNode>,
    pattern_count: u32,
    built: bool,
}

impl TrieBuilder {
    pub fn new() -> Self {
        // Slot 0 is the NIL sentinel, slot 1 the root.
        let mut nodes = Vec::with_capacity(64);
        nodes.push(TrieNode::default());
        nodes.push(TrieNode::default());
        Self {
            nodes,
            pattern_count: 0,
            built: false,
        }
    }

    /// Insert one pattern and assign it the next sequential id.
    ///
    /// `&str` and `String` pass through as their raw bytes. Empty patterns
    /// fail with `InvalidPattern`.
    pub fn add_pattern<P: AsRef<[u8]>>(
        &mut self,
        pattern: P,
    ) -> Result<&mut Self, MultimatchError> {
        let pattern = pattern.as_ref();
        if self.built {
            return Err(MultimatchError::BuilderConsumed);
        }
        if pattern.is_empty() {
            return Err(MultimatchError::InvalidPattern);
        }

        let mut node = NodeIdx::ROOT;
        for &byte in pattern {
            node = self.child_or_insert(node, byte)?;
        }

        let terminal = &mut self.nodes[node.get()];
        terminal.pattern_len = pattern.len() as u32;
        terminal.pattern_id = self.pattern_count;
        self.pattern_count += 1;
        Ok(self)
    }

    /// Insert every pattern from an iterator.
    pub fn add_patterns<I>(&mut self, patterns: I) -> Result<&mut Self, MultimatchError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for pattern in patterns {
            self.add_pattern(pattern)?;
        }
        Ok(self)
    }

    /// Load patterns from a file, one per line.
    ///
    /// Surrounding whitespace is trimmed and blank lines are skipped.
    pub fn load_from_lines<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<&mut Self, MultimatchError> {
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let pattern = line.trim();
            if pattern.is_empty() {
                continue;
            }
            self.add_pattern(pattern)?;
        }
        Ok(self)
    }

    /// Load hex-encoded patterns from a file, one per line.
    ///
    /// Lines are trimmed and blank lines skipped as in
    /// [`load_from_lines`](Self::load_from_lines), then each remaining line
    /// is hex-decoded into the pattern bytes. A malformed line fails with
    /// `InvalidHex` carrying the offending text.
    pub fn load_hex_from_lines<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<&mut Self, MultimatchError> {
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let hex = line.trim();
            if hex.is_empty() {
                continue;
            }
            let pattern =
                hex::decode(hex).map_err(|_| MultimatchError::InvalidHex(hex.to_string()))?;
            self.add_pattern(pattern)?;
        }
        Ok(self)
    }

    /// Number of patterns inserted so far.
    pub fn pattern_count(&self) -> u32 {
        self.pattern_count
    }

    /// Compute failure and dictionary links, then flatten into a [`Trie`].
    ///
    /// The builder is consumed: any later `add_pattern` or `build` fails
    /// with `BuilderConsumed`.
    pub fn build(&mut self) -> Result<Trie, MultimatchError> {
        if self.built {
            return Err(MultimatchError::BuilderConsumed);
        }
        self.built = true;
        let order = links::compute(&mut self.nodes);
        Ok(flatten::flatten(&self.nodes, &order))
    }

    fn child_or_insert(
        &mut self,
        parent: NodeIdx,
        byte: u8,
    ) -> Result<NodeIdx, MultimatchError> {
        let children = &self.nodes[parent.get()].children;
        match children.binary_search_by_key(&byte, |&(b, _)| b) {
            Ok(pos) => Ok(children[pos].1),
            Err(pos) => {
                let child = self.alloc()?;
                self.nodes[parent.get()].children.insert(pos, (byte, child));
                Ok(child)
            }
        }
    }

    fn alloc(&mut self) -> Result<NodeIdx, MultimatchError> {
        // State ids stay below 2^31; the top bit is reserved.
        if self.nodes.len() >= MAX_STATES {
            return Err(MultimatchError::TooManyStates);
        }
        let idx = NodeIdx(self.nodes.len() as u32);
        self.nodes.push(TrieNode::default());
        Ok(idx)
    }
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}
