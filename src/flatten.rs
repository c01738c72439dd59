//! Dense-table materialization of the linked trie.
//!
//! The scan loop wants one table lookup per input byte, so the failure
//! chain is resolved here once for every (state, byte) pair instead of
//! being walked at match time.

use crate::builder::{NodeIdx, TrieNode};
use crate::trie::{Trie, NIL, ROOT};

/// Widen the sparse trie into per-state 256-entry rows with failure
/// resolution baked into every entry.
///
/// `order` must be the BFS order from link computation: each state's row
/// is seeded from its failure row, which BFS guarantees is already final.
/// The `NIL` slot is never visited and its row stays all-`NIL`.
pub(crate) fn flatten(nodes: &[TrieNode], order: &[NodeIdx]) -> Trie {
    let states = nodes.len();
    let mut next = vec![[NIL; 256]; states];
    let mut dict_len = vec![0u32; states];
    let mut dict_link = vec![NIL; states];
    let mut pattern_id = vec![0u32; states];

    for &idx in order {
        let s = idx.get();
        let node = &nodes[s];
        dict_len[s] = node.pattern_len;
        dict_link[s] = node.dict.id();
        pattern_id[s] = node.pattern_id;

        let mut row = if idx == NodeIdx::ROOT {
            // Bytes with no outgoing edge keep the scan at the root.
            [ROOT; 256]
        } else {
            next[node.fail.get()]
        };
        for &(byte, child) in &node.children {
            row[byte as usize] = child.id();
        }
        next[s] = row;
    }

    Trie {
        next,
        dict_len,
        dict_link,
        pattern_id,
    }
}

#[cfg(test)]
mod tests {
    use crate::trie::{NIL, ROOT};
    use crate::TrieBuilder;

    #[test]
    fn root_row_never_goes_nil() {
        let mut builder = TrieBuilder::new();
        builder.add_patterns(["ab", "bc"]).unwrap();
        let trie = builder.build().unwrap();

        for &target in trie.next[ROOT as usize].iter() {
            assert_ne!(target, NIL);
        }
    }

    #[test]
    fn failure_resolution_is_baked_into_rows() {
        let mut builder = TrieBuilder::new();
        builder.add_patterns(["ab", "bc"]).unwrap();
        let trie = builder.build().unwrap();

        // After reading "ab", a 'c' must land on the terminal of "bc".
        let a = trie.next[ROOT as usize][b'a' as usize] as usize;
        let ab = trie.next[a][b'b' as usize] as usize;
        assert_eq!(trie.dict_len[ab], 2);

        let bc = trie.next[ab][b'c' as usize] as usize;
        assert_eq!(trie.dict_len[bc], 2);
        assert_eq!(trie.pattern_id[bc], 1);
    }

    #[test]
    fn unmatched_bytes_return_to_the_root() {
        let mut builder = TrieBuilder::new();
        builder.add_pattern("abc").unwrap();
        let trie = builder.build().unwrap();

        let a = trie.next[ROOT as usize][b'a' as usize];
        let ab = trie.next[a as usize][b'b' as usize];
        assert_eq!(trie.next[ab as usize][b'z' as usize], ROOT);
        // 'a' restarts the only pattern instead of dropping to the root.
        assert_eq!(trie.next[ab as usize][b'a' as usize], a);
    }
}
