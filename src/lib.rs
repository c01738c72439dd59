//! multimatch: simultaneous multi-pattern substring search over bytes.
//!
//! A set of byte patterns is compiled into an immutable Aho-Corasick
//! automaton ([`Trie`]) that reports every occurrence of every pattern in a
//! single left-to-right pass over the input. Patterns and inputs are opaque
//! byte sequences; the full 256-value alphabet is supported and any text
//! encoding is the caller's concern.
//!
//! ```
//! use multimatch::TrieBuilder;
//!
//! let mut builder = TrieBuilder::new();
//! builder.add_pattern("or")?.add_pattern("amet")?;
//! let trie = builder.build()?;
//!
//! let matches = trie.match_all(b"Lorem ipsum dolor sit amet.");
//! assert_eq!(matches.len(), 3);
//! assert_eq!(matches[0].pos(), 1);
//! assert_eq!(matches[2].bytes(), b"amet");
//! # Ok::<(), multimatch::MultimatchError>(())
//! ```
//!
//! Building is the expensive step; it can be amortized across runs by
//! serializing the automaton with [`encode`] (or [`encode_gzip`]) and
//! loading it back with [`decode`] / [`decode_gzip`].

use std::fmt;
use std::io;

mod builder;
mod codec;
mod flatten;
mod links;
mod matching;
mod trie;

pub use builder::TrieBuilder;
pub use codec::{decode, decode_gzip, encode, encode_gzip};
pub use matching::Match;
pub use trie::Trie;

/// Errors surfaced by the builder, the loaders, and the codec.
///
/// The scan path itself cannot fail: absence of a match is the empty vec or
/// `None`, never an error.
#[derive(Debug)]
pub enum MultimatchError {
    /// An empty pattern was handed to the builder.
    InvalidPattern,
    /// The builder was used again after `build`.
    BuilderConsumed,
    /// The pattern set needs more states than a 31-bit id can address.
    TooManyStates,
    /// A hex-encoded pattern file contained a malformed line.
    InvalidHex(String),
    /// An underlying read or write failed.
    IoFailure(io::Error),
    /// A serialized automaton ended before all declared data was read.
    ShortRead,
    /// A serialized automaton's length headers disagree.
    LengthMismatch,
    /// The input does not start with the expected magic and version.
    UnknownFormat,
}

impl fmt::Display for MultimatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultimatchError::InvalidPattern => {
                write!(f, "patterns must be at least one byte long")
            }
            MultimatchError::BuilderConsumed => write!(f, "builder already consumed by build"),
            MultimatchError::TooManyStates => {
                write!(f, "pattern set exceeds 2^31 - 1 automaton states")
            }
            MultimatchError::InvalidHex(line) => {
                write!(f, "malformed hex pattern line {:?}", line)
            }
            MultimatchError::IoFailure(err) => write!(f, "i/o failure: {}", err),
            MultimatchError::ShortRead => write!(f, "serialized automaton truncated"),
            MultimatchError::LengthMismatch => {
                write!(f, "serialized automaton length headers disagree")
            }
            MultimatchError::UnknownFormat => write!(f, "unrecognized serialization format"),
        }
    }
}

impl std::error::Error for MultimatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MultimatchError::IoFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MultimatchError {
    fn from(err: io::Error) -> Self {
        MultimatchError::IoFailure(err)
    }
}
