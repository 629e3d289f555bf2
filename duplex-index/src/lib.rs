//! Bidirectional FMD-index search core for DNA text collections.
//!
//! An FMD-index holds every text together with its reverse complement, so
//! an ongoing match can be extended — or experimentally retracted — at
//! either end in constant time. This crate implements the search engine on
//! top of a narrow backend interface:
//!
//! - **Bi-intervals** — [`BiInterval`], the paired forward/reverse-strand
//!   match ranges all operations exchange
//! - **Extension** — [`FmdIndex::extend`], one character at either end per
//!   bounded set of rank queries
//! - **Counting** — [`FmdIndex::fmd_count`] over whole patterns
//! - **Suffix-tree iteration** — [`FmdIndex::suffix_patterns`], lexicographic
//!   and depth-limited, with optional dead-end reporting
//! - **Mapping** — [`FmdIndex::map`], [`FmdIndex::map_ranges`] and
//!   [`FmdIndex::map_fm`], resolving query bases to text positions or range
//!   identifiers
//! - **Backends** — the [`TextIndex`] trait plus [`DenseTextIndex`], an
//!   in-memory reference backend with bincode persistence
//!
//! # Example
//!
//! ```
//! use duplex_index::{DenseTextIndex, FmdIndex};
//!
//! let backend = DenseTextIndex::from_sequences(&[b"ACCG"]).unwrap();
//! let fmd = FmdIndex::new(backend);
//!
//! // "CG" occurs once per strand.
//! assert_eq!(fmd.fmd_count(b"CG", true).len(), 2);
//!
//! // Every base of the query resolves to a text position.
//! let mappings = fmd.map(b"ACCG", 0, None);
//! assert!(mappings.iter().all(|m| m.is_mapped()));
//! ```

pub mod alphabet;
pub mod fmd;
pub mod index;
pub mod interval;
pub mod iter;
pub mod stats;

pub use alphabet::{
    base_index, complement, is_base, reverse_complement, ALPHABETICAL_BASES, NUM_BASES,
    RC_SORTED_BASES,
};
pub use fmd::{FmdIndex, MapAttemptResult, Mapping};
pub use index::{DenseTextIndex, TextIndex};
pub use interval::BiInterval;
pub use iter::SuffixTreeIter;
pub use stats::SearchCounts;
