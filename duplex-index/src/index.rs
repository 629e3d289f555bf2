//! The backend interface the search core runs on, plus a dense reference
//! backend.
//!
//! The FMD search algorithms only need a handful of queries over an
//! immutable BWT: symbol ranks, the cumulative character table, the text
//! count, and SA-sample location. [`TextIndex`] captures exactly that
//! surface, so a run-length compressed suffix array can sit behind it
//! without the search core knowing.
//!
//! [`DenseTextIndex`] is the reference backend: a generalized suffix array
//! over every input sequence *and its reverse complement*, built by direct
//! suffix sorting with a full per-position occurrence table and full SA. It
//! trades memory for simplicity; compressed backends are expected to
//! replace it for large collections.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use duplex_core::{DuplexError, Result};

use crate::alphabet::{base_index, encode_base, reverse_complement, NUM_BASES};

/// Text separator byte in the concatenated collection. Sorts before every
/// base, so the separator-starting rows form the leading block of the BWT.
const SEPARATOR: u8 = 0;

const INDEX_MAGIC: u64 = 0x4450_4C58_4944_5831; // "DPLXIDX1"
const INDEX_VERSION: u32 = 1;

/// Minimal query surface the search core needs from an underlying index.
///
/// All methods are pure queries over immutable data and must be safe to
/// call from multiple threads.
pub trait TextIndex {
    /// Total rows in the BWT, including the `text_count()` leading
    /// separator rows.
    fn bwt_len(&self) -> usize;

    /// Number of texts indexed (equals the number of separator rows).
    fn text_count(&self) -> usize;

    /// Number of BWT symbols strictly smaller than `base`, separators
    /// included; the start of the base's bucket in BWT coordinates.
    fn count_before(&self, base: u8) -> usize;

    /// Occurrences of `base` among BWT positions `[0, i)`. Non-base bytes
    /// have rank 0 everywhere.
    fn rank(&self, base: u8, i: usize) -> usize;

    /// First SA-space row whose suffix starts with `base`.
    fn bucket_start(&self, base: u8) -> usize {
        self.count_before(base) - self.text_count()
    }

    /// Resolve an SA-space row to `(text id, offset within text)`.
    ///
    /// May be sampled in real backends; cost is allowed to grow with the
    /// sample rate.
    fn locate(&self, sa_index: usize) -> (usize, usize);
}

/// Dense in-memory FMD backend over a collection of DNA sequences.
///
/// Construction appends the reverse complement of every input as its own
/// text, which is what makes bidirectional extension work: any pattern
/// present on one strand has its mate present on the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseTextIndex {
    magic: u64,
    version: u32,
    text_count: usize,
    /// `counts_through[i]` = per-base occurrence totals in BWT `[0, i]`.
    counts_through: Vec<[usize; NUM_BASES]>,
    /// Start of each base's bucket in BWT coordinates (separators first).
    bucket_starts: [usize; NUM_BASES],
    /// Full suffix array of the concatenation, separator rows included.
    suffix_array: Vec<usize>,
    /// Offset of each text within the concatenation.
    text_starts: Vec<usize>,
}

impl DenseTextIndex {
    /// Build an index over `sequences`, adding the reverse complement of
    /// each as a separate text.
    ///
    /// Input bytes are normalized first: lowercase is accepted, anything
    /// outside A/C/G/T becomes N.
    ///
    /// # Errors
    ///
    /// Fails on an empty collection or an empty sequence.
    pub fn from_sequences<S: AsRef<[u8]>>(sequences: &[S]) -> Result<Self> {
        if sequences.is_empty() {
            return Err(DuplexError::InvalidInput(
                "cannot index an empty collection".into(),
            ));
        }

        let mut concat = Vec::new();
        let mut text_starts = Vec::new();
        for sequence in sequences {
            let sequence = sequence.as_ref();
            if sequence.is_empty() {
                return Err(DuplexError::InvalidInput(
                    "cannot index an empty sequence".into(),
                ));
            }
            let forward: Vec<u8> = sequence.iter().map(|&b| encode_base(b)).collect();
            let reverse = reverse_complement(&forward)?;
            for text in [forward, reverse] {
                text_starts.push(concat.len());
                concat.extend_from_slice(&text);
                concat.push(SEPARATOR);
            }
        }
        let text_count = text_starts.len();

        // Generalized suffix array by direct sorting. Suffixes are compared
        // as raw bytes; the separator sorts below every base, and no two
        // suffixes compare equal because they differ in length.
        let mut suffix_array: Vec<usize> = (0..concat.len()).collect();
        suffix_array.sort_unstable_by(|&a, &b| concat[a..].cmp(&concat[b..]));

        // BWT (cyclic over the whole concatenation) folded directly into the
        // running occurrence table; the BWT bytes themselves are not kept.
        let n = concat.len();
        let mut counts = [0usize; NUM_BASES];
        let mut counts_through = Vec::with_capacity(n);
        for &suffix in &suffix_array {
            let prev = concat[(suffix + n - 1) % n];
            if let Some(b) = base_index(prev) {
                counts[b] += 1;
            }
            counts_through.push(counts);
        }

        let mut bucket_starts = [0usize; NUM_BASES];
        let mut cumulative = text_count;
        for (b, start) in bucket_starts.iter_mut().enumerate() {
            *start = cumulative;
            cumulative += counts[b];
        }

        log::debug!(
            "built dense FMD index: {} texts, {} rows",
            text_count,
            suffix_array.len()
        );

        Ok(Self {
            magic: INDEX_MAGIC,
            version: INDEX_VERSION,
            text_count,
            counts_through,
            bucket_starts,
            suffix_array,
            text_starts,
        })
    }

    /// Serialize the index to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        bincode::serialize_into(BufWriter::new(file), self)
            .map_err(|e| DuplexError::Other(format!("failed to serialize index: {}", e)))?;
        log::debug!("saved index to {}", path.as_ref().display());
        Ok(())
    }

    /// Load an index previously written by [`save_to_file`](Self::save_to_file).
    ///
    /// # Errors
    ///
    /// Fails on I/O problems, malformed data, or a magic/version mismatch.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let index: Self = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| DuplexError::Parse(format!("failed to deserialize index: {}", e)))?;
        if index.magic != INDEX_MAGIC {
            return Err(DuplexError::Parse(format!(
                "not a duplex index file (magic 0x{:016X})",
                index.magic
            )));
        }
        if index.version != INDEX_VERSION {
            return Err(DuplexError::Parse(format!(
                "unsupported index version {} (expected {})",
                index.version, INDEX_VERSION
            )));
        }
        log::debug!("loaded index from {}", path.as_ref().display());
        Ok(index)
    }
}

impl TextIndex for DenseTextIndex {
    fn bwt_len(&self) -> usize {
        self.suffix_array.len()
    }

    fn text_count(&self) -> usize {
        self.text_count
    }

    fn count_before(&self, base: u8) -> usize {
        match base_index(base) {
            Some(b) => self.bucket_starts[b],
            None => 0,
        }
    }

    fn rank(&self, base: u8, i: usize) -> usize {
        let Some(b) = base_index(base) else { return 0 };
        if i == 0 {
            0
        } else {
            self.counts_through[i - 1][b]
        }
    }

    fn locate(&self, sa_index: usize) -> (usize, usize) {
        let position = self.suffix_array[sa_index + self.text_count];
        let text = self.text_starts.partition_point(|&start| start <= position) - 1;
        (text, position - self.text_starts[text])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Indexing "ACGT" yields the two texts ACGT (forward) and ACGT (its own
    // reverse complement), concatenated as "ACGT.ACGT." with separators.
    // The BWT of that collection is T T . . A A C C G G, which the rank
    // checks below are written against.
    fn acgt_index() -> DenseTextIndex {
        DenseTextIndex::from_sequences(&[b"ACGT"]).unwrap()
    }

    #[test]
    fn dimensions() {
        let index = acgt_index();
        assert_eq!(index.bwt_len(), 10);
        assert_eq!(index.text_count(), 2);
    }

    #[test]
    fn bucket_layout() {
        let index = acgt_index();
        assert_eq!(index.count_before(b'A'), 2);
        assert_eq!(index.count_before(b'C'), 4);
        assert_eq!(index.count_before(b'G'), 6);
        assert_eq!(index.count_before(b'N'), 8);
        assert_eq!(index.count_before(b'T'), 8);
        assert_eq!(index.bucket_start(b'A'), 0);
        assert_eq!(index.bucket_start(b'T'), 6);
    }

    #[test]
    fn rank_against_hand_built_bwt() {
        let index = acgt_index();
        // BWT = T T . . A A C C G G
        assert_eq!(index.rank(b'T', 0), 0);
        assert_eq!(index.rank(b'T', 1), 1);
        assert_eq!(index.rank(b'T', 2), 2);
        assert_eq!(index.rank(b'T', 10), 2);
        assert_eq!(index.rank(b'A', 4), 0);
        assert_eq!(index.rank(b'A', 5), 1);
        assert_eq!(index.rank(b'A', 6), 2);
        assert_eq!(index.rank(b'C', 8), 2);
        assert_eq!(index.rank(b'G', 8), 0);
        assert_eq!(index.rank(b'G', 10), 2);
        assert_eq!(index.rank(b'N', 10), 0);
        // separators and junk rank 0 everywhere
        assert_eq!(index.rank(0, 10), 0);
        assert_eq!(index.rank(b'$', 10), 0);
    }

    #[test]
    fn locate_resolves_texts() {
        let index = acgt_index();
        // SA-space row 0 is the reverse-complement text's full suffix
        // ("ACGT." sorts before "ACGT.ACGT." because it is a prefix of it);
        // row 1 is the forward text's.
        assert_eq!(index.locate(0), (1, 0));
        assert_eq!(index.locate(1), (0, 0));
        // The last SA-space row is the "T." suffix of the forward text.
        assert_eq!(index.locate(7), (0, 3));
    }

    #[test]
    fn normalizes_input() {
        let lower = DenseTextIndex::from_sequences(&[b"acgt"]).unwrap();
        let upper = acgt_index();
        assert_eq!(lower.bwt_len(), upper.bwt_len());
        assert_eq!(lower.rank(b'A', 10), upper.rank(b'A', 10));

        // Unknown characters become N.
        let with_n = DenseTextIndex::from_sequences(&[b"AXGT"]).unwrap();
        assert_eq!(with_n.rank(b'N', with_n.bwt_len()), 2);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(DenseTextIndex::from_sequences::<&[u8]>(&[]).is_err());
        assert!(DenseTextIndex::from_sequences(&[b"ACGT" as &[u8], b""]).is_err());
    }

    #[test]
    fn multiple_sequences() {
        let index = DenseTextIndex::from_sequences(&[b"ACCG" as &[u8], b"TTAG"]).unwrap();
        assert_eq!(index.text_count(), 4);
        // 16 bases + 4 separators
        assert_eq!(index.bwt_len(), 20);
    }

    #[test]
    fn save_load_roundtrip() {
        let index = DenseTextIndex::from_sequences(&[b"ACCGTTGA"]).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        index.save_to_file(file.path()).unwrap();
        let loaded = DenseTextIndex::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.bwt_len(), index.bwt_len());
        assert_eq!(loaded.text_count(), index.text_count());
        for &b in b"ACGNT" {
            assert_eq!(loaded.count_before(b), index.count_before(b));
            for i in 0..=index.bwt_len() {
                assert_eq!(loaded.rank(b, i), index.rank(b, i));
            }
        }
        for row in 0..index.bwt_len() - index.text_count() {
            assert_eq!(loaded.locate(row), index.locate(row));
        }
    }

    #[test]
    fn load_rejects_garbage() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not an index").unwrap();
        assert!(DenseTextIndex::load_from_file(file.path()).is_err());
    }
}
