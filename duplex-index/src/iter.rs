//! Depth-limited iteration over the suffix tree of an FMD-index.
//!
//! [`SuffixTreeIter`] walks the tree of row prefixes depth-first, yielding
//! every pattern of the requested depth together with its SA-space
//! [`BiInterval`], in lexicographic order. The walk keeps a flat stack of
//! `(interval, next base)` frames and one shared pattern buffer, so
//! descending a level allocates nothing.

use crate::alphabet::{ALPHABETICAL_BASES, NUM_BASES};
use crate::fmd::FmdIndex;
use crate::index::TextIndex;
use crate::interval::BiInterval;

/// One level of the depth-first walk.
#[derive(Debug, Clone, Copy)]
struct Frame {
    bi: BiInterval,
    /// Next entry of [`ALPHABETICAL_BASES`] to try from this level.
    next_base: usize,
    /// Whether any base extension from this level succeeded.
    descended: bool,
}

/// Iterator over `(pattern, SA-space interval)` pairs of the suffix tree at
/// a fixed depth. Created by
/// [`FmdIndex::suffix_patterns`](crate::FmdIndex::suffix_patterns).
///
/// Patterns come out in strict lexicographic order. When dead-end reporting
/// is on, a shorter pattern is yielded whenever every one of its base
/// extensions is empty, which means all its occurrences run into an end of
/// text; the reverse range of such a yield must not be dereferenced.
pub struct SuffixTreeIter<'a, I: TextIndex> {
    fmd: &'a FmdIndex<I>,
    depth: usize,
    report_dead_ends: bool,
    stack: Vec<Frame>,
    pattern: Vec<u8>,
}

impl<'a, I: TextIndex> SuffixTreeIter<'a, I> {
    pub(crate) fn new(fmd: &'a FmdIndex<I>, depth: usize, report_dead_ends: bool) -> Self {
        let root = Frame {
            bi: fmd.whole_sa(),
            next_base: 0,
            descended: false,
        };
        Self {
            fmd,
            depth,
            report_dead_ends,
            stack: vec![root],
            pattern: Vec::with_capacity(depth),
        }
    }
}

impl<'a, I: TextIndex> Iterator for SuffixTreeIter<'a, I> {
    type Item = (Vec<u8>, BiInterval);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.len().checked_sub(1)?;

            // A frame at the target depth is a yield; pop it so the next
            // call resumes the walk underneath.
            if level == self.depth {
                let frame = self.stack.pop()?;
                let item = (self.pattern.clone(), self.fmd.to_sa_space(frame.bi));
                self.pattern.pop();
                return Some(item);
            }

            let frame = self.stack[level];
            if frame.next_base < NUM_BASES {
                self.stack[level].next_base += 1;
                let base = ALPHABETICAL_BASES[frame.next_base];
                let child = self.fmd.extend(frame.bi, base, false);
                if !child.is_empty() {
                    self.stack[level].descended = true;
                    self.stack.push(Frame {
                        bi: child,
                        next_base: 0,
                        descended: false,
                    });
                    self.pattern.push(base);
                }
                continue;
            }

            // Every base from this level has been tried. A level that never
            // descended has all its occurrences against an end of text.
            self.stack.pop();
            let dead_end = self.report_dead_ends && !frame.descended && level > 0;
            let item =
                dead_end.then(|| (self.pattern.clone(), self.fmd.to_sa_space(frame.bi)));
            if level > 0 {
                self.pattern.pop();
            }
            if item.is_some() {
                return item;
            }
        }
    }
}
