//! Counters for the mapping fast path.
//!
//! Mapping a whole query alternates between cheap carry-over extensions and
//! full restarts of the backward search; the ratio between the two is the
//! signal callers sample to judge how well the carry-over optimization is
//! doing. Counters are per index instance and atomic, so concurrent mapping
//! over the same index never loses an update.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the mapping counters returned by
/// [`FmdIndex::stats`](crate::FmdIndex::stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCounts {
    /// Extension steps issued by mapping code since the last snapshot.
    pub extends: u64,
    /// Fresh backward searches started since the last snapshot.
    pub restarts: u64,
}

/// Per-instance mapping counters.
#[derive(Debug, Default)]
pub struct SearchStats {
    extends: AtomicU64,
    restarts: AtomicU64,
}

impl SearchStats {
    pub(crate) fn record_extend(&self) {
        self.extends.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_restart(&self) {
        self.restarts.fetch_add(1, Ordering::Relaxed);
    }

    /// Read both counters and reset them to zero in one atomic swap each.
    pub(crate) fn take(&self) -> SearchCounts {
        SearchCounts {
            extends: self.extends.swap(0, Ordering::Relaxed),
            restarts: self.restarts.swap(0, Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_resets() {
        let stats = SearchStats::default();
        stats.record_extend();
        stats.record_extend();
        stats.record_restart();
        assert_eq!(
            stats.take(),
            SearchCounts {
                extends: 2,
                restarts: 1
            }
        );
        assert_eq!(
            stats.take(),
            SearchCounts {
                extends: 0,
                restarts: 0
            }
        );
    }
}
