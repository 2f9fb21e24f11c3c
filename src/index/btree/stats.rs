//! Structural operation statistics.

use std::fmt;

/// Counters for the restructuring work the index has done.
///
/// Each counter is bumped once per node-level event. Useful for checking that
/// a workload actually exercised a given rebalancing path.
///
/// # Example
/// ```
/// use btindex::BTreeIndex;
///
/// let mut index = BTreeIndex::new(2).unwrap();
/// for k in 0..4 {
///     index.insert(k, ()).unwrap();
/// }
/// let stats = index.stats();
/// assert_eq!(stats.root_grows, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Full nodes split around their median (root splits included).
    pub splits: u64,

    /// Sibling pairs merged with their parent separator.
    pub merges: u64,

    /// Keys rotated from a left sibling into an underfull child.
    pub borrows_left: u64,

    /// Keys rotated from a right sibling into an underfull child.
    pub borrows_right: u64,

    /// Times the tree gained a level.
    pub root_grows: u64,

    /// Times the tree lost a level.
    pub root_shrinks: u64,
}

impl IndexStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total borrows in either direction.
    pub fn borrows(&self) -> u64 {
        self.borrows_left + self.borrows_right
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, borrows: {} (left: {}, right: {}), root_grows: {}, root_shrinks: {} }}",
            self.splits,
            self.merges,
            self.borrows(),
            self.borrows_left,
            self.borrows_right,
            self.root_grows,
            self.root_shrinks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = IndexStats::new();
        assert_eq!(stats.splits, 0);
        assert_eq!(stats.borrows(), 0);
    }

    #[test]
    fn test_stats_borrows() {
        let stats = IndexStats {
            borrows_left: 3,
            borrows_right: 4,
            ..IndexStats::new()
        };
        assert_eq!(stats.borrows(), 7);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = IndexStats {
            splits: 10,
            merges: 2,
            ..IndexStats::new()
        };

        stats.reset();

        assert_eq!(stats, IndexStats::new());
    }

    #[test]
    fn test_stats_display() {
        let stats = IndexStats {
            splits: 5,
            merges: 1,
            borrows_left: 2,
            borrows_right: 0,
            root_grows: 2,
            root_shrinks: 1,
        };

        let display = format!("{}", stats);
        assert!(display.contains("splits: 5"));
        assert!(display.contains("borrows: 2 (left: 2, right: 0)"));
        assert!(display.contains("root_shrinks: 1"));
    }
}
