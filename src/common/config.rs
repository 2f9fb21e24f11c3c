//! Configuration for the B-tree index.

use std::fmt;

use crate::common::{Error, Result};

/// Smallest legal minimum degree.
///
/// With `t = 2` every node holds 1 to 3 keys (a 2-3-4 tree). Anything smaller
/// cannot be split around a median.
pub const MIN_DEGREE: usize = 2;

/// Largest legal minimum degree.
///
/// Keeps `2t - 1` representable as a `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Degree used by [`Degree::DEFAULT`] and `BTreeIndex::default()`.
pub const DEFAULT_DEGREE: usize = 2;

/// The minimum degree `t` of a B-tree.
///
/// Fixes the capacity bounds of every node in one tree:
/// - max keys per node: `2t - 1`
/// - min keys per non-root node: `t - 1`
///
/// A `Degree` is validated once at construction and then carried by value,
/// so node operations never re-check it.
///
/// # Example
/// ```
/// use btindex::Degree;
///
/// let t = Degree::new(3).unwrap();
/// assert_eq!(t.max_keys(), 5);
/// assert_eq!(t.min_keys(), 2);
/// assert!(Degree::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Degree(usize);

impl Degree {
    /// The default degree (`t = 2`).
    pub const DEFAULT: Degree = Degree(DEFAULT_DEGREE);

    /// Validate and wrap a minimum degree.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `t` is outside `MIN_DEGREE..=MAX_DEGREE`
    pub fn new(t: usize) -> Result<Self> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&t) {
            return Err(Error::InvalidDegree {
                degree: t,
                min: MIN_DEGREE,
                max: MAX_DEGREE,
            });
        }
        Ok(Degree(t))
    }

    /// The raw value of `t`.
    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Maximum keys a node may hold (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.0 - 1
    }

    /// Minimum keys a non-root node must hold (`t - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.0 - 1
    }
}

impl Default for Degree {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
