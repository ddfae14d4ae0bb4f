use chrono::{DateTime, Utc};

/// A half-open `[start, end)` span of time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Creates a new `Interval` if `start` is before `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Whether the two intervals share any instant.
    ///
    /// Touching intervals (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Finds the first pair of entries that share a key and overlap in time.
///
/// Compares every pair once, so this is quadratic in the number of entries.
///
/// # Returns
/// The indices `(i, j)` with `i < j` of the first conflicting pair, if any
pub fn first_overlap<K: PartialEq>(entries: &[(K, Interval)]) -> Option<(usize, usize)> {
    for (i, (key_a, a)) in entries.iter().enumerate() {
        for (j, (key_b, b)) in entries.iter().enumerate().skip(i + 1) {
            if key_a == key_b && a.overlaps(b) {
                return Some((i, j));
            }
        }
    }

    None
}
