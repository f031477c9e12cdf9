//! Min/max accumulator over sampled scalar values.

/// A reducible `[min, max]` accumulator.
///
/// A fresh range starts at the `(+inf, -inf)` sentinel so the first
/// [`add_value`](Self::add_value) always narrows it. [`merge`](Self::merge)
/// is associative and commutative, which lets per-worker ranges be folded
/// in any order after a join.
///
/// NaN samples are ignored: `f32::min`/`f32::max` prefer the non-NaN operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f32,
    max: f32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueRange {
    /// Creates an empty range.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    /// Creates a range spanning `[min, max]`.
    #[must_use]
    pub fn from_bounds(min: f32, max: f32) -> Self {
        let mut range = Self::new();
        range.add_value(min);
        range.add_value(max);
        range
    }

    /// Widens the range to include `value`.
    #[inline]
    pub fn add_value(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Returns the union of two ranges.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns true if no value has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns true if the range holds a single distinct value.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.is_empty() && self.min == self.max
    }

    /// Returns `(min, max)`, or `None` for an empty range.
    #[must_use]
    pub fn bounds(&self) -> Option<(f32, f32)> {
        (!self.is_empty()).then_some((self.min, self.max))
    }

    /// Returns true if both ends are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Maps `value` linearly from `[min, max]` to `[0, 1]`.
    ///
    /// Evaluated in `f64`, so spans wider than `f32::MAX` stay finite.
    /// Callers must rule out empty, degenerate and non-finite ranges first.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn unlerp(&self, value: f32) -> f32 {
        let min = f64::from(self.min);
        ((f64::from(value) - min) / (f64::from(self.max) - min)) as f32
    }
}

impl FromIterator<f32> for ValueRange {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        let mut range = Self::new();
        for value in iter {
            range.add_value(value);
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlerp_wide_span() {
        let range = ValueRange::from_bounds(-3e38, 3e38);
        assert!(range.is_finite());
        assert_eq!(range.unlerp(-3e38), 0.0);
        assert_eq!(range.unlerp(0.0), 0.5);
        assert_eq!(range.unlerp(3e38), 1.0);
    }

    #[test]
    fn test_infinite_ends() {
        let range: ValueRange = [1.0, f32::INFINITY].into_iter().collect();
        assert!(!range.is_finite());
        assert!(!range.is_degenerate());
    }
    use proptest::prelude::*;

    /// Merges `ranges` as a binary tree whose split points come from `splits`.
    fn tree_merge(ranges: &[ValueRange], splits: &[usize], depth: usize) -> ValueRange {
        match ranges.len() {
            0 => ValueRange::new(),
            1 => ranges[0],
            n => {
                let seed = splits.get(depth % splits.len().max(1)).copied().unwrap_or(0);
                let mid = 1 + seed % (n - 1);
                let (left, right) = ranges.split_at(mid);
                tree_merge(right, splits, depth + 1).merge(tree_merge(left, splits, depth + 1))
            }
        }
    }

    #[test]
    fn test_new_range_is_empty() {
        let range = ValueRange::new();
        assert!(range.is_empty());
        assert!(!range.is_degenerate());
        assert_eq!(range.bounds(), None);
    }

    #[test]
    fn test_first_value_narrows() {
        let mut range = ValueRange::new();
        range.add_value(-3.5);
        assert_eq!(range.bounds(), Some((-3.5, -3.5)));
        assert!(range.is_degenerate());
        range.add_value(2.0);
        assert_eq!(range.bounds(), Some((-3.5, 2.0)));
    }

    #[test]
    fn test_negative_only_values() {
        // A zero-initialized max would hide all-negative fields.
        let range: ValueRange = [-5.0, -2.0, -9.0].into_iter().collect();
        assert_eq!(range.bounds(), Some((-9.0, -2.0)));
    }

    #[test]
    fn test_nan_is_ignored() {
        let range: ValueRange = [1.0, f32::NAN, 4.0].into_iter().collect();
        assert_eq!(range.bounds(), Some((1.0, 4.0)));
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let range = ValueRange::from_bounds(0.25, 0.75);
        assert_eq!(range.merge(ValueRange::new()), range);
        assert_eq!(ValueRange::new().merge(range), range);
    }

    #[test]
    fn test_unlerp() {
        let range = ValueRange::from_bounds(2.0, 6.0);
        assert_eq!(range.unlerp(2.0), 0.0);
        assert_eq!(range.unlerp(4.0), 0.5);
        assert_eq!(range.unlerp(6.0), 1.0);
    }

    proptest! {
        #[test]
        fn merge_order_does_not_matter(
            chunks in prop::collection::vec(
                prop::collection::vec(-1.0e6f32..1.0e6, 0..16), 1..24),
            splits in prop::collection::vec(any::<usize>(), 1..32),
        ) {
            let ranges: Vec<ValueRange> = chunks
                .iter()
                .map(|chunk| chunk.iter().copied().collect())
                .collect();
            let sequential = ranges
                .iter()
                .fold(ValueRange::new(), |acc, r| acc.merge(*r));
            let flat: ValueRange = chunks.iter().flatten().copied().collect();

            prop_assert_eq!(sequential, flat);
            prop_assert_eq!(tree_merge(&ranges, &splits, 0), sequential);

            let reversed = ranges
                .iter()
                .rev()
                .fold(ValueRange::new(), |acc, r| r.merge(acc));
            prop_assert_eq!(reversed, sequential);
        }

        #[test]
        fn min_never_exceeds_max(values in prop::collection::vec(-1.0e6f32..1.0e6, 1..64)) {
            let range: ValueRange = values.iter().copied().collect();
            let (min, max) = range.bounds().unwrap();
            prop_assert!(min <= max);
        }
    }
}
