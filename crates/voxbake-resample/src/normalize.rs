//! Value remapping to `[0, 1]`.

use rayon::prelude::*;
use voxbake_core::{DegenerateRangePolicy, Result, ValueRange, VoxbakeError};

/// Remaps every value from `[range.min, range.max]` to `[0, 1]` in place.
///
/// This is a one-shot remap: running it again with the range of the
/// output only reproduces the input when that range is exactly `[0, 1]`.
/// A constant field (`min == max`) is mapped through `policy` instead of
/// dividing by zero, and so is a field with an infinite sample, which has
/// no finite span to remap. An empty range is an error.
pub fn normalize_in_place(
    values: &mut [f32],
    range: &ValueRange,
    policy: DegenerateRangePolicy,
) -> Result<()> {
    if range.is_empty() {
        return Err(VoxbakeError::EmptyValueRange);
    }
    if range.is_degenerate() {
        log::warn!(
            "constant field {:?}: remapping {} values with {policy:?}",
            range.bounds(),
            values.len()
        );
        values.par_iter_mut().for_each(|v| *v = policy.resolve(*v));
        return Ok(());
    }
    if !range.is_finite() {
        log::warn!(
            "non-finite range {:?}: remapping {} values with {policy:?}",
            range.bounds(),
            values.len()
        );
        values.par_iter_mut().for_each(|v| *v = policy.resolve(*v));
        return Ok(());
    }
    values.par_iter_mut().for_each(|v| *v = range.unlerp(*v));
    Ok(())
}
