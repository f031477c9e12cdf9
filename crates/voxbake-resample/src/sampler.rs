//! Parallel lattice sampling.
//!
//! The lattice is split into contiguous runs of linear indices, one run per
//! rayon task. Each task writes only its own run of the output and keeps
//! its own [`ValueRange`]; the ranges are folded with
//! [`ValueRange::merge`] after every task has joined.

#![allow(clippy::cast_precision_loss)]

use glam::{DVec3, UVec3};
use rayon::prelude::*;
use voxbake_core::{lattice_len, Result, SparseSource, ValueRange, VoxbakeError, WorldBBox};

/// Raw samples of one source over a lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledField {
    /// Lattice extents.
    pub extents: UVec3,
    /// Samples at linear index `x + y*w + z*w*h`.
    pub values: Vec<f32>,
    /// Range of all samples.
    pub range: ValueRange,
}

/// World-space position of the center of lattice cell `cell`.
#[inline]
#[must_use]
pub fn cell_center(cell: UVec3, extents: UVec3, domain: &WorldBBox) -> DVec3 {
    let normalized = (cell.as_dvec3() + 0.5) / extents.as_dvec3();
    domain.lerp(normalized)
}

/// Samples `source` at every cell center of an `extents` lattice spanning
/// `domain`.
pub fn sample_lattice<S: SparseSource + ?Sized>(
    source: &S,
    extents: UVec3,
    domain: &WorldBBox,
    cells_per_task: Option<usize>,
) -> Result<SampledField> {
    sample_with(extents, domain, cells_per_task, |p| source.sample_world(p))
}

/// Evaluates `sample` at every cell center of an `extents` lattice spanning
/// `domain`.
///
/// `cells_per_task` sets how many consecutive cells one task handles
/// (`None` = one z-slice). The output does not depend on it.
pub fn sample_with<F>(
    extents: UVec3,
    domain: &WorldBBox,
    cells_per_task: Option<usize>,
    sample: F,
) -> Result<SampledField>
where
    F: Fn(DVec3) -> f32 + Sync,
{
    let len = lattice_len(extents, 1)
        .filter(|&n| n > 0)
        .ok_or(VoxbakeError::DimensionOverflow(extents))?;
    let w = extents.x as usize;
    let h = extents.y as usize;
    let chunk = cells_per_task.unwrap_or(w * h).max(1);
    log::debug!(
        "sampling {extents} lattice in {} tasks of {chunk} cells",
        len.div_ceil(chunk)
    );

    let mut values = vec![0.0_f32; len];
    let range = values
        .par_chunks_mut(chunk)
        .enumerate()
        .map(|(task, cells)| {
            let mut local = ValueRange::new();
            let start = task * chunk;
            for (offset, out) in cells.iter_mut().enumerate() {
                let index = start + offset;
                #[allow(clippy::cast_possible_truncation)]
                let cell = UVec3::new(
                    (index % w) as u32,
                    ((index / w) % h) as u32,
                    (index / (w * h)) as u32,
                );
                let value = sample(cell_center(cell, extents, domain));
                *out = value;
                local.add_value(value);
            }
            local
        })
        .reduce(ValueRange::new, ValueRange::merge);

    Ok(SampledField {
        extents,
        values,
        range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_domain() -> WorldBBox {
        WorldBBox::new(DVec3::ZERO, DVec3::ONE)
    }

    fn wavy(p: DVec3) -> f32 {
        #[allow(clippy::cast_possible_truncation)]
        let v = ((p.x * 7.3).sin() + p.y * p.z * 3.1 - (p.z * 2.0).cos()) as f32;
        v
    }

    #[test]
    fn test_cell_centers() {
        let domain = WorldBBox::new(DVec3::new(-1.0, 0.0, 2.0), DVec3::new(1.0, 4.0, 3.0));
        let extents = UVec3::new(2, 4, 1);
        assert_eq!(
            cell_center(UVec3::ZERO, extents, &domain),
            DVec3::new(-0.5, 0.5, 2.5)
        );
        assert_eq!(
            cell_center(UVec3::new(1, 3, 0), extents, &domain),
            DVec3::new(0.5, 3.5, 2.5)
        );
    }

    #[test]
    fn test_linear_layout() {
        let extents = UVec3::new(3, 2, 2);
        let field = sample_with(extents, &unit_domain(), None, |p| {
            // encode the cell index back out of the center position
            #[allow(clippy::cast_possible_truncation)]
            let v = ((p.x * 3.0).floor() + (p.y * 2.0).floor() * 10.0 + (p.z * 2.0).floor() * 100.0) as f32;
            v
        })
        .unwrap();
        assert_eq!(field.values.len(), 12);
        assert_eq!(field.values[1], 1.0);
        assert_eq!(field.values[3], 10.0);
        assert_eq!(field.values[6], 100.0);
        assert_eq!(field.values[11], 112.0);
        assert_eq!(field.range.bounds(), Some((0.0, 112.0)));
    }

    #[test]
    fn test_zero_extent_fails() {
        let result = sample_with(UVec3::new(0, 1, 1), &unit_domain(), None, |_| 0.0);
        assert!(matches!(result, Err(VoxbakeError::DimensionOverflow(_))));
    }

    #[test]
    fn test_constant_field_range_is_degenerate() {
        let field = sample_with(UVec3::splat(4), &unit_domain(), Some(5), |_| 2.5).unwrap();
        assert!(field.range.is_degenerate());
        assert!(field.values.iter().all(|&v| v == 2.5));
    }

    proptest! {
        #[test]
        fn partitioning_does_not_change_output(
            extents in prop::array::uniform3(1u32..9),
            chunk in 1usize..80,
        ) {
            let extents = UVec3::from_array(extents);
            let domain = WorldBBox::new(DVec3::new(-2.0, 0.5, 1.0), DVec3::new(3.0, 2.0, 4.0));
            let reference = sample_with(extents, &domain, None, wavy).unwrap();
            let split = sample_with(extents, &domain, Some(chunk), wavy).unwrap();

            let bits = |values: &[f32]| values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
            prop_assert_eq!(bits(&reference.values), bits(&split.values));
            prop_assert_eq!(reference.range, split.range);

            let flat: ValueRange = reference.values.iter().copied().collect();
            prop_assert_eq!(flat, reference.range);
        }
    }
}
