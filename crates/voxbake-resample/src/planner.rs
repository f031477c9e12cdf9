//! Target lattice sizing.

use glam::UVec3;
use voxbake_core::{lattice_len, IndexBBox, ResolutionPolicy, Result, VoxbakeError};

/// RGBA is the widest layout the engine emits.
const MAX_CHANNELS: usize = 4;

/// Computes the target lattice extents for `bounds` under `policy`.
///
/// For [`ResolutionPolicy::Scaled`] each axis gets
/// `ceil(index_axis_length * s)` voxels, where the axis length is inclusive
/// (`max - min + 1`). An empty box, a zero axis, or a lattice whose RGBA
/// byte size overflows `usize` is a [`VoxbakeError::DimensionOverflow`].
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn plan_resolution(bounds: &IndexBBox, policy: ResolutionPolicy) -> Result<UVec3> {
    let extents = match policy {
        ResolutionPolicy::Fixed(extents) => extents,
        ResolutionPolicy::Scaled(scale) => {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(VoxbakeError::InvalidScale(scale));
            }
            if bounds.is_empty() {
                return Err(VoxbakeError::DimensionOverflow(UVec3::ZERO));
            }
            let dim = bounds.dim();
            let axis = |length: u64| -> Result<u32> {
                let voxels = (length as f64 * scale).ceil();
                if voxels > f64::from(u32::MAX) {
                    return Err(VoxbakeError::DimensionOverflow(UVec3::splat(u32::MAX)));
                }
                Ok(voxels as u32)
            };
            UVec3::new(axis(dim.x)?, axis(dim.y)?, axis(dim.z)?)
        }
    };

    if extents.min_element() == 0 || lattice_len(extents, MAX_CHANNELS).is_none() {
        return Err(VoxbakeError::DimensionOverflow(extents));
    }
    log::debug!("planned lattice {extents} for {policy:?}");
    Ok(extents)
}
