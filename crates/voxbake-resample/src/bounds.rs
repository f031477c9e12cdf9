//! Occupied-region lookup for sparse sources.

use glam::IVec3;
use voxbake_core::{
    IndexBBox, Result, SparseSource, VoxbakeError, WorldBBox, FILE_BBOX_MAX, FILE_BBOX_MIN,
};

/// The occupied region of a source in both index and world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBounds {
    /// Inclusive index-space box.
    pub index: IndexBBox,
    /// World-space image of `index` under the source transform.
    pub world: WorldBBox,
}

/// Reads the `file_bbox_min`/`file_bbox_max` metadata of `source` and maps
/// the box to world space.
///
/// Absent corners, corners of the wrong type, unset sentinels
/// (`i32::MAX` in the minimum, `i32::MIN` in the maximum), inverted axes
/// and failing metadata lookups all yield
/// [`VoxbakeError::MissingOrDegenerateBounds`].
pub fn resolve_bounds<S: SparseSource + ?Sized>(source: &S) -> Result<ResolvedBounds> {
    let missing = || VoxbakeError::MissingOrDegenerateBounds {
        grid: source.name().to_string(),
    };

    let min = read_corner(source, FILE_BBOX_MIN).ok_or_else(missing)?;
    if min.cmpeq(IVec3::splat(i32::MAX)).any() {
        log::warn!("grid '{}': {FILE_BBOX_MIN} is unset", source.name());
        return Err(missing());
    }
    let max = read_corner(source, FILE_BBOX_MAX).ok_or_else(missing)?;
    if max.cmpeq(IVec3::splat(i32::MIN)).any() {
        log::warn!("grid '{}': {FILE_BBOX_MAX} is unset", source.name());
        return Err(missing());
    }

    let index = IndexBBox::new(min, max);
    let world = source
        .transform()
        .index_bbox_to_world(&index)
        .ok_or_else(missing)?;
    log::debug!(
        "grid '{}': index bbox {:?}..{:?}, world extents {:?}",
        source.name(),
        index.min,
        index.max,
        world.extents()
    );
    Ok(ResolvedBounds { index, world })
}

fn read_corner<S: SparseSource + ?Sized>(source: &S, key: &str) -> Option<IVec3> {
    match source.metadata(key) {
        Ok(Some(value)) => {
            let corner = value.as_vec3i();
            if corner.is_none() {
                log::warn!(
                    "grid '{}': {key} is {}, expected vec3i",
                    source.name(),
                    value.type_name()
                );
            }
            corner
        }
        Ok(None) => {
            log::warn!("grid '{}': {key} is missing", source.name());
            None
        }
        Err(err) => {
            log::warn!("grid '{}': reading {key} failed: {err}", source.name());
            None
        }
    }
}
