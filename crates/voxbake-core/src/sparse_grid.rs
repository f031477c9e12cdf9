//! An in-memory sparse scalar grid.

use std::collections::{BTreeMap, HashMap};

use glam::{DAffine3, DVec3, IVec3};

use crate::bbox::IndexBBox;
use crate::error::Result;
use crate::source::{MetaValue, SparseSource, FILE_BBOX_MAX, FILE_BBOX_MIN};
use crate::transform::GridTransform;

/// A sparse float grid: active voxels over a constant background.
///
/// Sampling is trilinear over the eight voxels surrounding the index-space
/// image of the query point; inactive voxels read as the background.
#[derive(Debug, Clone)]
pub struct SparseGrid {
    name: String,
    background: f32,
    voxels: HashMap<IVec3, f32>,
    transform: GridTransform,
    world_to_index: DAffine3,
    metadata: BTreeMap<String, MetaValue>,
}

impl SparseGrid {
    /// Creates an empty grid with an identity transform.
    pub fn new(name: impl Into<String>, background: f32) -> Self {
        Self {
            name: name.into(),
            background,
            voxels: HashMap::new(),
            transform: GridTransform::identity(),
            world_to_index: DAffine3::IDENTITY,
            metadata: BTreeMap::new(),
        }
    }

    /// Replaces the index-to-world transform.
    #[must_use]
    pub fn with_transform(mut self, transform: GridTransform) -> Self {
        self.set_transform(transform);
        self
    }

    /// Replaces the index-to-world transform.
    pub fn set_transform(&mut self, transform: GridTransform) -> &mut Self {
        self.transform = transform;
        self.world_to_index = transform.affine().inverse();
        self
    }

    /// Returns the background value.
    #[must_use]
    pub fn background(&self) -> f32 {
        self.background
    }

    /// Activates a voxel.
    pub fn set_value(&mut self, ijk: IVec3, value: f32) -> &mut Self {
        self.voxels.insert(ijk, value);
        self
    }

    /// Deactivates a voxel, returning its previous value.
    pub fn remove_value(&mut self, ijk: IVec3) -> Option<f32> {
        self.voxels.remove(&ijk)
    }

    /// Value at a voxel, or the background if it is inactive.
    #[must_use]
    pub fn value(&self, ijk: IVec3) -> f32 {
        self.voxels.get(&ijk).copied().unwrap_or(self.background)
    }

    /// Iterates over active voxels in no particular order.
    pub fn active_voxels(&self) -> impl Iterator<Item = (IVec3, f32)> + '_ {
        self.voxels.iter().map(|(ijk, v)| (*ijk, *v))
    }

    /// Number of active voxels.
    #[must_use]
    pub fn active_voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Tight index-space box around the active voxels.
    #[must_use]
    pub fn active_bbox(&self) -> IndexBBox {
        let mut bbox = IndexBBox::empty();
        for ijk in self.voxels.keys() {
            bbox.expand(*ijk);
        }
        bbox
    }

    /// Sets a metadata entry.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: MetaValue) -> &mut Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Removes a metadata entry.
    pub fn remove_metadata(&mut self, key: &str) -> Option<MetaValue> {
        self.metadata.remove(key)
    }

    /// Iterates over metadata entries in key order.
    pub fn metadata_entries(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.metadata.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records the active bounding box in the `file_bbox_*` metadata.
    ///
    /// An empty grid gets the unset sentinels (`i32::MAX` / `i32::MIN`).
    pub fn update_file_bbox_metadata(&mut self) -> &mut Self {
        let bbox = self.active_bbox();
        self.set_metadata(FILE_BBOX_MIN, MetaValue::Vec3i(bbox.min));
        self.set_metadata(FILE_BBOX_MAX, MetaValue::Vec3i(bbox.max));
        self
    }

    /// Trilinear sample at a fractional index-space position.
    #[must_use]
    pub fn sample_index(&self, ijk: DVec3) -> f32 {
        let base = ijk.floor();
        if !base.is_finite()
            || base.min_element() < f64::from(i32::MIN)
            || base.max_element() >= f64::from(i32::MAX)
        {
            return self.background;
        }
        let t = (ijk - base).as_vec3();
        let i0 = base.as_ivec3();

        let corner = |dx: i32, dy: i32, dz: i32| self.value(i0 + IVec3::new(dx, dy, dz));
        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;

        let c00 = lerp(corner(0, 0, 0), corner(1, 0, 0), t.x);
        let c10 = lerp(corner(0, 1, 0), corner(1, 1, 0), t.x);
        let c01 = lerp(corner(0, 0, 1), corner(1, 0, 1), t.x);
        let c11 = lerp(corner(0, 1, 1), corner(1, 1, 1), t.x);

        let c0 = lerp(c00, c10, t.y);
        let c1 = lerp(c01, c11, t.y);
        lerp(c0, c1, t.z)
    }
}

impl SparseSource for SparseGrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self, key: &str) -> Result<Option<MetaValue>> {
        Ok(self.metadata.get(key).cloned())
    }

    fn transform(&self) -> &GridTransform {
        &self.transform
    }

    fn sample_world(&self, p: DVec3) -> f32 {
        self.sample_index(self.world_to_index.transform_point3(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> SparseGrid {
        let mut grid = SparseGrid::new("ramp", 0.0);
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    grid.set_value(IVec3::new(x, y, z), x as f32);
                }
            }
        }
        grid
    }

    #[test]
    fn test_inactive_reads_background() {
        let grid = SparseGrid::new("empty", -1.0);
        assert_eq!(grid.value(IVec3::new(3, 4, 5)), -1.0);
        assert_eq!(grid.sample_world(DVec3::splat(0.5)), -1.0);
        assert!(grid.active_bbox().is_empty());
    }

    #[test]
    fn test_sample_at_voxel_is_exact() {
        let mut grid = SparseGrid::new("g", 0.0);
        grid.set_value(IVec3::new(2, 3, 4), 7.5);
        assert_eq!(grid.sample_index(DVec3::new(2.0, 3.0, 4.0)), 7.5);
    }

    #[test]
    fn test_trilinear_midpoint() {
        let grid = ramp_grid();
        assert!((grid.sample_index(DVec3::new(0.5, 0.5, 0.5)) - 0.5).abs() < 1e-6);
        assert!((grid.sample_index(DVec3::new(0.25, 0.0, 0.0)) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_world_sample_uses_transform() {
        let grid = ramp_grid().with_transform(GridTransform::from_voxel_size(2.0));
        // world x = 1.0 is index x = 0.5
        assert!((grid.sample_world(DVec3::new(1.0, 0.0, 0.0)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_position_reads_background() {
        let grid = ramp_grid();
        assert_eq!(grid.sample_index(DVec3::new(f64::NAN, 0.0, 0.0)), 0.0);
        assert_eq!(grid.sample_index(DVec3::splat(1.0e12)), 0.0);
    }

    #[test]
    fn test_file_bbox_metadata() {
        let mut grid = ramp_grid();
        grid.update_file_bbox_metadata();
        assert_eq!(
            grid.metadata(FILE_BBOX_MIN).unwrap(),
            Some(MetaValue::Vec3i(IVec3::ZERO))
        );
        assert_eq!(
            grid.metadata(FILE_BBOX_MAX).unwrap(),
            Some(MetaValue::Vec3i(IVec3::ONE))
        );

        let mut empty = SparseGrid::new("empty", 0.0);
        empty.update_file_bbox_metadata();
        assert_eq!(
            empty.metadata(FILE_BBOX_MIN).unwrap(),
            Some(MetaValue::Vec3i(IVec3::MAX))
        );
    }
}
