//! Index-to-world transforms for sparse grids.

use glam::{DAffine3, DVec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::bbox::{IndexBBox, WorldBBox};

/// Affine map from voxel index space to world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTransform {
    index_to_world: DAffine3,
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl GridTransform {
    /// Index space equals world space.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            index_to_world: DAffine3::IDENTITY,
        }
    }

    /// Wraps an arbitrary affine map.
    #[must_use]
    pub const fn from_affine(index_to_world: DAffine3) -> Self {
        Self { index_to_world }
    }

    /// Uniform voxel size, no translation.
    #[must_use]
    pub fn from_voxel_size(voxel_size: f64) -> Self {
        Self::from_scale_translation(DVec3::splat(voxel_size), DVec3::ZERO)
    }

    /// Per-axis voxel size followed by a translation.
    #[must_use]
    pub fn from_scale_translation(scale: DVec3, translation: DVec3) -> Self {
        Self::from_affine(DAffine3::from_scale_rotation_translation(
            scale,
            glam::DQuat::IDENTITY,
            translation,
        ))
    }

    /// The underlying affine map.
    #[must_use]
    pub fn affine(&self) -> DAffine3 {
        self.index_to_world
    }

    /// Maps a (possibly fractional) index-space point to world space.
    #[inline]
    #[must_use]
    pub fn index_to_world(&self, ijk: DVec3) -> DVec3 {
        self.index_to_world.transform_point3(ijk)
    }

    /// Maps a world-space point back to index space.
    #[inline]
    #[must_use]
    pub fn world_to_index(&self, p: DVec3) -> DVec3 {
        self.index_to_world.inverse().transform_point3(p)
    }

    /// World-space length of one voxel step along each index axis.
    #[must_use]
    pub fn voxel_size(&self) -> DVec3 {
        DVec3::new(
            self.index_to_world.matrix3.x_axis.length(),
            self.index_to_world.matrix3.y_axis.length(),
            self.index_to_world.matrix3.z_axis.length(),
        )
    }

    /// Axis-aligned world box around the images of the box's eight corners.
    ///
    /// Returns `None` for an empty box.
    #[must_use]
    pub fn index_bbox_to_world(&self, bbox: &IndexBBox) -> Option<WorldBBox> {
        if bbox.is_empty() {
            return None;
        }
        WorldBBox::from_points(
            bbox.corners()
                .iter()
                .map(|c: &IVec3| self.index_to_world(c.as_dvec3())),
        )
    }
}
