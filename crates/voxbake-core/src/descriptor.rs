//! Summary of a loaded volume.

use glam::{DVec3, UVec3};
use serde::{Deserialize, Serialize};

use crate::buffer::ChannelLayout;
use crate::value_range::ValueRange;

/// Best-effort summary of a load.
///
/// Fields the producing loader did not compute stay at zero: the raw loader
/// knows no value range or physical scale, and a descriptor computed
/// without sampling has no value range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeDescriptor {
    pub voxel_count: u64,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub format: ChannelLayout,
    /// Minimum raw sample before normalization.
    pub min_value: f32,
    /// Maximum raw sample before normalization.
    pub max_value: f32,
    /// World-space extent along x.
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
}

impl VolumeDescriptor {
    /// Creates a descriptor holding only extents and format.
    #[must_use]
    pub fn new(extents: UVec3, format: ChannelLayout) -> Self {
        Self {
            voxel_count: u64::from(extents.x) * u64::from(extents.y) * u64::from(extents.z),
            width: extents.x,
            height: extents.y,
            depth: extents.z,
            format,
            ..Self::default()
        }
    }

    /// Records the raw value range; an empty range leaves the fields at zero.
    #[must_use]
    pub fn with_value_range(mut self, range: &ValueRange) -> Self {
        let (min, max) = range.bounds().unwrap_or((0.0, 0.0));
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Records the world-space extents.
    #[must_use]
    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.x_scale = scale.x;
        self.y_scale = scale.y;
        self.z_scale = scale.z;
        self
    }

    /// Lattice extents.
    #[must_use]
    pub fn extents(&self) -> UVec3 {
        UVec3::new(self.width, self.height, self.depth)
    }

    /// World-space extents.
    #[must_use]
    pub fn scale(&self) -> DVec3 {
        DVec3::new(self.x_scale, self.y_scale, self.z_scale)
    }
}
