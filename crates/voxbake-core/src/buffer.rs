//! Dense, GPU-ready voxel buffers.

use std::fmt;

use glam::UVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxbakeError};

/// Byte layout of a single voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChannelLayout {
    /// One byte per voxel.
    Alpha8,
    /// Four interleaved bytes per voxel, in R, G, B, A order.
    #[default]
    Rgba8,
}

impl ChannelLayout {
    /// Number of bytes per voxel.
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Alpha8 => 1,
            Self::Rgba8 => 4,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha8 => f.write_str("alpha8"),
            Self::Rgba8 => f.write_str("rgba8"),
        }
    }
}

/// Number of voxels in a lattice, or `None` if the byte size would not fit
/// in `usize` for `channels` bytes per voxel.
#[must_use]
pub fn lattice_len(extents: UVec3, channels: usize) -> Option<usize> {
    (extents.x as usize)
        .checked_mul(extents.y as usize)?
        .checked_mul(extents.z as usize)
        .filter(|n| n.checked_mul(channels).is_some())
}

/// A dense voxel buffer: extents, layout and owned bytes.
///
/// Voxel `(x, y, z)` starts at byte `(x + y*w + z*w*h) * channels`.
#[derive(Clone, PartialEq, Eq)]
pub struct DenseVolumeBuffer {
    extents: UVec3,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl DenseVolumeBuffer {
    /// Wraps `data`, checking its length against the extents and layout.
    pub fn new(extents: UVec3, layout: ChannelLayout, data: Vec<u8>) -> Result<Self> {
        if extents.min_element() == 0 {
            return Err(VoxbakeError::DimensionOverflow(extents));
        }
        let voxels = lattice_len(extents, layout.channels())
            .ok_or(VoxbakeError::DimensionOverflow(extents))?;
        let expected = voxels * layout.channels();
        if data.len() != expected {
            return Err(VoxbakeError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            extents,
            layout,
            data,
        })
    }

    /// Lattice extents `(width, height, depth)`.
    #[must_use]
    pub fn extents(&self) -> UVec3 {
        self.extents
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.extents.x
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.extents.y
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.extents.z
    }

    /// Channel layout.
    #[must_use]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Number of voxels.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.data.len() / self.layout.channels()
    }

    /// Size of the buffer in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA texels, or `None` for an `Alpha8` buffer.
    #[must_use]
    pub fn texels(&self) -> Option<&[[u8; 4]]> {
        match self.layout {
            ChannelLayout::Rgba8 => Some(bytemuck::cast_slice(&self.data)),
            ChannelLayout::Alpha8 => None,
        }
    }

    /// Bytes of one voxel, or `None` if out of bounds.
    #[must_use]
    pub fn voxel(&self, x: u32, y: u32, z: u32) -> Option<&[u8]> {
        if x >= self.extents.x || y >= self.extents.y || z >= self.extents.z {
            return None;
        }
        let w = self.extents.x as usize;
        let h = self.extents.y as usize;
        let index = x as usize + y as usize * w + z as usize * w * h;
        let channels = self.layout.channels();
        self.data.get(index * channels..(index + 1) * channels)
    }

    /// Expands an `Alpha8` buffer to `Rgba8` by replicating each byte.
    #[must_use]
    pub fn into_rgba(self) -> Self {
        match self.layout {
            ChannelLayout::Rgba8 => self,
            ChannelLayout::Alpha8 => {
                let data = self.data.iter().flat_map(|&a| [a; 4]).collect();
                Self {
                    extents: self.extents,
                    layout: ChannelLayout::Rgba8,
                    data,
                }
            }
        }
    }
}

impl fmt::Debug for DenseVolumeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseVolumeBuffer")
            .field("extents", &self.extents)
            .field("layout", &self.layout)
            .field("bytes", &self.data.len())
            .finish()
    }
}
