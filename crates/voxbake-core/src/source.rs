//! The sparse volumetric source seam.
//!
//! A [`SparseSource`] is a scalar field stored in some hierarchical or sparse
//! structure. The engine only needs three things from it: metadata lookup
//! (for the stored bounding corners), its index-to-world transform, and a
//! box-filtered sample at an arbitrary world-space point.

use std::sync::Arc;

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transform::GridTransform;

/// Metadata key holding the minimum index-space corner.
pub const FILE_BBOX_MIN: &str = "file_bbox_min";

/// Metadata key holding the maximum index-space corner.
pub const FILE_BBOX_MAX: &str = "file_bbox_max";

/// A typed metadata value attached to a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Vec3i(IVec3),
    Vec3d(DVec3),
    Text(String),
}

impl MetaValue {
    /// Returns the value if it is a `Vec3i`.
    #[must_use]
    pub fn as_vec3i(&self) -> Option<IVec3> {
        match self {
            Self::Vec3i(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a short name for the value's type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Vec3i(_) => "vec3i",
            Self::Vec3d(_) => "vec3d",
            Self::Text(_) => "text",
        }
    }
}

/// A sparse scalar field that can be resampled.
pub trait SparseSource: Send + Sync {
    /// Returns the grid's name.
    fn name(&self) -> &str;

    /// Looks up a metadata entry.
    ///
    /// `Ok(None)` means the key is absent; `Err` means the lookup itself
    /// failed (corrupt or unreadable metadata).
    fn metadata(&self, key: &str) -> Result<Option<MetaValue>>;

    /// Returns the index-to-world transform.
    fn transform(&self) -> &GridTransform;

    /// Box-filtered value at a world-space point.
    fn sample_world(&self, p: DVec3) -> f32;
}

impl<S: SparseSource + ?Sized> SparseSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn metadata(&self, key: &str) -> Result<Option<MetaValue>> {
        (**self).metadata(key)
    }

    fn transform(&self) -> &GridTransform {
        (**self).transform()
    }

    fn sample_world(&self, p: DVec3) -> f32 {
        (**self).sample_world(p)
    }
}

/// The supported shapes of source composition.
#[derive(Clone)]
pub enum ChannelSources {
    /// One field, replicated into every channel.
    Single(Arc<dyn SparseSource>),
    /// Four fields written to R, G, B and A in order.
    FourChannel([Arc<dyn SparseSource>; 4]),
}

impl ChannelSources {
    /// Number of distinct source fields.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::FourChannel(_) => 4,
        }
    }

    /// Iterates over the source fields in channel order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SparseSource>> {
        match self {
            Self::Single(source) => std::slice::from_ref(source).iter(),
            Self::FourChannel(sources) => sources.iter(),
        }
    }
}

impl std::fmt::Debug for ChannelSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(|s| s.name()).collect();
        match self {
            Self::Single(_) => f.debug_tuple("Single").field(&names[0]).finish(),
            Self::FourChannel(_) => f.debug_tuple("FourChannel").field(&names).finish(),
        }
    }
}
