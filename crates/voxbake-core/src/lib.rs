//! Core abstractions for voxbake.
//!
//! This crate provides the types shared by the resampling engine and the
//! loaders:
//! - [`SparseSource`] trait for sparse scalar fields, and the in-memory
//!   [`SparseGrid`] implementation
//! - [`ValueRange`] min/max accumulator
//! - [`DenseVolumeBuffer`] and [`VolumeDescriptor`] outputs
//! - [`ResampleOptions`] configuration

// Error variants are documented on the error type, not per function
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder methods return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Names like value_range::ValueRange repeat their module
#![allow(clippy::module_name_repetitions)]

pub mod bbox;
pub mod buffer;
pub mod descriptor;
pub mod error;
pub mod options;
pub mod source;
pub mod sparse_grid;
pub mod transform;
pub mod value_range;

pub use bbox::{IndexBBox, WorldBBox};
pub use buffer::{lattice_len, ChannelLayout, DenseVolumeBuffer};
pub use descriptor::VolumeDescriptor;
pub use error::{Result, VoxbakeError};
pub use options::{DegenerateRangePolicy, Quantization, ResampleOptions, ResolutionPolicy};
pub use source::{ChannelSources, MetaValue, SparseSource, FILE_BBOX_MAX, FILE_BBOX_MIN};
pub use sparse_grid::SparseGrid;
pub use transform::GridTransform;
pub use value_range::ValueRange;

// Re-export glam types for convenience
pub use glam::{DVec3, IVec3, UVec3};
