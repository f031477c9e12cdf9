//! voxbake: bake sparse volumetric grids into dense RGBA voxel buffers.
//!
//! # Quick Start
//!
//! ```no_run
//! use voxbake::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let loader = Loader::with_options(LoadOptions::new().with_import_scale(0.5));
//!     let volume = loader.load("smoke.vgrid")?;
//!     println!(
//!         "{}x{}x{} voxels, values {}..{}",
//!         volume.descriptor.width,
//!         volume.descriptor.height,
//!         volume.descriptor.depth,
//!         volume.descriptor.min_value,
//!         volume.descriptor.max_value,
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Formats
//!
//! Files are routed by extension:
//! - `.raw3d`: headerless byte dumps named `name_W_H_D.raw3d`, one byte per
//!   voxel, replicated into RGBA
//! - `.vgrid`: JSON sparse-grid containers (see [`write_grid_file`])
//!
//! Other containers, such as `.vdb`, are added with
//! [`register_container_reader`].

// Error variants are documented on the error type, not per function
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder methods return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Names like value_range::ValueRange repeat their module
#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod init;
pub mod loader;
pub mod raw;
pub mod registry;
pub mod volume;

pub use container::{
    write_grid_file, ContainerReader, GridDocument, GridFileDocument, JsonGridReader, VoxelRecord,
};
pub use init::{
    init, init_logging, is_initialized, lookup_format, register_container_reader,
    registered_extensions,
};
pub use loader::{GridSelection, LoadOptions, LoadedVolume, Loader};
pub use raw::{load_raw, parse_raw_dimensions};
pub use registry::{FormatKind, FormatRegistry, JSON_GRID_EXTENSION, RAW_EXTENSION};
pub use volume::Volume;

pub use voxbake_core::{
    lattice_len, ChannelLayout, ChannelSources, DegenerateRangePolicy, DenseVolumeBuffer,
    GridTransform, IndexBBox, MetaValue, Quantization, ResampleOptions, ResolutionPolicy, Result,
    SparseGrid, SparseSource, ValueRange, VolumeDescriptor, VoxbakeError, WorldBBox,
    FILE_BBOX_MAX, FILE_BBOX_MIN,
};
pub use voxbake_resample::{LatticePlan, ResampledVolume, Resampler};

pub use glam::{DVec3, IVec3, UVec3};
