//! Resampling engine for voxbake.
//!
//! Converts a sparse scalar field into a dense, normalized RGBA lattice:
//!
//! 1. [`resolve_bounds`] reads the occupied index-space box and maps it to
//!    world space
//! 2. [`plan_resolution`] turns the box and a scale factor into lattice extents
//! 3. [`sample_lattice`] evaluates the field at every cell center in parallel
//! 4. [`normalize_in_place`] remaps the samples to `[0, 1]`
//! 5. [`pack_single`] / [`pack_rgba`] quantize and interleave the channels
//!
//! [`Resampler`] runs the whole pipeline.

// Error variants are documented on the error type, not per function
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder methods return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Names like value_range::ValueRange repeat their module
#![allow(clippy::module_name_repetitions)]

pub mod bounds;
pub mod engine;
pub mod normalize;
pub mod packer;
pub mod planner;
pub mod sampler;

pub use bounds::{resolve_bounds, ResolvedBounds};
pub use engine::{LatticePlan, ResampledVolume, Resampler};
pub use normalize::normalize_in_place;
pub use packer::{pack_alpha, pack_rgba, pack_single};
pub use planner::plan_resolution;
pub use sampler::{cell_center, sample_lattice, sample_with, SampledField};
