//! Error types for voxbake.

use std::path::PathBuf;

use glam::UVec3;
use thiserror::Error;

/// The main error type for voxbake operations.
#[derive(Error, Debug)]
pub enum VoxbakeError {
    /// The source has no usable index-space bounding box.
    #[error("grid '{grid}' has missing or degenerate bounds")]
    MissingOrDegenerateBounds { grid: String },

    /// A container was opened but holds no usable grid.
    #[error("'{}' contains no grids", .0.display())]
    EmptyGridList(PathBuf),

    /// The file could not be opened or parsed.
    #[error("cannot read '{}': {reason}", path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    /// A raw file name does not end in `_W_H_D`.
    #[error("cannot decode dimensions from '{}': {reason}", path.display())]
    InvalidFilenameEncoding { path: PathBuf, reason: String },

    /// The computed lattice is empty or too large to allocate.
    #[error("invalid lattice size {0}")]
    DimensionOverflow(UVec3),

    /// The resolution scale factor is not a positive finite number.
    #[error("invalid resolution scale {0}")]
    InvalidScale(f64),

    /// Normalization was requested over a range that saw no values.
    #[error("value range is empty")]
    EmptyValueRange,

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The four channel sources planned different lattices.
    #[error("channel {channel} planned {actual} voxels, expected {expected}")]
    ChannelExtentMismatch {
        channel: usize,
        expected: UVec3,
        actual: UVec3,
    },

    /// No loader is registered for the file extension.
    #[error("unsupported volume format '{0}'")]
    UnsupportedFormat(String),

    /// The requested channel layout cannot hold the channel composition.
    #[error("layout {0} cannot hold four channels")]
    UnsupportedLayout(String),

    /// A named grid was not found in a container.
    #[error("grid '{0}' not found")]
    GridNotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for voxbake operations.
pub type Result<T> = std::result::Result<T, VoxbakeError>;
