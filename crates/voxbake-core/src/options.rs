//! Configuration options for resampling.

use std::path::Path;

use glam::UVec3;
use serde::{Deserialize, Serialize};

use crate::buffer::ChannelLayout;
use crate::error::Result;

/// How the target lattice size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// `ceil(index_axis_length * s)` voxels per axis.
    Scaled(f64),
    /// An explicit lattice size, ignoring the source's native extents.
    Fixed(UVec3),
}

impl ResolutionPolicy {
    /// The historical fixed 256³ lattice.
    pub const FIXED_FALLBACK: Self = Self::Fixed(UVec3::splat(256));
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::Scaled(1.0)
    }
}

/// How normalized values become bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Quantization {
    /// `255 * v` truncated toward zero (0.5 -> 127).
    #[default]
    Truncate,
    /// `255 * v` rounded half away from zero (0.5 -> 128).
    Round,
}

impl Quantization {
    /// Converts a normalized value to a byte.
    ///
    /// Values are clamped to `[0, 1]` first; NaN maps to 0.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn quantize(self, value: f32) -> u8 {
        let scaled = 255.0 * value.clamp(0.0, 1.0);
        match self {
            Self::Truncate => scaled as u8,
            Self::Round => scaled.round() as u8,
        }
    }
}

/// What a constant field normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateRangePolicy {
    /// Every value keeps its raw value clamped to `[0, 1]`.
    #[default]
    Clamp,
    /// Every value becomes 0.0.
    Zero,
    /// Every value becomes 0.5.
    Half,
    /// Every value becomes 1.0.
    One,
}

impl DegenerateRangePolicy {
    /// The normalized value a voxel of a constant field receives.
    #[must_use]
    pub fn resolve(self, raw: f32) -> f32 {
        match self {
            Self::Clamp => raw.clamp(0.0, 1.0),
            Self::Zero => 0.0,
            Self::Half => 0.5,
            Self::One => 1.0,
        }
    }
}

/// Options controlling one resampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleOptions {
    /// Target lattice size policy.
    pub resolution: ResolutionPolicy,

    /// Byte quantization of normalized values.
    pub quantization: Quantization,

    /// Fallback for constant fields.
    pub degenerate_range: DegenerateRangePolicy,

    /// Output layout. `Alpha8` is only valid for a single source.
    pub layout: ChannelLayout,

    /// Lattice cells handed to one parallel task (`None` = one z-slice).
    pub cells_per_task: Option<usize>,

    /// Largest lattice, in voxels, a run may allocate.
    pub max_voxels: u64,
}

impl ResampleOptions {
    /// Default voxel cap: a 1024³ lattice, 4 GiB of RGBA8.
    pub const DEFAULT_MAX_VOXELS: u64 = 1 << 30;
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            resolution: ResolutionPolicy::default(),
            quantization: Quantization::default(),
            degenerate_range: DegenerateRangePolicy::default(),
            layout: ChannelLayout::Rgba8,
            cells_per_task: None,
            max_voxels: Self::DEFAULT_MAX_VOXELS,
        }
    }
}

impl ResampleOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the resolution policy.
    pub fn with_resolution(mut self, resolution: ResolutionPolicy) -> Self {
        self.resolution = resolution;
        self
    }

    /// Shorthand for `with_resolution(ResolutionPolicy::Scaled(scale))`.
    pub fn with_scale(self, scale: f64) -> Self {
        self.with_resolution(ResolutionPolicy::Scaled(scale))
    }

    /// Sets the quantization mode.
    pub fn with_quantization(mut self, quantization: Quantization) -> Self {
        self.quantization = quantization;
        self
    }

    /// Sets the constant-field fallback.
    pub fn with_degenerate_range(mut self, policy: DegenerateRangePolicy) -> Self {
        self.degenerate_range = policy;
        self
    }

    /// Sets the output layout.
    pub fn with_layout(mut self, layout: ChannelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the partition granularity.
    pub fn with_cells_per_task(mut self, cells: usize) -> Self {
        self.cells_per_task = Some(cells);
        self
    }

    /// Sets the voxel cap.
    pub fn with_max_voxels(mut self, max_voxels: u64) -> Self {
        self.max_voxels = max_voxels;
        self
    }
}
