//! Loading volumes from files by extension.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use voxbake_core::{
    ChannelSources, DenseVolumeBuffer, ResampleOptions, ResolutionPolicy, Result, SparseSource,
    VolumeDescriptor, VoxbakeError,
};
use voxbake_resample::{ResampledVolume, Resampler};

use crate::container::ContainerReader;
use crate::init::{init, lookup_format};
use crate::raw::load_raw;
use crate::registry::FormatKind;
use crate::volume::Volume;

/// A dense buffer and its summary, owned by the caller.
#[derive(Debug, Clone)]
pub struct LoadedVolume {
    pub buffer: DenseVolumeBuffer,
    pub descriptor: VolumeDescriptor,
}

impl From<ResampledVolume> for LoadedVolume {
    fn from(volume: ResampledVolume) -> Self {
        Self {
            buffer: volume.buffer,
            descriptor: volume.descriptor,
        }
    }
}

/// Which grids of a container feed the output channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GridSelection {
    /// The first grid in the file, replicated into every channel.
    #[default]
    First,
    /// The grid with this name, replicated into every channel.
    Named(String),
    /// Four named grids written to R, G, B and A.
    Rgba([String; 4]),
}

/// Options for [`Loader`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Engine options used for containers.
    pub resample: ResampleOptions,
    /// Grid selection used for containers.
    pub selection: GridSelection,
}

impl LoadOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lattice scale applied to a container grid's native extents.
    pub fn with_import_scale(mut self, scale: f64) -> Self {
        self.resample.resolution = ResolutionPolicy::Scaled(scale);
        self
    }

    /// Replaces the engine options.
    pub fn with_resample(mut self, resample: ResampleOptions) -> Self {
        self.resample = resample;
        self
    }

    /// Sets the grid selection.
    pub fn with_selection(mut self, selection: GridSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// Loads volume files, routing by extension through the format registry.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: LoadOptions,
}

impl Loader {
    /// Creates a loader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with the given options.
    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads `path` into a dense RGBA buffer.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedVolume> {
        let path = path.as_ref();
        match resolve_format(path)? {
            FormatKind::Raw => load_raw(path),
            FormatKind::Container(reader) => {
                let sources = self.select(path, reader.as_ref())?;
                log::info!("loading '{}' as {sources:?}", path.display());
                Resampler::new(self.options.resample.clone())
                    .resample(&sources)
                    .map(LoadedVolume::from)
            }
        }
    }

    /// Opens the first grid of a container as a lazily summarized [`Volume`].
    pub fn open_volume(&self, path: impl AsRef<Path>) -> Result<Volume> {
        let path = path.as_ref();
        match resolve_format(path)? {
            FormatKind::Raw => Err(VoxbakeError::UnsupportedFormat(format!(
                "{} (raw files hold no sparse grid)",
                path.display()
            ))),
            FormatKind::Container(reader) => {
                let grid = read_nonempty(path, reader.as_ref())?.swap_remove(0);
                Ok(Volume::with_resolution(grid, self.options.resample.resolution))
            }
        }
    }

    fn select(&self, path: &Path, reader: &dyn ContainerReader) -> Result<ChannelSources> {
        let grids = read_nonempty(path, reader)?;
        let find = |name: &str| -> Result<Arc<dyn SparseSource>> {
            grids
                .iter()
                .find(|grid| grid.name() == name)
                .cloned()
                .ok_or_else(|| VoxbakeError::GridNotFound(name.to_string()))
        };
        Ok(match &self.options.selection {
            GridSelection::First => ChannelSources::Single(grids[0].clone()),
            GridSelection::Named(name) => ChannelSources::Single(find(name)?),
            GridSelection::Rgba([r, g, b, a]) => {
                ChannelSources::FourChannel([find(r)?, find(g)?, find(b)?, find(a)?])
            }
        })
    }
}

fn resolve_format(path: &Path) -> Result<FormatKind> {
    init();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    lookup_format(extension).ok_or_else(|| VoxbakeError::UnsupportedFormat(extension.to_string()))
}

fn read_nonempty(path: &Path, reader: &dyn ContainerReader) -> Result<Vec<Arc<dyn SparseSource>>> {
    let grids = reader.read_grids(path)?;
    if grids.is_empty() {
        return Err(VoxbakeError::EmptyGridList(path.to_path_buf()));
    }
    Ok(grids)
}
