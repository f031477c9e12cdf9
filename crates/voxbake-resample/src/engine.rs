//! The resampling entry point.

use glam::UVec3;
use voxbake_core::{
    ChannelLayout, ChannelSources, DenseVolumeBuffer, ResampleOptions, Result, SparseSource,
    ValueRange, VolumeDescriptor, VoxbakeError, WorldBBox,
};

use crate::bounds::{resolve_bounds, ResolvedBounds};
use crate::normalize::normalize_in_place;
use crate::packer::{pack_alpha, pack_rgba, pack_single};
use crate::planner::plan_resolution;
use crate::sampler::sample_lattice;

/// Bounds and lattice size for one source, computed without sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePlan {
    /// Occupied region in index and world space.
    pub bounds: ResolvedBounds,
    /// Target lattice size.
    pub extents: UVec3,
}

/// The output of a successful resample.
#[derive(Debug, Clone)]
pub struct ResampledVolume {
    /// Packed voxels, x fastest.
    pub buffer: DenseVolumeBuffer,
    /// Extents, value range and physical scale of `buffer`.
    pub descriptor: VolumeDescriptor,
}

/// Converts sparse sources into dense voxel buffers.
///
/// Every stage runs to completion before the next starts: all channels are
/// planned first (so bounds and size failures happen before any sampling),
/// then each channel is sampled and its per-task ranges merged, then the
/// channel is normalized, and finally the channels are packed.
#[derive(Debug, Clone, Default)]
pub struct Resampler {
    options: ResampleOptions,
}

impl Resampler {
    /// Creates a resampler with the given options.
    pub fn new(options: ResampleOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &ResampleOptions {
        &self.options
    }

    /// Resolves bounds and lattice size for one source.
    ///
    /// A lattice above `options.max_voxels` is a
    /// [`VoxbakeError::DimensionOverflow`].
    pub fn plan(&self, source: &dyn SparseSource) -> Result<LatticePlan> {
        let bounds = resolve_bounds(source)?;
        let extents = plan_resolution(&bounds.index, self.options.resolution)?;
        let voxels = extents.as_u64vec3().element_product();
        if voxels > self.options.max_voxels {
            log::warn!(
                "grid '{}': {extents} lattice exceeds the {} voxel cap",
                source.name(),
                self.options.max_voxels
            );
            return Err(VoxbakeError::DimensionOverflow(extents));
        }
        Ok(LatticePlan { bounds, extents })
    }

    /// Resamples one source, replicating it into every channel.
    pub fn resample_single(&self, source: &dyn SparseSource) -> Result<ResampledVolume> {
        self.run(&[source])
    }

    /// Resamples a channel composition.
    pub fn resample(&self, sources: &ChannelSources) -> Result<ResampledVolume> {
        let refs: Vec<&dyn SparseSource> = sources.iter().map(|source| &**source).collect();
        self.run(&refs)
    }

    fn run(&self, sources: &[&dyn SparseSource]) -> Result<ResampledVolume> {
        let layout = self.options.layout;
        if sources.len() == 4 && layout == ChannelLayout::Alpha8 {
            return Err(VoxbakeError::UnsupportedLayout(layout.to_string()));
        }

        let plans = sources
            .iter()
            .map(|source| self.plan(*source))
            .collect::<Result<Vec<_>>>()?;
        let extents = plans[0].extents;
        if let Some((channel, plan)) = plans
            .iter()
            .enumerate()
            .find(|(_, plan)| plan.extents != extents)
        {
            return Err(VoxbakeError::ChannelExtentMismatch {
                channel,
                expected: extents,
                actual: plan.extents,
            });
        }

        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        log::info!("resampling {names:?} onto a {extents} lattice");

        let mut merged = ValueRange::new();
        let mut channels = Vec::with_capacity(sources.len());
        for (source, plan) in sources.iter().zip(&plans) {
            let mut field =
                sample_lattice(*source, extents, &plan.bounds.world, self.options.cells_per_task)?;
            log::debug!("grid '{}': raw range {:?}", source.name(), field.range.bounds());
            normalize_in_place(&mut field.values, &field.range, self.options.degenerate_range)?;
            merged = merged.merge(field.range);
            channels.push(field.values);
        }

        let quantization = self.options.quantization;
        let bytes = match (channels.as_slice(), layout) {
            ([alpha], ChannelLayout::Alpha8) => pack_alpha(alpha, quantization),
            ([single], ChannelLayout::Rgba8) => pack_single(single, quantization),
            ([r, g, b, a], _) => pack_rgba([r, g, b, a].map(Vec::as_slice), quantization)?,
            _ => {
                return Err(VoxbakeError::SizeMismatch {
                    expected: 4,
                    actual: channels.len(),
                })
            }
        };
        let buffer = DenseVolumeBuffer::new(extents, layout, bytes)?;

        let world = plans
            .iter()
            .skip(1)
            .fold(plans[0].bounds.world, |acc: WorldBBox, plan| {
                acc.union(&plan.bounds.world)
            });
        let descriptor = VolumeDescriptor::new(extents, layout)
            .with_value_range(&merged)
            .with_scale(world.extents());

        log::info!(
            "resampled {} voxels ({} bytes)",
            buffer.voxel_count(),
            buffer.byte_len()
        );
        Ok(ResampledVolume { buffer, descriptor })
    }
}
