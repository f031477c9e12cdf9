//! Lazy handle on a sparse source.

use std::fmt;
use std::sync::{Arc, OnceLock};

use voxbake_core::{
    ChannelLayout, ResampleOptions, ResolutionPolicy, Result, SparseSource, VolumeDescriptor,
};
use voxbake_resample::{ResampledVolume, Resampler};

/// A sparse source plus a descriptor computed on first request.
///
/// Computing the descriptor resolves bounds and plans the lattice but does
/// not sample; `min_value`/`max_value` stay zero until a
/// [`resample`](Self::resample) produces a full descriptor.
pub struct Volume {
    source: Arc<dyn SparseSource>,
    resolution: ResolutionPolicy,
    descriptor: OnceLock<VolumeDescriptor>,
}

impl Volume {
    /// Wraps `source` with the default resolution policy.
    pub fn new(source: Arc<dyn SparseSource>) -> Self {
        Self::with_resolution(source, ResolutionPolicy::default())
    }

    /// Wraps `source`, planning lattices with `resolution`.
    pub fn with_resolution(source: Arc<dyn SparseSource>, resolution: ResolutionPolicy) -> Self {
        Self {
            source,
            resolution,
            descriptor: OnceLock::new(),
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &Arc<dyn SparseSource> {
        &self.source
    }

    /// The source's name.
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Returns true once the descriptor has been computed.
    pub fn has_descriptor(&self) -> bool {
        self.descriptor.get().is_some()
    }

    /// Extents and physical scale of the source, computed once.
    pub fn descriptor(&self) -> Result<VolumeDescriptor> {
        if let Some(descriptor) = self.descriptor.get() {
            return Ok(*descriptor);
        }
        let plan = Resampler::new(ResampleOptions::new().with_resolution(self.resolution))
            .plan(self.source.as_ref())?;
        let descriptor = VolumeDescriptor::new(plan.extents, ChannelLayout::Rgba8)
            .with_scale(plan.bounds.world.extents());
        Ok(*self.descriptor.get_or_init(|| descriptor))
    }

    /// Runs the engine on the source. `options.resolution` is replaced by
    /// this volume's policy.
    pub fn resample(&self, options: &ResampleOptions) -> Result<ResampledVolume> {
        Resampler::new(options.clone().with_resolution(self.resolution))
            .resample_single(self.source.as_ref())
    }
}

impl fmt::Debug for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Volume")
            .field("source", &self.source.name())
            .field("resolution", &self.resolution)
            .field("descriptor", &self.descriptor.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, IVec3, UVec3};
    use voxbake_core::{GridTransform, SparseGrid};

    fn grid() -> Arc<dyn SparseSource> {
        let mut grid = SparseGrid::new("cube", 0.0).with_transform(GridTransform::from_voxel_size(2.0));
        grid.set_value(IVec3::ZERO, 1.0);
        grid.set_value(IVec3::new(3, 1, 1), 5.0);
        grid.update_file_bbox_metadata();
        Arc::new(grid)
    }

    #[test]
    fn test_descriptor_is_lazy() {
        let volume = Volume::new(grid());
        assert!(!volume.has_descriptor());
        let desc = volume.descriptor().unwrap();
        assert!(volume.has_descriptor());
        assert_eq!(desc.extents(), UVec3::new(4, 2, 2));
        assert_eq!(desc.scale(), DVec3::new(6.0, 2.0, 2.0));
        assert_eq!((desc.min_value, desc.max_value), (0.0, 0.0));
        assert_eq!(volume.descriptor().unwrap(), desc);
    }

    #[test]
    fn test_failed_descriptor_is_not_cached() {
        let volume = Volume::new(Arc::new(SparseGrid::new("bare", 0.0)));
        assert!(volume.descriptor().is_err());
        assert!(!volume.has_descriptor());
    }

    #[test]
    fn test_resample_uses_volume_resolution() {
        let volume = Volume::with_resolution(grid(), ResolutionPolicy::Scaled(0.5));
        let out = volume.resample(&ResampleOptions::new().with_scale(8.0)).unwrap();
        assert_eq!(out.buffer.extents(), UVec3::new(2, 1, 1));
    }
}
