//! Sparse-grid containers.
//!
//! A [`ContainerReader`] opens a file and returns every grid it holds. The
//! built-in [`JsonGridReader`] reads the `.vgrid` format, a JSON document
//! of named sparse grids:
//!
//! ```json
//! { "grids": [ {
//!     "name": "density",
//!     "background": 0.0,
//!     "voxel_size": 0.5,
//!     "metadata": { "file_bbox_min": { "type": "vec3i", "value": [0, 0, 0] },
//!                   "file_bbox_max": { "type": "vec3i", "value": [1, 1, 1] } },
//!     "voxels": [ { "ijk": [0, 0, 0], "value": 1.0 } ]
//! } ] }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use glam::IVec3;
use serde::{Deserialize, Serialize};
use voxbake_core::{GridTransform, MetaValue, Result, SparseGrid, SparseSource, VoxbakeError};

/// Opens a container file and extracts its grids.
pub trait ContainerReader: Send + Sync {
    /// Reads every grid in `path`, in file order.
    ///
    /// Open and parse failures are [`VoxbakeError::UnreadableFile`]. An empty
    /// list is not an error here; the loader decides what that means.
    fn read_grids(&self, path: &Path) -> Result<Vec<Arc<dyn SparseSource>>>;
}

/// One active voxel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoxelRecord {
    pub ijk: IVec3,
    pub value: f32,
}

/// On-disk form of one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDocument {
    pub name: String,
    #[serde(default)]
    pub background: f32,
    /// Uniform voxel size; ignored when `transform` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voxel_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<GridTransform>,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetaValue>,
    #[serde(default)]
    pub voxels: Vec<VoxelRecord>,
}

impl GridDocument {
    /// Captures a grid, with voxels sorted by `(z, y, x)`.
    pub fn from_grid(grid: &SparseGrid) -> Self {
        let mut voxels: Vec<VoxelRecord> = grid
            .active_voxels()
            .map(|(ijk, value)| VoxelRecord { ijk, value })
            .collect();
        voxels.sort_by_key(|v| (v.ijk.z, v.ijk.y, v.ijk.x));
        Self {
            name: grid.name().to_string(),
            background: grid.background(),
            voxel_size: None,
            transform: Some(*grid.transform()),
            metadata: grid
                .metadata_entries()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            voxels,
        }
    }

    /// Builds the in-memory grid.
    pub fn into_grid(self) -> SparseGrid {
        let transform = match (self.transform, self.voxel_size) {
            (Some(transform), _) => transform,
            (None, Some(size)) => GridTransform::from_voxel_size(size),
            (None, None) => GridTransform::identity(),
        };
        let mut grid = SparseGrid::new(self.name, self.background).with_transform(transform);
        for (key, value) in self.metadata {
            grid.set_metadata(key, value);
        }
        for voxel in self.voxels {
            grid.set_value(voxel.ijk, voxel.value);
        }
        grid
    }
}

/// On-disk form of a `.vgrid` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridFileDocument {
    #[serde(default)]
    pub grids: Vec<GridDocument>,
}

/// Reader for the JSON `.vgrid` container.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGridReader;

impl ContainerReader for JsonGridReader {
    fn read_grids(&self, path: &Path) -> Result<Vec<Arc<dyn SparseSource>>> {
        let unreadable = |reason: String| VoxbakeError::UnreadableFile {
            path: path.to_path_buf(),
            reason,
        };
        let file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
        let document: GridFileDocument =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| unreadable(e.to_string()))?;
        log::debug!("'{}': {} grids", path.display(), document.grids.len());

        Ok(document
            .grids
            .into_iter()
            .map(|doc| Arc::new(doc.into_grid()) as Arc<dyn SparseSource>)
            .collect())
    }
}

/// Writes `grids` as a `.vgrid` document.
///
/// Each grid's `file_bbox_*` metadata is refreshed from its active voxels.
pub fn write_grid_file(path: impl AsRef<Path>, grids: &[SparseGrid]) -> Result<()> {
    let document = GridFileDocument {
        grids: grids
            .iter()
            .map(|grid| {
                let mut grid = grid.clone();
                grid.update_file_bbox_metadata();
                GridDocument::from_grid(&grid)
            })
            .collect(),
    };
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use voxbake_core::{FILE_BBOX_MAX, FILE_BBOX_MIN};

    #[test]
    fn test_document_round_trip() {
        let mut grid = SparseGrid::new("density", -1.0)
            .with_transform(GridTransform::from_scale_translation(DVec3::splat(0.25), DVec3::X));
        grid.set_value(IVec3::new(1, 2, 3), 4.0);
        grid.set_value(IVec3::new(0, 0, 0), 2.0);
        grid.set_metadata("units", MetaValue::Text("kg/m3".into()));

        let json = serde_json::to_string(&GridDocument::from_grid(&grid)).unwrap();
        let doc: GridDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.voxels[0].ijk, IVec3::ZERO);

        let back = doc.into_grid();
        assert_eq!(back.name(), "density");
        assert_eq!(back.background(), -1.0);
        assert_eq!(back.value(IVec3::new(1, 2, 3)), 4.0);
        assert_eq!(back.transform(), grid.transform());
        assert_eq!(
            back.metadata("units").unwrap(),
            Some(MetaValue::Text("kg/m3".into()))
        );
    }

    #[test]
    fn test_hand_written_document() {
        let json = r#"{
            "name": "hand",
            "voxel_size": 2.0,
            "metadata": {
                "file_bbox_min": { "type": "vec3i", "value": [0, 0, 0] },
                "file_bbox_max": { "type": "vec3i", "value": [1, 1, 1] }
            },
            "voxels": [ { "ijk": [1, 1, 1], "value": 3.0 } ]
        }"#;
        let grid = serde_json::from_str::<GridDocument>(json).unwrap().into_grid();
        assert_eq!(grid.transform().voxel_size(), DVec3::splat(2.0));
        assert_eq!(grid.background(), 0.0);
        assert_eq!(grid.value(IVec3::ONE), 3.0);
        assert_eq!(
            grid.metadata(FILE_BBOX_MAX).unwrap(),
            Some(MetaValue::Vec3i(IVec3::ONE))
        );
        assert!(grid.metadata(FILE_BBOX_MIN).unwrap().is_some());
    }
}
