//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use voxbake::{IVec3, SparseGrid};

/// A scratch directory removed on drop.
pub struct ScratchDir(PathBuf);

impl ScratchDir {
    /// Creates an empty directory unique to `label` and this process.
    pub fn new(label: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("voxbake-{label}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("failed to create scratch dir");
        Self(dir)
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// A grid holding `f(ijk)` on every voxel of `[0, n)^3`.
pub fn filled_grid(name: &str, n: i32, f: impl Fn(IVec3) -> f32) -> SparseGrid {
    let mut grid = SparseGrid::new(name, 0.0);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let ijk = IVec3::new(x, y, z);
                grid.set_value(ijk, f(ijk));
            }
        }
    }
    grid.update_file_bbox_metadata();
    grid
}

/// A `[0, 1]^3` grid with the value `v` everywhere.
pub fn constant_grid(name: &str, v: f32) -> SparseGrid {
    filled_grid(name, 2, |_| v)
}
