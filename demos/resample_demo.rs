//! Bakes a procedural density sphere and prints the result's descriptor.
//!
//! Run with `RUST_LOG=debug` to see the pipeline stages.

use voxbake::*;

fn main() -> Result<()> {
    init_logging();
    init();

    // Smooth density falling off from the center of a 32^3 grid
    let radius = 12.0_f32;
    let mut grid = SparseGrid::new("density", 0.0).with_transform(
        GridTransform::from_scale_translation(DVec3::splat(0.1), DVec3::splat(-1.6)),
    );
    for z in 0..32 {
        for y in 0..32 {
            for x in 0..32 {
                let ijk = IVec3::new(x, y, z);
                let d = (ijk.as_vec3() - glam::Vec3::splat(15.5)).length();
                if d < radius {
                    grid.set_value(ijk, 1.0 - d / radius);
                }
            }
        }
    }
    grid.update_file_bbox_metadata();
    println!("{} active voxels", grid.active_voxel_count());

    let path = std::env::temp_dir().join("voxbake_demo.vgrid");
    write_grid_file(&path, &[grid])?;

    let loader = Loader::with_options(LoadOptions::new().with_import_scale(0.5));
    let volume = loader.load(&path)?;
    println!(
        "descriptor: {}",
        serde_json::to_string_pretty(&volume.descriptor)?
    );

    let center = volume.descriptor.extents() / 2;
    if let Some(texel) = volume.buffer.voxel(center.x, center.y, center.z) {
        println!("center texel: {texel:?}");
    }

    std::fs::remove_file(&path)?;
    Ok(())
}
