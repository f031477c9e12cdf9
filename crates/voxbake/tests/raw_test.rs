//! Raw dump loading through the public loader.

mod common;

use std::fs;

use common::ScratchDir;
use proptest::prelude::*;
use voxbake::*;

#[test]
fn test_load_scan_4_4_2() {
    let dir = ScratchDir::new("raw-scan");
    let path = dir.join("scan_4_4_2.raw3d");
    let bytes: Vec<u8> = (0..32).map(|i| i * 7).collect();
    fs::write(&path, &bytes).unwrap();

    let volume = Loader::new().load(&path).unwrap();
    let desc = volume.descriptor;
    assert_eq!((desc.width, desc.height, desc.depth), (4, 4, 2));
    assert_eq!(desc.voxel_count, 32);
    assert_eq!(desc.format, ChannelLayout::Rgba8);
    assert_eq!((desc.min_value, desc.max_value), (0.0, 0.0));

    let rgba = volume.buffer.as_bytes();
    assert_eq!(rgba.len(), 128);
    for (i, &b) in bytes.iter().enumerate() {
        assert_eq!(rgba[i * 4..i * 4 + 4], [b; 4], "voxel {i}");
    }
}

#[test]
fn test_extension_is_case_insensitive() {
    let dir = ScratchDir::new("raw-case");
    let path = dir.join("tiny_1_1_2.RAW3D");
    fs::write(&path, [9_u8, 200]).unwrap();

    let volume = Loader::new().load(&path).unwrap();
    assert_eq!(volume.buffer.voxel(0, 0, 1), Some(&[200_u8; 4][..]));
}

#[test]
fn test_raw_failures() {
    let dir = ScratchDir::new("raw-fail");

    let short = dir.join("short_2_2_2.raw3d");
    fs::write(&short, [1_u8, 2, 3]).unwrap();
    assert!(matches!(
        Loader::new().load(&short),
        Err(VoxbakeError::UnreadableFile { .. })
    ));

    let folder = dir.join("folder_1_1_1.raw3d");
    fs::create_dir_all(&folder).unwrap();
    assert!(matches!(
        Loader::new().load(&folder),
        Err(VoxbakeError::UnreadableFile { .. })
    ));

    let badly_named = dir.join("scan_4_four_2.raw3d");
    fs::write(&badly_named, [0_u8; 32]).unwrap();
    assert!(matches!(
        Loader::new().load(&badly_named),
        Err(VoxbakeError::InvalidFilenameEncoding { .. })
    ));

    assert!(matches!(
        Loader::new().open_volume(&short),
        Err(VoxbakeError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_name_larger_than_file() {
    let dir = ScratchDir::new("raw-huge-name");
    let path = dir.join("scan_200000_200000_200000.raw3d");
    fs::write(&path, [1_u8, 2, 3, 4]).unwrap();

    let result = load_raw(&path);
    assert!(matches!(result, Err(VoxbakeError::UnreadableFile { .. })));
    assert!(matches!(
        Loader::new().load(&path),
        Err(VoxbakeError::UnreadableFile { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_raw_bytes_replicated(w in 1u32..5, h in 1u32..5, d in 1u32..5, seed in any::<u8>()) {
        let dir = ScratchDir::new(&format!("raw-prop-{w}-{h}-{d}-{seed}"));
        let path = dir.join(&format!("prop_{w}_{h}_{d}.raw3d"));
        let n = (w * h * d) as usize;
        let bytes: Vec<u8> = (0..n).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
        fs::write(&path, &bytes).unwrap();

        let volume = load_raw(&path).unwrap();
        prop_assert_eq!(volume.buffer.extents(), UVec3::new(w, h, d));
        let texels = volume.buffer.texels().unwrap();
        prop_assert_eq!(texels.len(), n);
        for (texel, &b) in texels.iter().zip(&bytes) {
            prop_assert_eq!(*texel, [b; 4]);
        }
    }
}
