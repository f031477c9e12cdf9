//! Fixed-format raw volume dumps.
//!
//! A raw file is a flat byte array of `W*H*D` alpha values whose dimensions
//! are the last three underscore-separated tokens of the file stem, e.g.
//! `scan_4_4_2.raw3d`. Bytes are read verbatim in x-fastest order and
//! replicated into all four RGBA channels.

use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use glam::UVec3;
use voxbake_core::{
    lattice_len, ChannelLayout, DenseVolumeBuffer, Result, VolumeDescriptor, VoxbakeError,
};

use crate::loader::LoadedVolume;

/// Decodes `W`, `H`, `D` from a `..._W_H_D.ext` file name.
pub fn parse_raw_dimensions(path: &Path) -> Result<UVec3> {
    let invalid = |reason: String| VoxbakeError::InvalidFilenameEncoding {
        path: path.to_path_buf(),
        reason,
    };

    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| invalid("file name is not valid UTF-8".into()))?;
    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() < 3 {
        return Err(invalid(format!(
            "expected at least 3 '_' separated tokens, found {}",
            tokens.len()
        )));
    }

    let mut dims = [0_u32; 3];
    for (dim, token) in dims.iter_mut().zip(&tokens[tokens.len() - 3..]) {
        *dim = token
            .parse()
            .map_err(|_| invalid(format!("'{token}' is not a dimension")))?;
    }
    let extents = UVec3::from_array(dims);
    if extents.min_element() == 0 {
        return Err(VoxbakeError::DimensionOverflow(extents));
    }
    Ok(extents)
}

/// Loads a raw dump as an RGBA buffer.
///
/// The descriptor carries extents only; raw files have no value range or
/// physical scale. A file shorter than `W*H*D` bytes is rejected before
/// the buffer is allocated.
pub fn load_raw(path: &Path) -> Result<LoadedVolume> {
    let unreadable = |reason: String| VoxbakeError::UnreadableFile {
        path: path.to_path_buf(),
        reason,
    };
    let file_len = std::fs::metadata(path)
        .map_err(|e| unreadable(e.to_string()))
        .and_then(|meta| {
            if meta.is_file() {
                Ok(meta.len())
            } else {
                Err(unreadable("not a regular file".into()))
            }
        })?;
    let extents = parse_raw_dimensions(path)?;
    let len = lattice_len(extents, ChannelLayout::Rgba8.channels())
        .ok_or(VoxbakeError::DimensionOverflow(extents))?;
    if file_len < len as u64 {
        return Err(unreadable(format!(
            "{extents} needs {len} bytes, file holds {file_len}"
        )));
    }
    log::info!("loading raw volume '{}' ({extents})", path.display());

    let mut alpha = vec![0_u8; len];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut alpha))
        .map_err(|e| unreadable(format!("reading {len} voxels: {e}")))?;

    let buffer = DenseVolumeBuffer::new(extents, ChannelLayout::Alpha8, alpha)?.into_rgba();
    Ok(LoadedVolume {
        buffer,
        descriptor: VolumeDescriptor::new(extents, ChannelLayout::Rgba8),
    })
}
