//! Quantization and channel interleaving.

use rayon::prelude::*;
use voxbake_core::{Quantization, Result, VoxbakeError};

/// One byte per value.
pub fn pack_alpha(values: &[f32], quantization: Quantization) -> Vec<u8> {
    values
        .par_iter()
        .map(|&v| quantization.quantize(v))
        .collect()
}

/// Four bytes per value, the quantized value replicated into R, G, B and A.
pub fn pack_single(values: &[f32], quantization: Quantization) -> Vec<u8> {
    let mut bytes = vec![0_u8; values.len() * 4];
    bytes
        .par_chunks_exact_mut(4)
        .zip(values.par_iter())
        .for_each(|(texel, &v)| texel.fill(quantization.quantize(v)));
    bytes
}

/// Interleaves four equally sized channels as RGBA.
pub fn pack_rgba(channels: [&[f32]; 4], quantization: Quantization) -> Result<Vec<u8>> {
    let len = channels[0].len();
    if let Some(bad) = channels.iter().find(|c| c.len() != len) {
        return Err(VoxbakeError::SizeMismatch {
            expected: len,
            actual: bad.len(),
        });
    }

    let mut bytes = vec![0_u8; len * 4];
    bytes
        .par_chunks_exact_mut(4)
        .enumerate()
        .for_each(|(i, texel)| {
            for (slot, channel) in texel.iter_mut().zip(channels.iter()) {
                *slot = quantization.quantize(channel[i]);
            }
        });
    Ok(bytes)
}
