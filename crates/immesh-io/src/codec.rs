//! Binary raster codec
//!
//! Some data types carry integer arrays too large for plain-text transport.
//! The producer packs each unsigned 32-bit integer into one pixel's RGBA
//! channels (R = bits 31-24, G = 23-16, B = 15-8, A = 7-0), serializes the
//! pixel grid as a raster image, base64-encodes it, and may split the
//! encoded text across several cells of the same tag. This module reverses
//! that: concatenate, base64-decode, decode the raster through a
//! [`PixelDecode`] backend, unpack pixels back into integers, drop the
//! sentinel, group into tuples, and rescale where the data type calls
//! for it.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::error::{DecodeError, DecodeResult};
use crate::pixel::{PixelBuffer, PixelDecode};
use crate::types::{RowSet, Vec3d};

/// Reserved value meaning "no data"; never emitted by the decoder
pub const SENTINEL: u32 = 2_147_483_647;

/// Default divisor recovering sub-unit precision from packed integers
pub const DEFAULT_SCALE: f64 = 1_000.0;

/// Concatenate the included cells of a binary column into one base64
/// payload
///
/// Cells are filtered by the row set, nulls dropped, each cell trimmed,
/// and the remainder joined in row order. An empty result means the column
/// contributes nothing for this tag and is not an error.
pub fn concat_cells(cells: &[Option<String>], rows: Option<&RowSet>) -> Option<String> {
    let mut payload = String::new();
    for (row, cell) in cells.iter().enumerate() {
        if let Some(rows) = rows {
            if !rows.contains(&row) {
                continue;
            }
        }
        if let Some(text) = cell {
            payload.push_str(text.trim());
        }
    }
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

/// Unpack a pixel buffer into integers, skipping the sentinel
///
/// Pixels are walked in row-major order and each is reassembled big-endian:
/// `R<<24 | G<<16 | B<<8 | A`.
pub fn unpack_pixels(buffer: &PixelBuffer) -> Vec<u32> {
    let mut values = Vec::with_capacity(buffer.pixel_count());
    for px in buffer.data.chunks_exact(4) {
        let value = u32::from_be_bytes([px[0], px[1], px[2], px[3]]);
        if value == SENTINEL {
            continue;
        }
        values.push(value);
    }
    values
}

/// Decode a base64 payload into the integer stream it encodes
pub async fn decode_values(payload: &str, decoder: &dyn PixelDecode) -> DecodeResult<Vec<u32>> {
    let bytes = BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
    let buffer = decoder.decode(&bytes).await?;
    Ok(unpack_pixels(&buffer))
}

/// Group a flat integer stream into pairs, dropping an incomplete tail
pub fn group_pairs(values: &[u32]) -> Vec<[u32; 2]> {
    values.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
}

/// Group a flat integer stream into triples, dropping an incomplete tail
pub fn group_triples(values: &[u32]) -> Vec<[u32; 3]> {
    values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

/// Decode a binary coordinate payload into rescaled 3D points
pub async fn decode_coordinates(
    payload: &str,
    decoder: &dyn PixelDecode,
    scale: f64,
) -> DecodeResult<Vec<Vec3d>> {
    let values = decode_values(payload, decoder).await?;
    Ok(group_triples(&values)
        .into_iter()
        .map(|[x, y, z]| Vec3d::new(x as f64 / scale, y as f64 / scale, z as f64 / scale))
        .collect())
}

/// Decode a binary index payload into triples (triangle topology)
pub async fn decode_index_triples(
    payload: &str,
    decoder: &dyn PixelDecode,
) -> DecodeResult<Vec<[u32; 3]>> {
    let values = decode_values(payload, decoder).await?;
    Ok(group_triples(&values))
}

/// Decode a binary index payload into pairs (line and sharp-edge topology)
pub async fn decode_index_pairs(
    payload: &str,
    decoder: &dyn PixelDecode,
) -> DecodeResult<Vec<[u32; 2]>> {
    let values = decode_values(payload, decoder).await?;
    Ok(group_pairs(&values))
}

/// Decode a binary scalar payload into rescaled values
pub async fn decode_scalars(
    payload: &str,
    decoder: &dyn PixelDecode,
    scale: f64,
) -> DecodeResult<Vec<f64>> {
    let values = decode_values(payload, decoder).await?;
    Ok(values.into_iter().map(|v| v as f64 / scale).collect())
}
