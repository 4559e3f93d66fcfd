//! Pixel-decode backend abstraction
//!
//! The binary codec does not decode raster images itself; it asks a
//! `PixelDecode` backend for an RGBA pixel buffer. This keeps the codec
//! independent of any particular image library or host platform. The
//! default backend (`raster` feature) uses the `image` crate.

use async_trait::async_trait;

use crate::error::{DecodeError, DecodeResult};

/// A decoded raster image as a row-major RGBA8 byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, 4 per pixel
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating that the byte length matches the
    /// dimensions
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> DecodeResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(DecodeError::BufferSize {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of pixels in the buffer
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Decode encoded image bytes into an RGBA pixel buffer
///
/// This is the pipeline's only suspension point. Backends must preserve
/// row-major pixel order; the codec relies on it to reconstruct array
/// order.
#[async_trait]
pub trait PixelDecode: Send + Sync {
    async fn decode(&self, bytes: &[u8]) -> DecodeResult<PixelBuffer>;
}

/// Default backend decoding PNG (and other `image`-supported formats)
#[cfg(feature = "raster")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

#[cfg(feature = "raster")]
#[async_trait]
impl PixelDecode for RasterDecoder {
    async fn decode(&self, bytes: &[u8]) -> DecodeResult<PixelBuffer> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| DecodeError::ImageDecode(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, rgba.into_raw())
    }
}
