//! immesh-io - Cell decoding for immesh
//!
//! Pure decoding functions turning dataset cells into typed numeric
//! sequences, with no knowledge of components or tags:
//!
//! - **Text transforms**: whitespace/semicolon separated numeric cells
//! - **Binary codec**: base64-encoded raster payloads packing one u32 per
//!   RGBA pixel
//! - **PixelDecode**: the backend abstraction the codec uses to turn image
//!   bytes into pixels (default backend via the `raster` feature)

pub mod codec;
pub mod error;
pub mod pixel;
pub mod text;
pub mod types;

pub use codec::*;
pub use error::*;
pub use pixel::*;
pub use text::*;
pub use types::*;
