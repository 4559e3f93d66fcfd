//! immesh-core - Model-data decoding pipeline
//!
//! Turns a columnar dataset (plain-text numeric cells or base64-encoded
//! raster payloads) into strongly-typed geometric components for a
//! rendering collaborator.
//!
//! # Key Components
//!
//! - **DataType**: closed classification of column semantics, with one
//!   capability table driving decode path, tuple arity, and rescaling
//! - **TagGroups**: partition of row indices by component tag, in
//!   discovery order
//! - **Component**: the assembled geometry/field bundle for one tag
//! - **assemble**: one concurrent decoding pass over a dataset
//! - **ModelSession**: update lifecycle with a stale-result guard
//!
//! # Decode paths
//!
//! The capability table selects one of two paths per data type:
//!
//! - **Text**: whitespace/semicolon separated numeric cells
//!   (`immesh_io::text`)
//! - **Binary**: base64 raster payloads packing one u32 per RGBA pixel
//!   (`immesh_io::codec`), decoded through a pluggable [`PixelDecode`]
//!   backend — the pipeline's only suspension point

pub mod assembler;
pub mod column;
pub mod component;
pub mod data_type;
pub mod error;
pub mod grouping;
pub mod render;
pub mod session;

pub use assembler::*;
pub use column::*;
pub use component::*;
pub use data_type::*;
pub use error::*;
pub use grouping::*;
pub use session::*;

pub use immesh_io::{HighlightLocation, PixelBuffer, PixelDecode, RowSet, Vec3d};

#[cfg(feature = "raster")]
pub use immesh_io::RasterDecoder;

// render module exports the collaborator seam, access via render:: prefix
