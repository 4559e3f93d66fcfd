//! Error types for cell decoding

use thiserror::Error;

/// Errors raised while decoding a binary (base64 raster) payload
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The concatenated payload is not valid base64
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// The decoded bytes are not a decodable raster image
    #[error("Failed to decode raster image: {0}")]
    ImageDecode(String),

    /// A pixel buffer was constructed with a byte length that does not
    /// match its dimensions
    #[error("Pixel buffer size mismatch: {len} bytes for {width}x{height} RGBA")]
    BufferSize { len: usize, width: u32, height: u32 },
}

/// Errors raised while parsing plain-text cells
#[derive(Debug, Error)]
pub enum ParseError {
    /// A token that should be numeric failed to parse
    #[error("Invalid numeric token '{token}' at row {row}")]
    InvalidToken { row: usize, token: String },

    /// A highlight record did not have the expected field count
    #[error("Malformed highlight record at row {row}: expected 8 fields, got {fields}")]
    MalformedRecord { row: usize, fields: usize },
}

/// Result type for binary payload decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for text cell parsing
pub type ParseResult<T> = Result<T, ParseError>;
