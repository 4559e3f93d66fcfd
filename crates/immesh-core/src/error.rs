//! Error types for component assembly

use thiserror::Error;

use immesh_io::{DecodeError, ParseError};

use crate::data_type::DataType;

/// Errors that abort an assembly pass
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// No column classified as ComponentTags; grouping is impossible
    #[error("No component tag column found in the dataset")]
    MissingTagColumn,

    /// A binary payload failed to decode under the Abort policy
    #[error("Failed to decode {data_type:?} for component '{tag}': {source}")]
    Decode {
        tag: String,
        data_type: DataType,
        #[source]
        source: DecodeError,
    },

    /// A text cell failed to parse; never silently coerced
    #[error("Failed to parse {data_type:?} for component '{tag}': {source}")]
    Parse {
        tag: String,
        data_type: DataType,
        #[source]
        source: ParseError,
    },
}

/// Result type for assembly operations
pub type AssemblyResult<T> = Result<T, AssemblyError>;
