//! Metadata collection errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    /// Strict collection found an error record in an exported symbol.
    #[error("{message}")]
    InvalidMetadata {
        file_name: String,
        symbol: String,
        message: String,
    },

    /// A transformer asked for metadata after its cache was dropped.
    #[error("metadata cache was released before '{file_name}' was collected")]
    CacheReleased { file_name: String },
}

impl MetadataError {
    pub fn file_name(&self) -> &str {
        match self {
            MetadataError::InvalidMetadata { file_name, .. }
            | MetadataError::CacheReleased { file_name } => file_name,
        }
    }
}
