//! Error types for dataset preparation

use seq2seq_vocab::VocabularyError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while preparing or batching a dataset
///
/// All of these are caller configuration or input errors; none is retried.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// No batch can be formed from the corpus
    #[error("batch size = {batch_size} cannot be larger than data size = {data_size}")]
    BatchSizeTooLarge { batch_size: usize, data_size: usize },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parallel source and target lists differ in length
    #[error("source list has {src} sequences but target list has {tgt}")]
    LengthMismatch { src: usize, tgt: usize },

    /// A corpus line is not a TAB-separated pair
    #[error("malformed record at {path:?} line {line}: expected a TAB-separated pair")]
    MalformedRecord { path: PathBuf, line: usize },

    /// The corpus file could not be read
    #[error("failed to read corpus {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Vocabulary construction or loading failed
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_display() {
        let err = DatasetError::BatchSizeTooLarge {
            batch_size: 11,
            data_size: 10,
        };
        assert_eq!(
            err.to_string(),
            "batch size = 11 cannot be larger than data size = 10"
        );
    }

    #[test]
    fn test_vocabulary_error_converts() {
        let err: DatasetError = VocabularyError::IndexNotFound(7).into();
        assert!(matches!(err, DatasetError::Vocabulary(_)));
        assert_eq!(err.to_string(), "Index not found in vocabulary: 7");
    }
}
