use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to bring a vectorizer or classifier artifact into memory.
///
/// Every variant is fatal: a detector cannot be constructed without both artifacts.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The artifact file is missing or unreadable.
    #[error("cannot read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The artifact bytes could not be decoded in the expected format.
    #[error("cannot decode artifact {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    /// The artifact decoded but its contents are inconsistent.
    #[error("corrupt artifact: {0}")]
    Corrupt(String),

    /// Vectorizer and classifier were trained on different feature spaces.
    #[error("vectorizer produces {vectorizer} features but classifier expects {classifier}")]
    DimensionMismatch { vectorizer: usize, classifier: usize },
}

/// Errors surfaced by [`ScamDetector`](crate::detector::ScamDetector).
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Empty or whitespace-only transcript.
    #[error("input text is empty")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_converts_into_detector_error() {
        let err: DetectorError = LoadError::Corrupt("bad idf".to_string()).into();
        assert!(matches!(err, DetectorError::Load(LoadError::Corrupt(_))));
        assert_eq!(err.to_string(), "corrupt artifact: bad idf");
    }

    #[test]
    fn test_io_error_message_names_path() {
        let err = LoadError::Io {
            path: PathBuf::from("ml_model/model.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("ml_model/model.json"));
    }
}
