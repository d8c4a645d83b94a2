//! Archive build error types.

use thiserror::Error;

/// Result type alias for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that end an archive build.
///
/// Per-resource fetch failures are not represented here; they are absorbed
/// by the orchestrator.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Deflate level outside `0..=9`.
    #[error("compression level {0} is outside 0..=9")]
    InvalidCompressionLevel(i64),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The ZIP encoder rejected an entry or failed to write the trailer.
    #[error("zip encoder error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The receiving side of the sink went away (client disconnected).
    #[error("archive sink closed")]
    SinkClosed,

    /// The blocking encoder task panicked or was cancelled.
    #[error("archive encoder task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// An earlier failure left the encoder unusable.
    #[error("archive stream is unusable after an earlier failure")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert!(
            ArchiveError::InvalidCompressionLevel(11)
                .to_string()
                .contains("11")
        );
        assert_eq!(ArchiveError::SinkClosed.to_string(), "archive sink closed");
    }
}
