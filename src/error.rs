//! Error types for chatmerge.

/// Errors that can occur while merging chat messages.
///
/// None of these escape [`crate::process_sbd_merge`]; the best-effort entry
/// points log them and hand back the input unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A loosely-typed record could not be read as a message.
    #[error("record {index} is not a chat message: {source}")]
    Record {
        /// Position of the record in the input batch.
        index: usize,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration JSON could not be decoded.
    #[error("invalid merge configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A turn slice with no messages reached the merger.
    #[error("turn {0} has no messages")]
    EmptyTurn(usize),
}

/// Result type for chatmerge operations.
pub type Result<T> = std::result::Result<T, Error>;
