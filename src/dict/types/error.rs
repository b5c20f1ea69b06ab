//! Custom error types for the mobidict crate.

use thiserror::Error;

use super::document::DocumentError;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum DictError {
    /// The document adapter failed to open or parse the dictionary file.
    /// The adapter's error is propagated unchanged.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// No usable headwords survived index construction.
    #[error("Corrupt index: no usable headwords found in the orthographic index")]
    CorruptIndex,

    /// A headword or link target is not present in the index.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A referenced resource is missing or could not be decoded.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A substring completion filter failed to compile.
    #[error("Invalid completion pattern: {0}")]
    InvalidCompletionPattern(String),

    /// No collation data could be loaded, not even the root order.
    #[error("Collation unavailable: {0}")]
    Collation(String),

    /// A background open finished after a newer open was requested.
    #[error("Open request #{generation} was superseded by a newer request")]
    Superseded { generation: u64 },

    /// A background open thread exited without reporting a result.
    #[error("Background open thread exited without reporting a result")]
    Disconnected,

    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

/// A convenience `Result` type alias using the crate's `DictError` type.
pub type Result<T> = std::result::Result<T, DictError>;
