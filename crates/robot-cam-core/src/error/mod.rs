use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recording and protocol errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Datagram too short to hold a status packet.
    #[error("Malformed status packet: {len} bytes, expected at least {expected} {location}")]
    MalformedPacket {
        /// Number of bytes received.
        len: usize,
        /// Minimum number of bytes required.
        expected: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording file could not be created.
    #[error("Failed to open recording {path:?}: {source} {location}")]
    RecordingOpen {
        /// Path of the recording file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Appending a chunk to the recording file failed.
    #[error("Failed to write recording {path:?}: {source} {location}")]
    RecordingWrite {
        /// Path of the recording file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Flushing the recording file on close failed.
    #[error("Failed to close recording {path:?}: {source} {location}")]
    RecordingClose {
        /// Path of the recording file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
