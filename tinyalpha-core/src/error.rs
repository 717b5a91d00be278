//! Error types for TinyAlpha operations.
//!
//! Every failure in the codec is fatal for the current encode or decode call:
//! nothing is retried and nothing is downgraded. Each variant carries enough
//! context (expected vs. found, offsets, paths) to diagnose the problem.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for TinyAlpha operations.
#[derive(Debug, Error)]
pub enum TalError {
    /// I/O error from the file system or an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source raster has more distinct non-transparent colors than fit.
    #[error("Too many colors: at least {count} distinct colors, at most {max} are supported")]
    TooManyColors {
        /// Number of distinct colors seen when the limit was hit.
        count: usize,
        /// Maximum number of colors allowed.
        max: usize,
    },

    /// The destination path is occupied and overwriting was not requested.
    #[error("File already exists: {}. Pass -o to overwrite it", path.display())]
    FileAlreadyExists {
        /// The occupied destination path.
        path: PathBuf,
    },

    /// Header magic bytes do not match the TAL signature.
    #[error("Unrecognized signature: expected {expected:02x?}, found {found:02x?}")]
    UnrecognizedSignature {
        /// Expected signature bytes.
        expected: Vec<u8>,
        /// Signature bytes actually found.
        found: Vec<u8>,
    },

    /// The version byte is not supported by this decoder.
    #[error("Version mismatch: expected version {expected}, found {found}")]
    VersionMismatch {
        /// Supported version.
        expected: u8,
        /// Version found in the header.
        found: u8,
    },

    /// Image dimensions or buffer size out of bounds.
    #[error("Image size error: {message}")]
    ImageSize {
        /// Description of the size problem.
        message: String,
    },

    /// Header or stream contents are inconsistent with the buffer.
    #[error("Corrupt stream at offset {offset}: {message}")]
    CorruptStream {
        /// Byte offset (or bit position for bit-field errors) of the problem.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// A bit read was attempted past the end of its backing buffer.
    #[error("Bit read out of range at bit position {position} (buffer holds {len} bytes)")]
    OutOfRange {
        /// Bit position of the failed read.
        position: u64,
        /// Length of the backing buffer in bytes.
        len: usize,
    },

    /// Codec configuration outside the limits of the format.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

/// Fieldless classification of [`TalError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`TalError::Io`].
    Io,
    /// See [`TalError::TooManyColors`].
    TooManyColors,
    /// See [`TalError::FileAlreadyExists`].
    FileAlreadyExists,
    /// See [`TalError::UnrecognizedSignature`].
    UnrecognizedSignature,
    /// See [`TalError::VersionMismatch`].
    VersionMismatch,
    /// See [`TalError::ImageSize`].
    ImageSize,
    /// See [`TalError::CorruptStream`].
    CorruptStream,
    /// See [`TalError::OutOfRange`].
    OutOfRange,
    /// See [`TalError::InvalidConfig`].
    InvalidConfig,
}

/// Result type alias for TinyAlpha operations.
pub type Result<T> = std::result::Result<T, TalError>;

impl TalError {
    /// Create a too-many-colors error.
    pub fn too_many_colors(count: usize, max: usize) -> Self {
        Self::TooManyColors { count, max }
    }

    /// Create a file-already-exists error.
    pub fn file_already_exists(path: impl Into<PathBuf>) -> Self {
        Self::FileAlreadyExists { path: path.into() }
    }

    /// Create an unrecognized signature error.
    pub fn unrecognized_signature(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::UnrecognizedSignature {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a version mismatch error.
    pub fn version_mismatch(expected: u8, found: u8) -> Self {
        Self::VersionMismatch { expected, found }
    }

    /// Create an image size error.
    pub fn image_size(message: impl Into<String>) -> Self {
        Self::ImageSize {
            message: message.into(),
        }
    }

    /// Create a corrupt stream error.
    pub fn corrupt_stream(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptStream {
            offset,
            message: message.into(),
        }
    }

    /// Create an out-of-range bit read error.
    pub fn out_of_range(position: u64, len: usize) -> Self {
        Self::OutOfRange { position, len }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::TooManyColors { .. } => ErrorKind::TooManyColors,
            Self::FileAlreadyExists { .. } => ErrorKind::FileAlreadyExists,
            Self::UnrecognizedSignature { .. } => ErrorKind::UnrecognizedSignature,
            Self::VersionMismatch { .. } => ErrorKind::VersionMismatch,
            Self::ImageSize { .. } => ErrorKind::ImageSize,
            Self::CorruptStream { .. } => ErrorKind::CorruptStream,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TalError::unrecognized_signature(vec![0x08, 0x09, 0x03], vec![0x07, 0x09, 0x03]);
        assert!(err.to_string().contains("Unrecognized signature"));
        assert!(err.to_string().contains("07"));

        let err = TalError::too_many_colors(257, 256);
        assert!(err.to_string().contains("257"));

        let err = TalError::file_already_exists("out.tal");
        assert!(err.to_string().contains("out.tal"));
        assert!(err.to_string().contains("-o"));

        let err = TalError::version_mismatch(1, 2);
        assert!(err.to_string().contains("expected version 1, found 2"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            TalError::corrupt_stream(12, "bad").kind(),
            ErrorKind::CorruptStream
        );
        assert_eq!(TalError::out_of_range(80, 10).kind(), ErrorKind::OutOfRange);
        assert_eq!(TalError::image_size("too big").kind(), ErrorKind::ImageSize);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TalError = io_err.into();
        assert!(matches!(err, TalError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
