//! Error types and context management for augmentation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all augmentation operations
#[derive(Debug)]
pub enum AugmentError {
    /// Transform or configuration parameter outside its valid domain
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pixel array shape doesn't meet the operation's requirements
    InvalidShape {
        /// Operation that rejected the array
        operation: &'static str,
        /// Description of the accepted shapes
        expected: String,
        /// Actual (rows, columns, channels) of the array
        actual: (usize, usize, usize),
    },

    /// Source bytes could not be decoded into a pixel array
    ImageDecode {
        /// Object or file the bytes came from
        origin: String,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Pixel array could not be encoded to the output format
    ImageEncode {
        /// Output name being produced
        name: String,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Failed to save a diagnostic image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Object storage read or write failed
    Storage {
        /// Bucket addressed by the operation
        bucket: String,
        /// Object key addressed by the operation
        key: String,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Storage event document could not be parsed
    MalformedEvent {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// One or more output writes failed while the rest were attempted
    PartialWrite {
        /// Number of outputs the sink tried to write
        attempted: usize,
        /// Output names paired with the error that stopped them
        failures: Vec<(String, Box<AugmentError>)>,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AugmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidShape {
                operation,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid image shape for {operation}: expected {expected}, got {}x{}x{}",
                    actual.0, actual.1, actual.2
                )
            }
            Self::ImageDecode { origin, source } => {
                write!(f, "Failed to decode image '{origin}': {source}")
            }
            Self::ImageEncode { name, source } => {
                write!(f, "Failed to encode image '{name}': {source}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Storage {
                bucket,
                key,
                operation,
                source,
            } => {
                write!(f, "Storage error during {operation} of '{bucket}/{key}': {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::MalformedEvent { source } => {
                write!(f, "Malformed storage event: {source}")
            }
            Self::PartialWrite {
                attempted,
                failures,
            } => {
                write!(f, "{} of {attempted} output writes failed", failures.len())?;
                if let Some((name, error)) = failures.first() {
                    write!(f, " (first: '{name}': {error})")?;
                }
                Ok(())
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AugmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. }
            | Self::ImageEncode { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::Storage { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::MalformedEvent { source } => Some(source),
            Self::PartialWrite { failures, .. } => failures
                .first()
                .map(|(_, error)| error.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

/// Convenience type alias for augmentation results
pub type Result<T> = std::result::Result<T, AugmentError>;

/// Attaches object addressing to raw I/O failures at the storage boundary
pub trait WithObject<T> {
    /// Convert an I/O result into a storage error naming the object
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped as [`AugmentError::Storage`]
    fn for_object(self, bucket: &str, key: &str, operation: &'static str) -> Result<T>;
}

impl<T> WithObject<T> for std::io::Result<T> {
    fn for_object(self, bucket: &str, key: &str, operation: &'static str) -> Result<T> {
        self.map_err(|source| AugmentError::Storage {
            bucket: bucket.to_string(),
            key: key.to_string(),
            operation,
            source,
        })
    }
}

impl From<serde_json::Error> for AugmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedEvent { source: err }
    }
}

impl From<ndarray::ShapeError> for AugmentError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Computation {
            operation: "array reshape",
            reason: err.to_string(),
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AugmentError {
    AugmentError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid shape error from an array's `(rows, columns, channels)`
pub fn invalid_shape(
    operation: &'static str,
    expected: &impl ToString,
    actual: (usize, usize, usize),
) -> AugmentError {
    AugmentError::InvalidShape {
        operation,
        expected: expected.to_string(),
        actual,
    }
}
