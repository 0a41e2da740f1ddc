//! Error handling for PixelPong
//!
//! Provides error types for all layers of the application:
//! - Transport errors (remote grid service requests and responses)
//! - Render errors (raster surface allocation and export)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Sampled validation is not an error; see
//! [`ApproximationNotice`](crate::validation::ApproximationNotice).

use thiserror::Error;

/// Transport error type
///
/// Represents failures talking to the remote grid service, including
/// responses that arrive but cannot be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be sent or the connection dropped
    #[error("Request to {endpoint} failed: {reason}")]
    Request {
        /// The endpoint that was requested.
        endpoint: String,
        /// The reason the request failed.
        reason: String,
    },

    /// The service answered with a non-success status code
    #[error("{endpoint} returned HTTP {code}")]
    HttpStatus {
        /// The endpoint that was requested.
        endpoint: String,
        /// The HTTP status code.
        code: u16,
    },

    /// The request did not complete in time
    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout {
        /// The endpoint that was requested.
        endpoint: String,
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// The response body was not valid or lacked a required field
    #[error("Malformed response from {endpoint}: {reason}")]
    Malformed {
        /// The endpoint that produced the response.
        endpoint: String,
        /// What was wrong with the body.
        reason: String,
    },

    /// A cell was reported outside the configured grid
    #[error("Cell ({x}, {y}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Column of the offending cell.
        x: u32,
        /// Row of the offending cell.
        y: u32,
        /// Configured row count.
        rows: u32,
        /// Configured column count.
        cols: u32,
    },

    /// The service reports a different grid size than the one being polled
    #[error("Remote grid has {actual} cells, expected {expected}")]
    GridMismatch {
        /// Cell count of the configured grid.
        expected: u64,
        /// Cell count reported by the service.
        actual: u64,
    },
}

impl TransportError {
    /// Build a malformed-response error
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        TransportError::Malformed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by the response content rather than the link
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            TransportError::Malformed { .. }
                | TransportError::OutOfBounds { .. }
                | TransportError::GridMismatch { .. }
        )
    }
}

/// Render error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The raster surface could not be allocated
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceAllocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Writing the rendered image failed
    #[error("Failed to export image: {reason}")]
    Export {
        /// The reason the export failed.
        reason: String,
    },
}

/// Main error type for PixelPong
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a transport error
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a render error
    pub fn is_render_error(&self) -> bool {
        matches!(self, Error::Render(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::HttpStatus {
            endpoint: "status".to_string(),
            code: 502,
        };
        assert_eq!(err.to_string(), "status returned HTTP 502");

        let err = TransportError::OutOfBounds {
            x: 7,
            y: 1,
            rows: 5,
            cols: 5,
        };
        assert_eq!(err.to_string(), "Cell (7, 1) is outside the 5x5 grid");
    }

    #[test]
    fn test_protocol_error_classification() {
        assert!(TransportError::malformed("ui", "missing field `image`").is_protocol_error());
        assert!(!TransportError::Timeout {
            endpoint: "status".to_string(),
            timeout_ms: 30_000,
        }
        .is_protocol_error());
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = TransportError::malformed("ui", "bad").into();
        assert!(err.is_transport_error());

        let err: Error = RenderError::SurfaceAllocation {
            width: 0,
            height: 0,
        }
        .into();
        assert!(err.is_render_error());
    }
}
