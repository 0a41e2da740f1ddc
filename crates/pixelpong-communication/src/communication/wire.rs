//! JSON bodies exchanged with the grid service.
//!
//! Decoding is strict: a body that is not JSON, lacks a required field or
//! carries an out-of-range value becomes [`TransportError::Malformed`].
//! Fields the client does not use are ignored.

use super::StatusReport;
use pixelpong_core::{Cell, GridConfig, TransportError};
use serde::{Deserialize, Serialize};

/// Body of the configure and generate requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridRequest {
    /// Rows
    pub m: u32,
    /// Columns
    pub n: u32,
}

impl From<GridConfig> for GridRequest {
    fn from(config: GridConfig) -> Self {
        Self {
            m: config.rows,
            n: config.cols,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    colored_pixels: u64,
    total_pixels: u64,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    image: Vec<Cell>,
}

/// Decode a status response body
pub fn decode_status(endpoint: &str, body: &[u8]) -> Result<StatusReport, TransportError> {
    let body: StatusBody = serde_json::from_slice(body)
        .map_err(|e| TransportError::malformed(endpoint, e.to_string()))?;
    Ok(StatusReport {
        colored_count: body.colored_pixels,
        total_count: body.total_pixels,
        done: body.done,
    })
}

/// Decode a content response body
pub fn decode_content(endpoint: &str, body: &[u8]) -> Result<Vec<Cell>, TransportError> {
    let body: ContentBody = serde_json::from_slice(body)
        .map_err(|e| TransportError::malformed(endpoint, e.to_string()))?;
    Ok(body.image)
}
