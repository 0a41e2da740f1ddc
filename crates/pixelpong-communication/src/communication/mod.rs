//! Grid service interface
//!
//! The remote generator exposes four operations: configure the grid, start
//! generation, report progress and return the full grid content. This module
//! defines the trait the polling layer consumes and the HTTP implementation.

pub mod http;
pub mod wire;

use async_trait::async_trait;
use pixelpong_core::{Cell, GridConfig, TransportError};

pub use http::HttpGridService;

/// Progress report returned by the service's status operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    /// Cells colored so far
    pub colored_count: u64,
    /// Cells the service believes the grid has
    pub total_count: u64,
    /// Whether generation has finished
    pub done: bool,
}

/// Remote grid generation service
///
/// Implementations must be cheap to share across tasks.
#[async_trait]
pub trait GridService: Send + Sync {
    /// Declare the grid dimensions for the next run
    async fn configure(&self, config: GridConfig) -> Result<(), TransportError>;

    /// Start coloring; returns once the service accepted the request
    async fn generate(&self, config: GridConfig) -> Result<(), TransportError>;

    /// Current progress
    async fn status(&self, config: GridConfig) -> Result<StatusReport, TransportError>;

    /// Every colored cell, in one response
    async fn content(&self, config: GridConfig) -> Result<Vec<Cell>, TransportError>;
}
