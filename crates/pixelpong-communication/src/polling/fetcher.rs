//! One polling tick's remote reads
//!
//! Reads status first and content second, then checks that the pair
//! describes the grid being polled.

use crate::communication::{GridService, StatusReport};
use pixelpong_core::{Cell, GridConfig, TransportError};
use std::sync::Arc;

/// Status and content read during a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    /// Progress report
    pub status: StatusReport,
    /// Every colored cell, all inside the grid
    pub cells: Vec<Cell>,
}

/// Performs the two reads of a polling tick
#[derive(Clone)]
pub struct SnapshotFetcher {
    service: Arc<dyn GridService>,
}

impl SnapshotFetcher {
    /// Create a fetcher over `service`
    pub fn new(service: Arc<dyn GridService>) -> Self {
        Self { service }
    }

    /// Fetch a consistent status/content pair for `config`
    pub async fn fetch(&self, config: GridConfig) -> Result<GridSnapshot, TransportError> {
        let status = self.service.status(config).await?;
        if status.total_count != config.cell_count() {
            return Err(TransportError::GridMismatch {
                expected: config.cell_count(),
                actual: status.total_count,
            });
        }

        let cells = self.service.content(config).await?;
        if let Some(cell) = cells.iter().find(|cell| !config.contains(cell.coord())) {
            return Err(TransportError::OutOfBounds {
                x: cell.x,
                y: cell.y,
                rows: config.rows,
                cols: config.cols,
            });
        }

        Ok(GridSnapshot { status, cells })
    }
}

/// Declare the grid and start the remote generator
///
/// Configure is always sent before generate. Nothing is polled here.
pub async fn launch(service: &dyn GridService, config: GridConfig) -> Result<(), TransportError> {
    tracing::info!("Configuring remote grid {}", config);
    service.configure(config).await?;
    service.generate(config).await?;
    tracing::info!("Remote generation started for {}", config);
    Ok(())
}
