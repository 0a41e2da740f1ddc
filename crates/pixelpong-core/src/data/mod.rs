//! Data models for grids, cells and run progress
//!
//! This module provides:
//! - Grid dimensions fixed for the lifetime of a run
//! - Cell coordinates with a row-major ordering
//! - Cell colors with a canonical `rgb(r,g,b)` form
//! - Run status and run phase as reported to callers

use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Dimensions of the grid being colored
///
/// `rows` is M (the y extent), `cols` is N (the x extent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows (M)
    pub rows: u32,
    /// Number of columns (N)
    pub cols: u32,
}

impl GridConfig {
    /// Create a grid configuration, rejecting empty dimensions
    pub fn new(rows: u32, cols: u32) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(Self { rows, cols })
    }

    /// Total number of cells, M×N
    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Longer of the two axes
    pub fn longest_axis(&self) -> u32 {
        self.rows.max(self.cols)
    }

    /// Check whether a coordinate lies inside the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }
}

impl fmt::Display for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.rows, self.cols)
    }
}

/// Cell coordinate on the grid
///
/// Ordered row-major: by `y` first, then `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column, in `[0, cols)`
    pub x: u32,
    /// Row, in `[0, rows)`
    pub y: u32,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// RGB color of a cell
///
/// Travels on the wire as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct CellColor {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl CellColor {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical string form used when comparing and reporting colors
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl From<[u8; 3]> for CellColor {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<CellColor> for [u8; 3] {
    fn from(color: CellColor) -> Self {
        [color.r, color.g, color.b]
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A colored cell as produced by the remote generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// Assigned color
    pub color: CellColor,
}

impl Cell {
    /// Create a new cell
    pub fn new(x: u32, y: u32, color: CellColor) -> Self {
        Self { x, y, color }
    }

    /// Coordinate key of this cell
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// Progress of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStatus {
    /// Cells colored so far
    pub colored_count: u64,
    /// Cells in the grid, M×N
    pub total_count: u64,
    /// Whether the generator has finished
    pub done: bool,
}

impl RunStatus {
    /// Fresh status for a run on `config`
    pub fn for_grid(config: GridConfig) -> Self {
        Self {
            colored_count: 0,
            total_count: config.cell_count(),
            done: false,
        }
    }

    /// Apply a newer report. `done` never reverts within a run.
    pub fn update(&mut self, colored_count: u64, done: bool) {
        self.colored_count = colored_count;
        self.done = self.done || done;
    }

    /// Completion percentage in `[0, 100]`
    pub fn progress_percent(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        (self.colored_count as f64 / self.total_count as f64 * 100.0).min(100.0)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.0}%){}",
            self.colored_count,
            self.total_count,
            self.progress_percent(),
            if self.done { " done" } else { "" }
        )
    }
}

/// Lifecycle of a polling run
///
/// `Idle → Running → Done` on the normal path, `Running → Failed` on a
/// transport error. `Done` and `Failed` hold until the next start.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunPhase {
    /// No run in progress
    #[default]
    Idle,
    /// Polling the remote service
    Running,
    /// Generator finished and validation ran
    Done,
    /// Polling stopped after a transport error
    Failed(TransportError),
}

impl RunPhase {
    /// Whether the phase only ends with a new start
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed(_))
    }

    /// Whether ticks are currently being scheduled
    pub fn is_running(&self) -> bool {
        matches!(self, RunPhase::Running)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Idle => write!(f, "Idle"),
            RunPhase::Running => write!(f, "Running"),
            RunPhase::Done => write!(f, "Done"),
            RunPhase::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}
