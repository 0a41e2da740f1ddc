//! # PixelPong Core
//!
//! Core types and algorithms for PixelPong.
//! Provides the grid data model, the pixel store that reconciles fetched
//! cells into snapshots, the color uniqueness validator, the error taxonomy
//! and the poll event dispatcher.

pub mod data;
pub mod error;
pub mod event;
pub mod store;
pub mod validation;

pub use data::{Cell, CellColor, Coord, GridConfig, RunPhase, RunStatus};

pub use error::{Error, RenderError, Result, TransportError};

pub use event::{EventDispatcher, PollEvent};

pub use store::{PixelStore, Snapshot};

pub use validation::{
    ApproximationNotice, SamplingPolicy, UniquenessValidator, ValidationResult,
    DEFAULT_EXHAUSTIVE_LIMIT, DEFAULT_SAMPLE_SIZE,
};
