//! # PixelPong Visualizer
//!
//! Renders grid snapshots onto a pixel-accurate raster canvas.
//! Chooses a per-cell pixel size from a fixed visual budget, paints colored
//! cells over a faint reference grid and exports the result as PNG.

pub mod canvas;
pub mod layout;
pub mod renderer;

pub use canvas::Canvas;
pub use layout::{CanvasLayout, DEFAULT_BUDGET, DEFAULT_MAX_CELL, DEFAULT_MIN_CELL};
pub use renderer::CanvasRenderer;
