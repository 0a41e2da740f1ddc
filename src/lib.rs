//! # PixelPong
//!
//! A headless client for the ping-pong pixel grid generator. It asks the
//! remote service to color an M×N grid, polls its progress, renders every
//! snapshot to a raster canvas and, once generation finishes, checks that no
//! two cells share a color.
//!
//! ## Architecture
//!
//! PixelPong is organized as a workspace with multiple crates:
//!
//! 1. **pixelpong-core** - Grid model, pixel store, uniqueness validator, errors, events
//! 2. **pixelpong-visualizer** - Cell-size layout, raster canvas, PNG export
//! 3. **pixelpong-communication** - Grid service client, snapshot fetcher, polling controller
//! 4. **pixelpong-settings** - Configuration file handling
//! 5. **pixelpong** - Command-line binary that wires the crates together

pub mod cli;

pub use pixelpong_core::{
    ApproximationNotice, Cell, CellColor, Coord, Error, EventDispatcher, GridConfig, PixelStore,
    PollEvent, RenderError, Result, RunPhase, RunStatus, SamplingPolicy, Snapshot,
    TransportError, UniquenessValidator, ValidationResult,
};

pub use pixelpong_communication::{
    launch, GridService, HttpGridService, PollingController, PollingOptions, SnapshotFetcher,
    StatusReport,
};

pub use pixelpong_visualizer::{Canvas, CanvasLayout, CanvasRenderer};

pub use pixelpong_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Honours `RUST_LOG`; without it everything at `info` and above is shown.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
