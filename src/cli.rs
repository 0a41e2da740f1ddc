//! Command-line arguments and how they combine with the configuration file.

use anyhow::Context;
use clap::Parser;
use pixelpong_core::GridConfig;
use pixelpong_settings::Config;
use pixelpong_visualizer::CanvasLayout;
use std::path::PathBuf;

/// Command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "pixelpong",
    version,
    about = "Watch the pixel grid generator color a grid and check every color is unique"
)]
pub struct Cli {
    /// Grid rows (M); values below 1 are treated as 1
    #[arg(
        short = 'm',
        long = "rows",
        default_value = "5",
        value_name = "M",
        allow_negative_numbers = true
    )]
    pub rows: i64,

    /// Grid columns (N); values below 1 are treated as 1
    #[arg(
        short = 'n',
        long = "cols",
        default_value = "5",
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub cols: i64,

    /// Configuration file (.toml or .json)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the grid service API
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Delay between polls
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Where to write the finished canvas
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not draw the reference grid
    #[arg(long = "no-grid")]
    pub no_grid: bool,
}

impl Cli {
    /// Grid requested on the command line
    pub fn grid_config(&self) -> anyhow::Result<GridConfig> {
        let rows = clamp_dimension(self.rows);
        let cols = clamp_dimension(self.cols);
        GridConfig::new(rows, cols).with_context(|| format!("invalid grid {}x{}", rows, cols))
    }

    /// Load the configuration file and apply command-line overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Config::load_or_default()?,
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite configuration fields given on the command line
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.connection.base_url = url.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.polling.interval_ms = interval_ms;
        }
        if let Some(output) = &self.output {
            config.render.output_path = output.clone();
        }
        if self.no_grid {
            config.render.grid_overlay = false;
        }
    }
}

/// Canvas layout described by the render settings
pub fn canvas_layout(config: &Config) -> CanvasLayout {
    CanvasLayout {
        budget: config.render.budget,
        min_cell: config.render.min_cell_size,
        max_cell: config.render.max_cell_size,
    }
}

fn clamp_dimension(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}
