//! Raster surface holding the rendered grid.

use image::{Rgb, RgbImage};
use pixelpong_core::{GridConfig, RenderError};
use std::path::Path;
use tiny_skia::Pixmap;

/// Rendered grid surface
///
/// Sized `cols * cell_size` by `rows * cell_size` pixels.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
    config: GridConfig,
    cell_size: u32,
    painted: usize,
}

impl Canvas {
    pub(crate) fn allocate(
        config: GridConfig,
        cell_size: u32,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
        Ok(Self {
            pixmap,
            config,
            cell_size,
            painted: 0,
        })
    }

    /// Point the canvas at a new grid, reallocating only when the size changes
    pub(crate) fn reshape(
        &mut self,
        config: GridConfig,
        cell_size: u32,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if self.width() != width || self.height() != height {
            self.pixmap = Pixmap::new(width, height)
                .ok_or(RenderError::SurfaceAllocation { width, height })?;
        }
        self.config = config;
        self.cell_size = cell_size;
        self.painted = 0;
        Ok(())
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    pub(crate) fn set_painted(&mut self, painted: usize) {
        self.painted = painted;
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Edge length of one cell in pixels
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Grid this canvas was last rendered for
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Number of cells painted by the last render
    pub fn painted(&self) -> usize {
        self.painted
    }

    /// Raw RGBA bytes, premultiplied
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// RGBA value of a surface pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Footer text: painted cells, total cells and grid size
    pub fn caption(&self) -> String {
        format!(
            "Pixels: {} / {} | Grid: {}",
            self.painted,
            self.config.cell_count(),
            self.config
        )
    }

    /// Convert to an opaque RGB image
    pub fn to_rgb_image(&self) -> RgbImage {
        let width = self.width();
        let data = self.pixmap.data();
        RgbImage::from_fn(width, self.height(), |x, y| {
            let idx = ((y * width + x) * 4) as usize;
            // Background is opaque, so premultiplied equals straight RGB
            Rgb([data[idx], data[idx + 1], data[idx + 2]])
        })
    }

    /// Write the surface as a PNG file
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| RenderError::Export {
                reason: format!("{}: {}", path.display(), e),
            })?;
        tracing::info!("Saved {}x{} canvas to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}
