//! Grid renderer
//! Paints a snapshot onto a [`Canvas`] using tiny-skia.
//!
//! Every render resizes the surface to the grid, clears it to the background,
//! draws the faint reference grid and then fills one square per colored cell.
//! Cells are drawn last so the grid never alters their colors.

use crate::canvas::Canvas;
use crate::layout::CanvasLayout;
use pixelpong_core::{GridConfig, RenderError, Snapshot};
use tiny_skia::{Color, Paint, PathBuilder, Rect, Stroke, Transform};

fn background_color() -> Color {
    Color::from_rgba8(240, 240, 240, 255)
}
fn grid_color() -> Color {
    Color::from_rgba8(200, 200, 200, 51)
}

/// Draws snapshots onto a raster canvas
#[derive(Debug, Clone, Copy)]
pub struct CanvasRenderer {
    layout: CanvasLayout,
    grid_overlay: bool,
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new(CanvasLayout::default(), true)
    }
}

impl CanvasRenderer {
    /// Create a renderer
    pub fn new(layout: CanvasLayout, grid_overlay: bool) -> Self {
        Self {
            layout,
            grid_overlay,
        }
    }

    /// Layout used to size cells
    pub fn layout(&self) -> CanvasLayout {
        self.layout
    }

    /// Render onto a freshly allocated canvas
    pub fn render(&self, snapshot: &Snapshot, config: GridConfig) -> Result<Canvas, RenderError> {
        let (width, height, cell) = self.dimensions(config)?;
        let mut canvas = Canvas::allocate(config, cell, width, height)?;
        self.paint(&mut canvas, snapshot);
        Ok(canvas)
    }

    /// Render onto an existing canvas, resizing it when the grid changed
    pub fn render_into(
        &self,
        canvas: &mut Canvas,
        snapshot: &Snapshot,
        config: GridConfig,
    ) -> Result<(), RenderError> {
        let (width, height, cell) = self.dimensions(config)?;
        canvas.reshape(config, cell, width, height)?;
        self.paint(canvas, snapshot);
        Ok(())
    }

    fn dimensions(&self, config: GridConfig) -> Result<(u32, u32, u32), RenderError> {
        let cell = self.layout.cell_size(config);
        let (width, height) =
            self.layout
                .surface_size(config)
                .ok_or(RenderError::SurfaceAllocation {
                    width: config.cols.saturating_mul(cell),
                    height: config.rows.saturating_mul(cell),
                })?;
        Ok((width, height, cell))
    }

    fn paint(&self, canvas: &mut Canvas, snapshot: &Snapshot) {
        let config = canvas.config();
        let cell = canvas.cell_size() as f32;
        let (width, height) = (canvas.width() as f32, canvas.height() as f32);
        let pixmap = canvas.pixmap_mut();

        pixmap.fill(background_color());

        if self.grid_overlay {
            let mut pb = PathBuilder::new();
            for i in 0..=config.cols {
                let x = i as f32 * cell;
                pb.move_to(x, 0.0);
                pb.line_to(x, height);
            }
            for i in 0..=config.rows {
                let y = i as f32 * cell;
                pb.move_to(0.0, y);
                pb.line_to(width, y);
            }
            if let Some(path) = pb.finish() {
                let mut paint = Paint::default();
                paint.set_color(grid_color());
                paint.anti_alias = true;
                let stroke = Stroke {
                    width: 0.5,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }

        let mut paint = Paint::default();
        paint.anti_alias = false;
        let mut painted = 0;
        for c in snapshot.iter() {
            if !config.contains(c.coord()) {
                tracing::debug!("Skipping cell ({}, {}) outside {} grid", c.x, c.y, config);
                continue;
            }
            paint.set_color_rgba8(c.color.r, c.color.g, c.color.b, 255);
            if let Some(rect) = Rect::from_xywh(c.x as f32 * cell, c.y as f32 * cell, cell, cell) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                painted += 1;
            }
        }
        canvas.set_painted(painted);

        tracing::trace!(
            "Rendered {} cells on {}x{} canvas, cell size {}",
            painted,
            width,
            height,
            cell
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelpong_core::{Cell, CellColor};

    const BACKGROUND: [u8; 4] = [240, 240, 240, 255];

    fn grid(rows: u32, cols: u32) -> GridConfig {
        GridConfig::new(rows, cols).unwrap()
    }

    /// Center pixel of a cell
    fn center(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        let s = canvas.cell_size();
        canvas.pixel(x * s + s / 2, y * s + s / 2).unwrap()
    }

    #[test]
    fn test_surface_matches_grid() {
        let renderer = CanvasRenderer::default();
        let canvas = renderer.render(&Snapshot::default(), grid(3, 7)).unwrap();
        assert_eq!(canvas.cell_size(), 10);
        assert_eq!((canvas.width(), canvas.height()), (70, 30));
    }

    #[test]
    fn test_cells_painted_exactly() {
        let renderer = CanvasRenderer::default();
        let color = CellColor::new(10, 20, 30);
        let snapshot = Snapshot::from_cells(vec![Cell::new(2, 3, color)]);
        let canvas = renderer.render(&snapshot, grid(5, 5)).unwrap();

        // every pixel of the cell, edges included, carries the cell color
        for py in 30..40 {
            for px in 20..30 {
                assert_eq!(canvas.pixel(px, py), Some([10, 20, 30, 255]));
            }
        }
        assert_eq!(center(&canvas, 0, 0), BACKGROUND);
        assert_eq!(canvas.painted(), 1);
        assert_eq!(canvas.caption(), "Pixels: 1 / 25 | Grid: 5×5");
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = CanvasRenderer::default();
        let snapshot = Snapshot::from_cells(
            (0..4).map(|i| Cell::new(i, i, CellColor::new(i as u8 * 40, 0, 0))),
        );
        let first = renderer.render(&snapshot, grid(4, 4)).unwrap();
        let second = renderer.render(&snapshot, grid(4, 4)).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_render_into_drops_previous_paint() {
        let renderer = CanvasRenderer::default();
        let red = CellColor::new(255, 0, 0);
        let big = Snapshot::from_cells((0..20).map(|i| Cell::new(i, 0, red)));
        let mut canvas = renderer.render(&big, grid(20, 20)).unwrap();
        assert_eq!(canvas.width(), 200);

        let small = Snapshot::from_cells(vec![Cell::new(1, 1, CellColor::new(0, 0, 255))]);
        renderer.render_into(&mut canvas, &small, grid(2, 2)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (20, 20));
        assert_eq!(center(&canvas, 0, 0), BACKGROUND);
        assert_eq!(center(&canvas, 1, 1), [0, 0, 255, 255]);

        // same dimensions, fewer cells: old cells must be cleared
        renderer
            .render_into(&mut canvas, &Snapshot::default(), grid(2, 2))
            .unwrap();
        assert_eq!(center(&canvas, 1, 1), BACKGROUND);
        assert_eq!(canvas.painted(), 0);
    }

    #[test]
    fn test_grid_overlay_only_touches_background() {
        let plain = CanvasRenderer::new(CanvasLayout::default(), false);
        let overlay = CanvasRenderer::default();
        let snapshot = Snapshot::from_cells(vec![Cell::new(0, 0, CellColor::new(9, 9, 9))]);

        let without = plain.render(&snapshot, grid(3, 3)).unwrap();
        let with = overlay.render(&snapshot, grid(3, 3)).unwrap();

        assert_eq!(without.pixel(9, 9), Some([9, 9, 9, 255]));
        assert_eq!(with.pixel(9, 9), Some([9, 9, 9, 255]));
        assert_ne!(without.data(), with.data());
    }

    #[test]
    fn test_large_grid_uses_floor_cell_size() {
        let renderer = CanvasRenderer::default();
        let canvas = renderer.render(&Snapshot::default(), grid(1000, 1000)).unwrap();
        assert_eq!(canvas.cell_size(), 2);
        assert_eq!((canvas.width(), canvas.height()), (2000, 2000));
    }
}
