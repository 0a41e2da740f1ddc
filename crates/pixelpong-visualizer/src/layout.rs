//! Cell-size policy for mapping a logical grid onto a fixed visual budget.

use pixelpong_core::GridConfig;
use serde::{Deserialize, Serialize};

/// Longest surface axis the layout aims for, in pixels
pub const DEFAULT_BUDGET: u32 = 600;
/// Smallest cell edge, keeps every cell visible
pub const DEFAULT_MIN_CELL: u32 = 2;
/// Largest cell edge
pub const DEFAULT_MAX_CELL: u32 = 10;

/// Sizing rules for the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasLayout {
    /// Target extent of the longer axis
    pub budget: u32,
    /// Lower clamp for the cell edge
    pub min_cell: u32,
    /// Upper clamp for the cell edge
    pub max_cell: u32,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            min_cell: DEFAULT_MIN_CELL,
            max_cell: DEFAULT_MAX_CELL,
        }
    }
}

impl CanvasLayout {
    /// Edge length of one cell: `clamp(min, max, budget / max(M, N))`
    ///
    /// The division rounds down to whole pixels, so the surface may fall short
    /// of the budget (a 250-wide grid gets 2px cells and a 500px surface).
    pub fn cell_size(&self, config: GridConfig) -> u32 {
        let fitted = self.budget / config.longest_axis();
        fitted.clamp(self.min_cell, self.max_cell.max(self.min_cell))
    }

    /// Surface size `(N*s, M*s)`, or `None` if it overflows `u32`
    pub fn surface_size(&self, config: GridConfig) -> Option<(u32, u32)> {
        let cell = self.cell_size(config);
        let width = config.cols.checked_mul(cell)?;
        let height = config.rows.checked_mul(cell)?;
        Some((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: u32, cols: u32) -> GridConfig {
        GridConfig::new(rows, cols).unwrap()
    }

    #[test]
    fn test_small_grid_hits_max_cell() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.cell_size(grid(5, 5)), 10);
        assert_eq!(layout.surface_size(grid(5, 5)), Some((50, 50)));
    }

    #[test]
    fn test_huge_grid_hits_min_cell() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.cell_size(grid(1000, 1000)), 2);
        assert_eq!(layout.surface_size(grid(1000, 1000)), Some((2000, 2000)));
    }

    #[test]
    fn test_fitted_between_clamps() {
        let layout = CanvasLayout::default();
        // 600 / 120 = 5
        assert_eq!(layout.cell_size(grid(120, 30)), 5);
        assert_eq!(layout.surface_size(grid(120, 30)), Some((150, 600)));
        // 600 / 250 rounds down to 2
        assert_eq!(layout.cell_size(grid(10, 250)), 2);
        assert_eq!(layout.surface_size(grid(10, 250)), Some((500, 20)));
    }

    #[test]
    fn test_uses_longer_axis() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.cell_size(grid(2, 200)), 3);
        assert_eq!(layout.cell_size(grid(200, 2)), 3);
    }

    #[test]
    fn test_overflowing_surface() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.surface_size(grid(u32::MAX, 1)), None);
    }
}
