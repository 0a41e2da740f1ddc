//! Tests for exporting rendered canvases

use pixelpong_core::{Cell, CellColor, GridConfig, Snapshot};
use pixelpong_visualizer::{CanvasLayout, CanvasRenderer};
use tempfile::tempdir;

#[test]
fn test_png_round_trips_cell_colors() {
    let config = GridConfig::new(4, 6).unwrap();
    let snapshot = Snapshot::from_cells(vec![
        Cell::new(0, 0, CellColor::new(255, 0, 0)),
        Cell::new(5, 3, CellColor::new(0, 128, 255)),
    ]);
    let canvas = CanvasRenderer::default().render(&snapshot, config).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.png");
    canvas.save_png(&path).unwrap();

    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (60, 40));
    assert_eq!(image.get_pixel(5, 5).0, [255, 0, 0]);
    assert_eq!(image.get_pixel(55, 35).0, [0, 128, 255]);
    assert_eq!(image.get_pixel(25, 15).0, [240, 240, 240]);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let config = GridConfig::new(1, 1).unwrap();
    let canvas = CanvasRenderer::new(CanvasLayout::default(), false)
        .render(&Snapshot::default(), config)
        .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("grid.png");
    let err = canvas.save_png(&path).unwrap_err();
    assert!(err.to_string().starts_with("Failed to export image"));
}
