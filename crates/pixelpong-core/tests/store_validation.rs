//! Tests for the pixel store feeding the uniqueness validator

use pixelpong_core::*;

fn diagonal_cells(config: GridConfig) -> Vec<Cell> {
    (0..config.rows.min(config.cols))
        .map(|i| Cell::new(i, i, CellColor::new(i as u8, 0, 255 - i as u8)))
        .collect()
}

#[test]
fn test_partial_snapshot_size_and_lookup() {
    for (rows, cols) in [(1, 1), (3, 7), (12, 4), (40, 40)] {
        let config = GridConfig::new(rows, cols).unwrap();
        let cells = diagonal_cells(config);

        let mut store = PixelStore::new();
        let snapshot = store.reconcile(cells.clone());

        assert_eq!(snapshot.len(), cells.len());
        assert!(snapshot.len() as u64 <= config.cell_count());
        for cell in &cells {
            assert!(config.contains(cell.coord()));
            assert_eq!(snapshot.get(cell.coord()), Some(cell));
        }
    }
}

#[test]
fn test_full_grid_five_by_five() {
    let config = GridConfig::new(5, 5).unwrap();
    let cells: Vec<Cell> = (0..25u32)
        .map(|i| Cell::new(i % 5, i / 5, CellColor::new(i as u8, (i * 7) as u8, 3)))
        .collect();

    let mut store = PixelStore::new();
    let snapshot = store.reconcile(cells);
    assert_eq!(snapshot.len() as u64, config.cell_count());

    let result = UniquenessValidator::default().validate(&snapshot, config);
    assert!(result.is_valid);
    assert_eq!(result.examined, 25);
    assert_eq!(result.to_string(), "All pixels have unique colors");
}

#[test]
fn test_two_by_two_with_collision() {
    let config = GridConfig::new(2, 2).unwrap();
    let mut store = PixelStore::new();
    let snapshot = store.reconcile(vec![
        Cell::new(0, 0, CellColor::new(1, 1, 1)),
        Cell::new(1, 1, CellColor::new(1, 1, 1)),
    ]);

    let result = UniquenessValidator::default().validate(&snapshot, config);
    assert!(!result.is_valid);
    assert_eq!(result.duplicate_colors.len(), 1);
    assert!(result.duplicate_colors.contains("rgb(1,1,1)"));
}

#[test]
fn test_sampled_result_discloses_approximation() {
    let config = GridConfig::new(400, 300).unwrap();
    let cols = u64::from(config.cols);
    let snapshot = Snapshot::from_cells((0..config.cell_count()).map(|i| {
        Cell::new(
            (i % cols) as u32,
            (i / cols) as u32,
            CellColor::new((i >> 16) as u8, (i >> 8) as u8, i as u8),
        )
    }));

    let result = UniquenessValidator::default().validate(&snapshot, config);
    let notice = result.approximation().expect("120000 cells must be sampled");
    assert_eq!(notice.examined, DEFAULT_SAMPLE_SIZE);
    assert_eq!(notice.available, 120_000);
}
