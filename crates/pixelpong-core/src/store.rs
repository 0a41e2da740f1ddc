//! Pixel store
//!
//! Reconciles the raw cell list returned by the remote service into an
//! immutable, coordinate-keyed [`Snapshot`]. Every successful fetch builds a
//! new snapshot from scratch and swaps it in whole; nothing is patched in place.

use crate::data::{Cell, Coord};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable view of the grid at one tick
///
/// Iterates in row-major coordinate order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    cells: BTreeMap<Coord, Cell>,
}

impl Snapshot {
    /// Build a snapshot from a cell sequence. Later cells win on coordinate clashes.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut map = BTreeMap::new();
        for cell in cells {
            map.insert(cell.coord(), cell);
        }
        Self { cells: map }
    }

    /// Look up the cell at a coordinate
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    /// Number of colored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been colored yet
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.values()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Cell;
    type IntoIter = std::collections::btree_map::Values<'a, Coord, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.values()
    }
}

/// Owner of the current snapshot
#[derive(Debug, Clone, Default)]
pub struct PixelStore {
    current: Arc<Snapshot>,
}

impl PixelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot with one built from `cells`
    pub fn reconcile<I>(&mut self, cells: I) -> Arc<Snapshot>
    where
        I: IntoIterator<Item = Cell>,
    {
        let snapshot = Arc::new(Snapshot::from_cells(cells));
        tracing::trace!("Reconciled snapshot with {} cells", snapshot.len());
        self.current = Arc::clone(&snapshot);
        snapshot
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Drop the current snapshot
    pub fn clear(&mut self) {
        self.current = Arc::new(Snapshot::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellColor;

    fn cell(x: u32, y: u32, shade: u8) -> Cell {
        Cell::new(x, y, CellColor::new(shade, shade, shade))
    }

    #[test]
    fn test_empty_sequence() {
        let mut store = PixelStore::new();
        let snapshot = store.reconcile(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(store.snapshot().len(), 0);
    }

    #[test]
    fn test_every_cell_retrievable() {
        let cells: Vec<Cell> = (0..4)
            .flat_map(|y| (0..3).map(move |x| cell(x, y, (y * 3 + x) as u8)))
            .collect();
        let snapshot = Snapshot::from_cells(cells.clone());

        assert_eq!(snapshot.len(), cells.len());
        for c in &cells {
            assert_eq!(snapshot.get(c.coord()), Some(c));
        }
    }

    #[test]
    fn test_last_write_wins() {
        let snapshot = Snapshot::from_cells(vec![cell(1, 1, 10), cell(1, 1, 20)]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get(Coord::new(1, 1)).map(|c| c.color),
            Some(CellColor::new(20, 20, 20))
        );
    }

    #[test]
    fn test_reconcile_idempotent() {
        let cells = vec![cell(0, 1, 1), cell(2, 0, 2), cell(1, 1, 3)];
        let mut store = PixelStore::new();
        let first = store.reconcile(cells.clone());
        let second = store.reconcile(cells);
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_reconcile_replaces_wholesale() {
        let mut store = PixelStore::new();
        let _ = store.reconcile(vec![cell(0, 0, 1), cell(1, 0, 2)]);
        let held = store.snapshot();

        let _ = store.reconcile(vec![cell(3, 3, 9)]);
        assert_eq!(store.snapshot().len(), 1);
        assert!(store.snapshot().get(Coord::new(0, 0)).is_none());
        // readers holding the old snapshot keep a consistent view
        assert_eq!(held.len(), 2);
    }

    #[test]
    fn test_iteration_is_row_major() {
        let snapshot = Snapshot::from_cells(vec![cell(2, 1, 1), cell(0, 2, 2), cell(5, 0, 3)]);
        let order: Vec<Coord> = snapshot.iter().map(Cell::coord).collect();
        assert_eq!(
            order,
            vec![Coord::new(5, 0), Coord::new(2, 1), Coord::new(0, 2)]
        );
    }
}
