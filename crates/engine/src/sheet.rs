//! The sparse cell store.
//!
//! Absence of a key means an implicit empty cell; blank cells allocate
//! nothing. All bounds are fixed at construction.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::cell::Cell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub rows: usize,
    pub cols: usize,
    cells: FxHashMap<(usize, usize), Cell>,
}

impl Sheet {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: FxHashMap::default(),
        }
    }

    /// Whether an address is inside the configured bounds.
    pub fn contains(&self, addr: Address) -> bool {
        addr.row < self.rows && addr.col < self.cols
    }

    /// The cell at an address, or the canonical empty cell if none is stored.
    pub fn get(&self, addr: Address) -> Cell {
        self.cells
            .get(&(addr.row, addr.col))
            .cloned()
            .unwrap_or_default()
    }

    /// Replace (not merge) the stored cell.
    pub fn set(&mut self, addr: Address, cell: Cell) {
        self.cells.insert((addr.row, addr.col), cell);
    }

    /// Remove the stored entry, reclaiming the sparse-map slot.
    pub fn clear(&mut self, addr: Address) {
        self.cells.remove(&(addr.row, addr.col));
    }

    /// The stored entry as-is. `None` distinguishes "no entry" from a stored
    /// empty cell; the history manager needs that distinction to restore
    /// sparse state exactly.
    pub fn stored(&self, addr: Address) -> Option<&Cell> {
        self.cells.get(&(addr.row, addr.col))
    }

    /// Put an address back into a previously captured state.
    pub fn restore(&mut self, addr: Address, cell: Option<Cell>) {
        match cell {
            Some(cell) => self.set(addr, cell),
            None => self.clear(addr),
        }
    }

    /// The displayable text at an address ("" for absent cells).
    pub fn raw_text(&self, addr: Address) -> String {
        self.cells
            .get(&(addr.row, addr.col))
            .map(|c| c.content.raw_display())
            .unwrap_or_default()
    }

    /// Iterate over all populated cells (sparse walk, arbitrary order).
    pub fn populated(&self) -> impl Iterator<Item = (Address, &Cell)> {
        self.cells
            .iter()
            .map(|(&(row, col), cell)| (Address::new(row, col), cell))
    }

    /// Visit every in-bounds coordinate in row-major order, substituting the
    /// canonical empty cell for absent entries. This is the iteration
    /// contract rendering and export rely on.
    pub fn cells_in_bounds(&self) -> impl Iterator<Item = (Address, Cell)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| {
                let addr = Address::new(row, col);
                (addr, self.get(addr))
            })
        })
    }
}
