//! Undo/Redo history for cell mutations.
//!
//! Each entry carries the complete before/after state of one cell, including
//! absence from the sparse map, so restoring an entry reproduces the store
//! exactly. One discrete edit is one entry; the undo unit is the edit, not
//! the keystroke.

use crate::address::Address;
use crate::cell::Cell;

/// Default bound on the undo stack.
pub const DEFAULT_UNDO_DEPTH: usize = 50;

/// One recorded mutation. `None` means the cell had no stored entry.
#[derive(Clone, Debug, PartialEq)]
pub struct CellChange {
    pub address: Address,
    pub old: Option<Cell>,
    pub new: Option<Cell>,
}

#[derive(Debug)]
pub struct History {
    undo_stack: Vec<CellChange>,
    redo_stack: Vec<CellChange>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_UNDO_DEPTH)
    }

    pub fn with_depth(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
        }
    }

    /// Record one mutation. Any recorded mutation invalidates the redo stack.
    pub fn record(&mut self, change: CellChange) {
        self.undo_stack.push(change);
        self.redo_stack.clear();

        // Bounded: evict the oldest entry first, never the most recent
        if self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the last entry for undo; the caller applies its `old` state.
    pub fn undo(&mut self) -> Option<CellChange> {
        if let Some(change) = self.undo_stack.pop() {
            self.redo_stack.push(change.clone());
            Some(change)
        } else {
            None
        }
    }

    /// Pop from the redo stack; the caller applies its `new` state.
    pub fn redo(&mut self) -> Option<CellChange> {
        if let Some(change) = self.redo_stack.pop() {
            self.undo_stack.push(change.clone());
            Some(change)
        } else {
            None
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
