//! Keyboard-navigation state: the single active cell and edge-clamped moves.

use crate::address::Address;

/// A resolved directional intent from the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// The single focused coordinate driving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn address(&self) -> Address {
        Address::new(self.row, self.col)
    }

    /// Move by delta, clamped to the grid bounds.
    pub fn move_by(&mut self, d_row: isize, d_col: isize, max_row: usize, max_col: usize) {
        self.row = (self.row as isize + d_row).clamp(0, max_row as isize - 1) as usize;
        self.col = (self.col as isize + d_col).clamp(0, max_col as isize - 1) as usize;
    }

    /// One step in a direction, clamped at the grid edges.
    pub fn step(&mut self, direction: Direction, max_row: usize, max_col: usize) {
        let (d_row, d_col) = direction.delta();
        self.move_by(d_row, d_col, max_row, max_col);
    }

    pub fn set(&mut self, addr: Address) {
        self.row = addr.row;
        self.col = addr.col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
