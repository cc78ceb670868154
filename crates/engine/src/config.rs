use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_UNDO_DEPTH;

/// Engine construction parameters. A host can deserialize this from its own
/// settings layer or build it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Bound on the undo stack; oldest entries are evicted first.
    pub undo_depth: usize,
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 26,
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}
