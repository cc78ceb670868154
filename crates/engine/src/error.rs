use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Empty-history undo/redo and edge-clamped navigation are defined no-ops,
/// not errors; the only failure mode callers must handle is a bad address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed label text, or coordinates outside the configured bounds.
    #[error("invalid cell address: {0}")]
    InvalidAddress(String),
}
