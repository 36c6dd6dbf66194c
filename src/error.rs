use thiserror::Error;

/// Errors produced by editor operations.
///
/// None of these are fatal: the model is left untouched and callers are
/// expected to log and carry on. The UI disables undo/redo buttons from
/// `can_undo`/`can_redo`, so `HistoryBoundary` is normally unreachable
/// through the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("operation is not valid in the current tool state")]
    InvalidToolState,

    #[error("no provisional shape to commit")]
    NothingToCommit,

    #[error("no shape is selected")]
    EmptySelection,

    #[error("history boundary reached")]
    HistoryBoundary,
}

/// Result type for editor operations.
pub type EditorResult<T = ()> = Result<T, EditorError>;
