use thiserror::Error;

use super::engine::PaneId;
use super::slot::Slot;

pub type Result<T> = std::result::Result<T, TilingError>;

/// Errors surfaced by the tiling engine and its tables.
///
/// None of them leave partial state behind: a failed operation never
/// changes the layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TilingError {
    #[error("cannot open more than {capacity} panes; close a pane first")]
    CapacityExceeded { capacity: usize },
    #[error("no open pane with id {0}")]
    PaneNotFound(PaneId),
    #[error("slot {slot} is not occupied in layout `{signature}`")]
    SlotNotOccupied { slot: Slot, signature: String },
    #[error("layout invariant violated: {0}")]
    InvariantViolation(String),
}

impl TilingError {
    /// Internal errors point at a defect in the transition table or its caller,
    /// not at something the user did.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TilingError::SlotNotOccupied { .. } | TilingError::InvariantViolation(_)
        )
    }
}
