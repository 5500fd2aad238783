//! Viewport tiling: which canvas region each open pane occupies, and how
//! panes move when one is opened or closed.
//!
//! The layout is always one of a handful of canonical slot combinations
//! (one full pane, two halves, a half plus two quadrants, four quadrants).
//! Transitions between them are hand-enumerated in [`transition`] so that a
//! pane keeps its side of the canvas wherever it can.

pub mod engine;
pub mod error;
pub mod signature;
pub mod slot;
pub mod transition;

pub use engine::{Pane, PaneId, PlacedPane, SyncReport, TilingEngine, Toggled};
pub use error::{Result, TilingError};
pub use signature::{signature_of, Signature};
pub use slot::{Slot, SlotRect};
pub use transition::{Reassignment, SplitSide};

/// Maximum number of panes open at once.
pub const CAPACITY: usize = 4;
