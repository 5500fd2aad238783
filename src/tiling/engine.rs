use serde::Serialize;
use tracing::{debug, error, warn};

use super::error::{Result, TilingError};
use super::signature::{signature_of, Signature};
use super::slot::{Slot, SlotRect};
use super::transition::{destination, new_pane_slot, transition, SplitSide};
use super::CAPACITY;

pub type PaneId = uuid::Uuid;

/// One open pane. `content` is opaque to the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Pane<C> {
    pub id: PaneId,
    pub content: C,
    pub slot: Slot,
    /// Creation index, only used to order output.
    pub order: u64,
}

/// A pane projected onto the canvas, as handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedPane<C> {
    pub pane_id: PaneId,
    pub content: C,
    pub slot: Slot,
    pub rect: SlotRect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggled {
    Opened(PaneId),
    Closed(PaneId),
}

/// What `TilingEngine::sync` did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub closed: Vec<PaneId>,
    pub opened: Vec<PaneId>,
    /// Desired contents left out because the layout was full.
    pub skipped: usize,
}

/// Owns the open panes and keeps them tiled.
///
/// Every mutation computes the complete set of new slots first, checks it
/// against the canonical signatures and only then installs it, so observers
/// never see a half-applied transition.
#[derive(Clone, Debug)]
pub struct TilingEngine<C> {
    panes: Vec<Pane<C>>,
    signature: Signature,
    next_order: u64,
    split_side: SplitSide,
}

impl<C> Default for TilingEngine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TilingEngine<C> {
    pub fn new() -> Self {
        Self::with_split_side(SplitSide::default())
    }

    pub fn with_split_side(split_side: SplitSide) -> Self {
        Self {
            panes: Vec::new(),
            signature: Signature::Empty,
            next_order: 0,
            split_side,
        }
    }

    pub fn split_side(&self) -> SplitSide {
        self.split_side
    }

    pub fn set_split_side(&mut self, side: SplitSide) {
        self.split_side = side;
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.panes.len() >= CAPACITY
    }

    /// Open panes in creation order.
    pub fn panes(&self) -> &[Pane<C>] {
        &self.panes
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane<C>> {
        self.panes.iter().find(|p| p.id == id)
    }

    /// Signature of the installed layout, kept in step with every mutation.
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Open a pane using the engine's split preference.
    pub fn open(&mut self, content: C) -> Result<PaneId> {
        self.open_with(content, self.split_side)
    }

    pub fn open_with(&mut self, content: C, side: SplitSide) -> Result<PaneId> {
        if self.is_full() {
            return Err(reject(TilingError::CapacityExceeded { capacity: CAPACITY }));
        }
        let signature = self.signature;
        let moves = transition(signature)
            .and_then(|t| t.add(side))
            .map_err(reject)?;
        let new_slot = new_pane_slot(moves).ok_or_else(|| {
            reject(TilingError::InvariantViolation(format!(
                "add rule for `{}` places no new pane",
                signature
            )))
        })?;

        let slots: Vec<Slot> = self
            .panes
            .iter()
            .map(|p| destination(moves, p.slot))
            .collect();
        let next = signature_of(slots.iter().copied().chain(std::iter::once(new_slot)))
            .map_err(reject)?;

        for (pane, slot) in self.panes.iter_mut().zip(slots) {
            pane.slot = slot;
        }
        self.signature = next;
        let id = PaneId::new_v4();
        self.panes.push(Pane {
            id,
            content,
            slot: new_slot,
            order: self.next_order,
        });
        self.next_order += 1;

        debug!(pane = %id, slot = %new_slot, from = %signature, to = %next, "opened pane");
        Ok(id)
    }

    pub fn close(&mut self, id: PaneId) -> Result<()> {
        let index = self
            .panes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| reject(TilingError::PaneNotFound(id)))?;
        let signature = self.signature;
        let gone = self.panes[index].slot;
        let moves = transition(signature)
            .and_then(|t| t.remove(gone))
            .map_err(reject)?;

        let slots: Vec<Slot> = self
            .panes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, p)| destination(moves, p.slot))
            .collect();
        let next = signature_of(slots.iter().copied()).map_err(reject)?;

        self.panes.remove(index);
        for (pane, slot) in self.panes.iter_mut().zip(slots) {
            pane.slot = slot;
        }
        self.signature = next;

        debug!(pane = %id, slot = %gone, from = %signature, to = %next, "closed pane");
        Ok(())
    }

    /// Flat geometry list in creation order.
    pub fn current_layout(&self) -> Vec<PlacedPane<C>>
    where
        C: Clone,
    {
        self.panes
            .iter()
            .map(|p| PlacedPane {
                pane_id: p.id,
                content: p.content.clone(),
                slot: p.slot,
                rect: p.slot.rect(),
            })
            .collect()
    }
}

impl<C: PartialEq> TilingEngine<C> {
    pub fn find(&self, content: &C) -> Option<PaneId> {
        self.panes
            .iter()
            .find(|p| p.content == *content)
            .map(|p| p.id)
    }

    /// Close the pane showing `content`, or open one if there is none.
    pub fn toggle(&mut self, content: C) -> Result<Toggled> {
        match self.find(&content) {
            Some(id) => self.close(id).map(|_| Toggled::Closed(id)),
            None => self.open(content).map(Toggled::Opened),
        }
    }
}

impl<C: PartialEq + Clone> TilingEngine<C> {
    /// Bring the open set in line with `desired`.
    ///
    /// Panes whose content is not desired are closed first, in creation
    /// order; then missing contents are opened in the order given until the
    /// layout is full. Each step is atomic on its own.
    pub fn sync(&mut self, desired: &[C]) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        let stale: Vec<PaneId> = self
            .panes
            .iter()
            .filter(|p| !desired.contains(&p.content))
            .map(|p| p.id)
            .collect();
        for id in stale {
            self.close(id)?;
            report.closed.push(id);
        }

        for content in desired {
            if self.find(content).is_some() {
                continue;
            }
            if self.is_full() {
                report.skipped += 1;
                continue;
            }
            report.opened.push(self.open(content.clone())?);
        }

        debug!(
            closed = report.closed.len(),
            opened = report.opened.len(),
            skipped = report.skipped,
            "synced layout"
        );
        Ok(report)
    }
}

/// Log a rejected operation. Internal errors are a defect in the transition
/// table: they abort debug builds and are logged and returned otherwise.
fn reject(err: TilingError) -> TilingError {
    if err.is_internal() {
        error!(error = %err, "tiling invariant broken");
        debug_assert!(false, "{}", err);
    } else {
        warn!(error = %err, "tiling request rejected");
    }
    err
}
