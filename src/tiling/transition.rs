use serde::{Deserialize, Serialize};

use super::error::{Result, TilingError};
use super::signature::Signature;
use super::slot::Slot;
use super::CAPACITY;

/// One step of a transition: a pane moving between slots, or (with
/// `from == None`) the slot given to the newly opened pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Reassignment {
    pub from: Option<Slot>,
    pub to: Slot,
}

macro_rules! new_pane {
    ($to:expr) => {
        Reassignment { from: None, to: $to }
    };
}

macro_rules! moved {
    ($from:expr, $to:expr) => {
        Reassignment { from: Some($from), to: $to }
    };
}

/// Which half gets subdivided when both halves are available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitSide {
    #[default]
    Left,
    Right,
}

impl SplitSide {
    pub fn flipped(self) -> Self {
        match self {
            SplitSide::Left => SplitSide::Right,
            SplitSide::Right => SplitSide::Left,
        }
    }
}

#[derive(Debug)]
struct RemoveRule {
    slot: Slot,
    moves: &'static [Reassignment],
}

/// The add and remove rules for one signature.
#[derive(Debug)]
pub struct Transition {
    pub signature: Signature,
    add: Option<&'static [Reassignment]>,
    /// Alternative add rule used for `SplitSide::Right`, where the signature has one.
    add_mirrored: Option<&'static [Reassignment]>,
    remove: &'static [RemoveRule],
}

use Slot::{
    Full as F, HalfLeft as HL, HalfRight as HR, QuadBottomLeft as BL, QuadBottomRight as BR,
    QuadTopLeft as TL, QuadTopRight as TR,
};

static TABLE: [Transition; 6] = [
    Transition {
        signature: Signature::Empty,
        add: Some(&[new_pane!(F)]),
        add_mirrored: None,
        remove: &[],
    },
    Transition {
        signature: Signature::Full,
        add: Some(&[moved!(F, HL), new_pane!(HR)]),
        add_mirrored: None,
        remove: &[RemoveRule { slot: F, moves: &[] }],
    },
    Transition {
        signature: Signature::Halves,
        add: Some(&[moved!(HL, TL), new_pane!(BL)]),
        add_mirrored: Some(&[moved!(HR, TR), new_pane!(BR)]),
        remove: &[
            RemoveRule { slot: HL, moves: &[moved!(HR, F)] },
            RemoveRule { slot: HR, moves: &[moved!(HL, F)] },
        ],
    },
    Transition {
        signature: Signature::HalfLeftQuadsRight,
        add: Some(&[moved!(HL, TL), new_pane!(BL)]),
        add_mirrored: None,
        remove: &[
            RemoveRule { slot: HL, moves: &[moved!(TR, HL), moved!(BR, HR)] },
            RemoveRule { slot: TR, moves: &[moved!(BR, HR)] },
            RemoveRule { slot: BR, moves: &[moved!(TR, HR)] },
        ],
    },
    Transition {
        signature: Signature::HalfRightQuadsLeft,
        add: Some(&[moved!(HR, TR), new_pane!(BR)]),
        add_mirrored: None,
        remove: &[
            RemoveRule { slot: HR, moves: &[moved!(TL, HL), moved!(BL, HR)] },
            RemoveRule { slot: TL, moves: &[moved!(BL, HL)] },
            RemoveRule { slot: BL, moves: &[moved!(TL, HL)] },
        ],
    },
    Transition {
        signature: Signature::Quadrants,
        add: None,
        add_mirrored: None,
        remove: &[
            RemoveRule { slot: TL, moves: &[moved!(BL, HL)] },
            RemoveRule { slot: BL, moves: &[moved!(TL, HL)] },
            RemoveRule { slot: TR, moves: &[moved!(BR, HR)] },
            RemoveRule { slot: BR, moves: &[moved!(TR, HR)] },
        ],
    },
];

/// Look up the transition row for a signature.
pub fn transition(signature: Signature) -> Result<&'static Transition> {
    TABLE
        .iter()
        .find(|t| t.signature == signature)
        .ok_or_else(|| {
            TilingError::InvariantViolation(format!("no transition rule for `{}`", signature))
        })
}

impl Transition {
    /// Reassignments for adding one pane. Exactly one entry has `from == None`.
    pub fn add(&self, side: SplitSide) -> Result<&'static [Reassignment]> {
        let rule = match side {
            SplitSide::Right => self.add_mirrored.or(self.add),
            SplitSide::Left => self.add,
        };
        rule.ok_or(TilingError::CapacityExceeded { capacity: CAPACITY })
    }

    /// Reassignments of the surviving panes when the pane in `slot` goes away.
    pub fn remove(&self, slot: Slot) -> Result<&'static [Reassignment]> {
        if self.signature == Signature::Empty {
            return Err(TilingError::InvariantViolation(
                "cannot remove a pane from an empty layout".to_string(),
            ));
        }
        self.remove
            .iter()
            .find(|rule| rule.slot == slot)
            .map(|rule| rule.moves)
            .ok_or_else(|| TilingError::SlotNotOccupied {
                slot,
                signature: self.signature.to_string(),
            })
    }
}

/// Where a pane currently in `slot` ends up after `moves`.
pub fn destination(moves: &[Reassignment], slot: Slot) -> Slot {
    moves
        .iter()
        .find(|m| m.from == Some(slot))
        .map(|m| m.to)
        .unwrap_or(slot)
}

/// The slot handed to the new pane by an add rule.
pub fn new_pane_slot(moves: &[Reassignment]) -> Option<Slot> {
    moves.iter().find(|m| m.from.is_none()).map(|m| m.to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::signature::signature_of;

    fn grow(sig: Signature, side: SplitSide) -> (Vec<(Slot, Slot)>, Slot, Signature) {
        let moves = transition(sig).unwrap().add(side).unwrap();
        let survivors: Vec<(Slot, Slot)> = sig
            .slots()
            .iter()
            .map(|&s| (s, destination(moves, s)))
            .collect();
        let new_slot = new_pane_slot(moves).unwrap();
        let next = signature_of(
            survivors
                .iter()
                .map(|&(_, to)| to)
                .chain(std::iter::once(new_slot)),
        )
        .unwrap();
        (survivors, new_slot, next)
    }

    #[test]
    fn test_table_covers_every_signature() {
        for sig in Signature::ALL {
            assert_eq!(transition(sig).unwrap().signature, sig);
        }
    }

    #[test]
    fn test_natural_growth_path() {
        let path: Vec<Signature> = std::iter::successors(Some(Signature::Empty), |&sig| {
            transition(sig)
                .ok()?
                .add(SplitSide::Left)
                .ok()
                .map(|_| grow(sig, SplitSide::Left).2)
        })
        .collect();
        assert_eq!(
            path,
            vec![
                Signature::Empty,
                Signature::Full,
                Signature::Halves,
                Signature::HalfRightQuadsLeft,
                Signature::Quadrants,
            ]
        );
    }

    #[test]
    fn test_mirrored_growth_from_halves() {
        let (survivors, new_slot, next) = grow(Signature::Halves, SplitSide::Right);
        assert_eq!(next, Signature::HalfLeftQuadsRight);
        assert_eq!(new_slot, Slot::QuadBottomRight);
        assert_eq!(survivors, vec![(HL, HL), (HR, TR)]);
    }

    #[test]
    fn test_side_ignored_without_mirror() {
        for sig in [Signature::Empty, Signature::Full, Signature::HalfRightQuadsLeft] {
            let t = transition(sig).unwrap();
            assert_eq!(t.add(SplitSide::Left).unwrap(), t.add(SplitSide::Right).unwrap());
        }
    }

    #[test]
    fn test_add_rules_are_well_formed() {
        for sig in Signature::ALL {
            let Ok(moves) = transition(sig).unwrap().add(SplitSide::Left) else {
                continue;
            };
            assert_eq!(moves.iter().filter(|m| m.from.is_none()).count(), 1, "{sig}");
            for m in moves.iter().filter_map(|m| m.from) {
                assert!(sig.contains(m), "{sig}: source {m} not occupied");
            }
            for side in [SplitSide::Left, SplitSide::Right] {
                let (_, _, next) = grow(sig, side);
                assert_eq!(next.pane_count(), sig.pane_count() + 1);
            }
        }
    }

    #[test]
    fn test_add_on_quadrants_exceeds_capacity() {
        let t = transition(Signature::Quadrants).unwrap();
        for side in [SplitSide::Left, SplitSide::Right] {
            assert_eq!(
                t.add(side),
                Err(TilingError::CapacityExceeded { capacity: 4 })
            );
        }
    }

    #[test]
    fn test_every_remove_lands_on_lower_signature() {
        for sig in Signature::ALL.into_iter().filter(|s| *s != Signature::Empty) {
            let t = transition(sig).unwrap();
            for &gone in sig.slots() {
                let moves = t.remove(gone).unwrap();
                assert!(moves.iter().all(|m| m.from.is_some()));
                let remaining = sig
                    .slots()
                    .iter()
                    .filter(|&&s| s != gone)
                    .map(|&s| destination(moves, s));
                let lower = signature_of(remaining)
                    .unwrap_or_else(|e| panic!("{sig} - {gone}: {e}"));
                assert_eq!(lower.pane_count() + 1, sig.pane_count());
            }
        }
    }

    #[test]
    fn test_add_then_remove_round_trips() {
        for sig in Signature::ALL {
            for side in [SplitSide::Left, SplitSide::Right] {
                if transition(sig).unwrap().add(side).is_err() {
                    continue;
                }
                let (survivors, new_slot, next) = grow(sig, side);
                let back = transition(next).unwrap().remove(new_slot).unwrap();
                for (before, after_add) in survivors {
                    assert_eq!(
                        destination(back, after_add),
                        before,
                        "{sig} ({side:?}): pane from {before} did not return"
                    );
                }
            }
        }
    }

    #[test]
    fn test_remove_from_empty_is_invariant_violation() {
        let t = transition(Signature::Empty).unwrap();
        assert!(matches!(t.remove(F), Err(TilingError::InvariantViolation(_))));
    }

    #[test]
    fn test_remove_unoccupied_slot() {
        let t = transition(Signature::Halves).unwrap();
        assert_eq!(
            t.remove(TL),
            Err(TilingError::SlotNotOccupied {
                slot: TL,
                signature: "HL+HR".to_string(),
            })
        );
    }

    #[test]
    fn test_removing_standalone_half_merges_quadrants() {
        let t = transition(Signature::HalfRightQuadsLeft).unwrap();
        let moves = t.remove(HR).unwrap();
        assert_eq!(destination(moves, TL), HL);
        assert_eq!(destination(moves, BL), HR);
    }
}
