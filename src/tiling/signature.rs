use std::fmt;

use serde::Serialize;

use super::error::{Result, TilingError};
use super::slot::Slot;

/// The canonical combinations of occupied slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signature {
    Empty,
    Full,
    Halves,
    /// Left half plus the two right quadrants.
    HalfLeftQuadsRight,
    /// Right half plus the two left quadrants.
    HalfRightQuadsLeft,
    Quadrants,
}

impl Signature {
    pub const ALL: [Signature; 6] = [
        Signature::Empty,
        Signature::Full,
        Signature::Halves,
        Signature::HalfLeftQuadsRight,
        Signature::HalfRightQuadsLeft,
        Signature::Quadrants,
    ];

    /// Occupied slots in canonical order.
    pub fn slots(self) -> &'static [Slot] {
        use Slot::*;
        match self {
            Signature::Empty => &[],
            Signature::Full => &[Full],
            Signature::Halves => &[HalfLeft, HalfRight],
            Signature::HalfLeftQuadsRight => &[HalfLeft, QuadTopRight, QuadBottomRight],
            Signature::HalfRightQuadsLeft => &[HalfRight, QuadTopLeft, QuadBottomLeft],
            Signature::Quadrants => &[QuadTopLeft, QuadTopRight, QuadBottomLeft, QuadBottomRight],
        }
    }

    /// Lookup key: slot codes concatenated in canonical order.
    pub fn key(self) -> &'static str {
        match self {
            Signature::Empty => "",
            Signature::Full => "0",
            Signature::Halves => "12",
            Signature::HalfLeftQuadsRight => "146",
            Signature::HalfRightQuadsLeft => "235",
            Signature::Quadrants => "3456",
        }
    }

    pub fn pane_count(self) -> usize {
        self.slots().len()
    }

    pub fn contains(self, slot: Slot) -> bool {
        self.slots().contains(&slot)
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Signature::Empty {
            return f.write_str("empty");
        }
        let names: Vec<&str> = self.slots().iter().map(|s| s.short_name()).collect();
        f.write_str(&names.join("+"))
    }
}

/// Classify a set of occupied slots.
///
/// Anything that is not one of the canonical combinations, including a set
/// with a repeated slot, is an `InvariantViolation`.
pub fn signature_of<I>(slots: I) -> Result<Signature>
where
    I: IntoIterator<Item = Slot>,
{
    let mut sorted: Vec<Slot> = slots.into_iter().collect();
    sorted.sort();
    let total = sorted.len();
    sorted.dedup();
    if sorted.len() != total {
        return Err(TilingError::InvariantViolation(format!(
            "slot occupied twice in {:?}",
            sorted
        )));
    }

    let key: String = sorted.iter().map(|s| s.code()).collect();
    Signature::from_key(&key).ok_or_else(|| {
        TilingError::InvariantViolation(format!("`{}` is not a canonical layout", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_signature_classifies_to_itself() {
        for sig in Signature::ALL {
            assert_eq!(signature_of(sig.slots().iter().copied()), Ok(sig));
        }
    }

    #[test]
    fn test_order_independent() {
        use Slot::*;
        let a = signature_of([QuadBottomRight, HalfLeft, QuadTopRight]).unwrap();
        let b = signature_of([HalfLeft, QuadTopRight, QuadBottomRight]).unwrap();
        let c = signature_of([QuadTopRight, QuadBottomRight, HalfLeft]).unwrap();
        assert_eq!(a, Signature::HalfLeftQuadsRight);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(signature_of(Vec::new()), Ok(Signature::Empty));
    }

    #[test]
    fn test_non_canonical_set_rejected() {
        use Slot::*;
        for bad in [
            vec![Full, HalfLeft],
            vec![HalfLeft],
            vec![QuadTopLeft, QuadTopRight],
            vec![HalfLeft, QuadTopLeft, QuadBottomLeft],
            vec![HalfLeft, HalfRight, QuadTopLeft],
        ] {
            let err = signature_of(bad.clone()).unwrap_err();
            assert!(
                matches!(err, TilingError::InvariantViolation(_)),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let err = signature_of([Slot::Full, Slot::Full]).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_keys_are_sorted_codes() {
        for sig in Signature::ALL {
            let key: String = sig.slots().iter().map(|s| s.code()).collect();
            assert_eq!(key, sig.key());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Signature::Empty.to_string(), "empty");
        assert_eq!(Signature::HalfRightQuadsLeft.to_string(), "HR+TL+BL");
    }
}
