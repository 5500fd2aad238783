use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical region of the tiling canvas.
///
/// Declaration order is the canonical order used when building signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Full,
    HalfLeft,
    HalfRight,
    QuadTopLeft,
    QuadTopRight,
    QuadBottomLeft,
    QuadBottomRight,
}

/// Fractional rectangle inside the unit square.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SlotRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the point lies inside, using half-open edges.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::Full,
        Slot::HalfLeft,
        Slot::HalfRight,
        Slot::QuadTopLeft,
        Slot::QuadTopRight,
        Slot::QuadBottomLeft,
        Slot::QuadBottomRight,
    ];

    pub fn rect(self) -> SlotRect {
        match self {
            Slot::Full => SlotRect::new(0.0, 0.0, 1.0, 1.0),
            Slot::HalfLeft => SlotRect::new(0.0, 0.0, 0.5, 1.0),
            Slot::HalfRight => SlotRect::new(0.5, 0.0, 0.5, 1.0),
            Slot::QuadTopLeft => SlotRect::new(0.0, 0.0, 0.5, 0.5),
            Slot::QuadTopRight => SlotRect::new(0.5, 0.0, 0.5, 0.5),
            Slot::QuadBottomLeft => SlotRect::new(0.0, 0.5, 0.5, 0.5),
            Slot::QuadBottomRight => SlotRect::new(0.5, 0.5, 0.5, 0.5),
        }
    }

    /// Single-character code; concatenated in canonical order these form signature keys.
    pub fn code(self) -> char {
        match self {
            Slot::Full => '0',
            Slot::HalfLeft => '1',
            Slot::HalfRight => '2',
            Slot::QuadTopLeft => '3',
            Slot::QuadTopRight => '4',
            Slot::QuadBottomLeft => '5',
            Slot::QuadBottomRight => '6',
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Slot::Full => "F",
            Slot::HalfLeft => "HL",
            Slot::HalfRight => "HR",
            Slot::QuadTopLeft => "TL",
            Slot::QuadTopRight => "TR",
            Slot::QuadBottomLeft => "BL",
            Slot::QuadBottomRight => "BR",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_stay_inside_unit_square() {
        for slot in Slot::ALL {
            let r = slot.rect();
            assert!(r.x >= 0.0 && r.y >= 0.0, "{slot} origin");
            assert!(r.right() <= 1.0 && r.bottom() <= 1.0, "{slot} extent");
            assert!(r.width > 0.0 && r.height > 0.0, "{slot} size");
        }
    }

    #[test]
    fn test_codes_follow_canonical_order() {
        let codes: String = Slot::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, "0123456");
        let mut sorted = Slot::ALL;
        sorted.sort();
        assert_eq!(sorted, Slot::ALL);
    }

    #[test]
    fn test_half_is_two_quadrants() {
        let left = Slot::HalfLeft.rect();
        let tl = Slot::QuadTopLeft.rect();
        let bl = Slot::QuadBottomLeft.rect();
        assert!((left.area() - (tl.area() + bl.area())).abs() < f64::EPSILON);
        assert_eq!(tl.bottom(), bl.y);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Slot::QuadTopLeft.rect();
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(0.49, 0.49));
        assert!(!r.contains(0.5, 0.25));
        assert!(!r.contains(0.25, 0.5));
    }
}
