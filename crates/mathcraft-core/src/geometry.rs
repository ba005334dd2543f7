//! Coordinates behind the worksheet's visuals.
//!
//! Pure data for a renderer: pizza slice cuts, pepperoni placement, and the
//! grouping pictures used for `n/8` and `3x`. Nothing here draws.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::grading::round_to;

/// A point in renderer coordinates (y grows downward, as in SVG).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Default pizza canvas: 400x400 with a 150 unit radius.
pub const PIZZA_CENTER: Point = Point::new(200.0, 200.0);
pub const PIZZA_RADIUS: f64 = 150.0;

/// Angles of the `n` cut lines, in radians.
///
/// Each angle is `i * 2π / n` computed independently, so rounding error
/// does not accumulate around the pizza.
pub fn slice_angles(n: u32) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = TAU / n as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// A cut from the center to the crust.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceLine {
    pub from: Point,
    pub to: Point,
}

/// End points of the `n` cut lines, rounded to 2 decimals.
pub fn slice_lines(n: u32, center: Point, radius: f64) -> Vec<SliceLine> {
    slice_angles(n)
        .into_iter()
        .map(|angle| SliceLine {
            from: center,
            to: Point::new(
                round_to(center.x + radius * angle.cos(), 2),
                round_to(center.y + radius * angle.sin(), 2),
            ),
        })
        .collect()
}

/// How big one slice is when a pizza is cut `n` ways.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceFraction {
    pub slices: u32,
    /// `1/n` to 3 decimals.
    pub decimal: f64,
    /// `100/n` to 1 decimal.
    pub percent: f64,
}

impl SliceFraction {
    pub fn new(slices: u32) -> Result<Self, GradingError> {
        if slices == 0 {
            return Err(GradingError::DivisionByZero);
        }
        let share = 1.0 / slices as f64;
        Ok(Self {
            slices,
            decimal: round_to(share, 3),
            percent: round_to(share * 100.0, 1),
        })
    }
}

/// One pepperoni on the pizza.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pepperoni {
    pub center: Point,
    pub radius: f64,
}

/// Linear congruential generator used for repeatable pepperoni jitter.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    const MULTIPLIER: u64 = 9301;
    const INCREMENT: u64 = 49297;
    const MODULUS: u64 = 233_280;
    pub const DEFAULT_SEED: u64 = 42069;

    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % Self::MODULUS,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

/// (distance from center as a fraction of the radius, pieces) per ring.
const RINGS: [(f64, u32); 4] = [(0.2, 3), (0.45, 6), (0.7, 8), (0.85, 4)];
const SCATTERED: u32 = 4;
const MAX_DISTANCE: f64 = 0.9;

/// Deterministic pepperoni layout: rings from the center outward, then a
/// few scattered pieces.
///
/// The layout does not depend on the slice count; the cuts fall wherever
/// they fall. Every piece's center lies within 90% of `radius`.
pub fn pepperoni(center: Point, radius: f64) -> Vec<Pepperoni> {
    let mut rng = Lcg::default();
    let mut pieces = Vec::new();

    for (ring_radius, count) in RINGS {
        let step = TAU / count as f64;
        for i in 0..count {
            let angle = i as f64 * step + (rng.next_f64() - 0.5) * 0.8;
            let jitter = (rng.next_f64() - 0.5) * 0.15;
            let distance = ((ring_radius + jitter) * radius).min(radius * MAX_DISTANCE);
            pieces.push(Pepperoni {
                center: Point::new(
                    center.x + distance * angle.cos(),
                    center.y + distance * angle.sin(),
                ),
                radius: 8.0 + rng.next_f64() * 4.0,
            });
        }
    }

    for _ in 0..SCATTERED {
        let angle = rng.next_f64() * TAU;
        let distance = rng.next_f64() * radius * 0.8;
        pieces.push(Pepperoni {
            center: Point::new(
                center.x + distance * angle.cos(),
                center.y + distance * angle.sin(),
            ),
            radius: 7.0 + rng.next_f64() * 3.0,
        });
    }

    pieces
}

/// Everything a renderer needs to draw one sliced pizza.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PizzaLayout {
    pub center: Point,
    pub radius: f64,
    pub fraction: SliceFraction,
    pub cuts: Vec<SliceLine>,
    pub pepperoni: Vec<Pepperoni>,
}

impl PizzaLayout {
    /// Layout on the default 400x400 canvas.
    pub fn new(slices: u32) -> Result<Self, GradingError> {
        Ok(Self {
            center: PIZZA_CENTER,
            radius: PIZZA_RADIUS,
            fraction: SliceFraction::new(slices)?,
            cuts: slice_lines(slices, PIZZA_CENTER, PIZZA_RADIUS),
            pepperoni: pepperoni(PIZZA_CENTER, PIZZA_RADIUS),
        })
    }
}

/// `total` items shared equally among `groups`, as in `n/8 = n ÷ 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionGroups {
    pub total: u32,
    pub groups: u32,
    pub per_group: u32,
    /// Items left over when `total` is not a multiple of `groups`.
    pub remainder: u32,
}

pub fn division_groups(total: u32, groups: u32) -> Result<DivisionGroups, GradingError> {
    if groups == 0 {
        return Err(GradingError::DivisionByZero);
    }
    Ok(DivisionGroups {
        total,
        groups,
        per_group: total / groups,
        remainder: total % groups,
    })
}

/// `multiplier` groups of `x` items, as in `3x = 3 · x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplicationGroups {
    pub multiplier: u32,
    pub x: u32,
    pub product: u64,
}

pub fn multiplication_groups(multiplier: u32, x: u32) -> MultiplicationGroups {
    MultiplicationGroups {
        multiplier,
        x,
        product: multiplier as u64 * x as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_slices_are_evenly_spaced() {
        let angles = slice_angles(8);
        assert_eq!(angles.len(), 8);
        assert_eq!(angles[0], 0.0);
        for pair in angles.windows(2) {
            assert!((pair[1] - pair[0] - TAU / 8.0).abs() < 1e-12);
        }
        assert!(angles.iter().all(|a| *a < TAU));
    }

    #[test]
    fn zero_slices() {
        assert!(slice_angles(0).is_empty());
        assert!(slice_lines(0, PIZZA_CENTER, PIZZA_RADIUS).is_empty());
        assert_eq!(SliceFraction::new(0), Err(GradingError::DivisionByZero));
        assert!(PizzaLayout::new(0).is_err());
    }

    #[test]
    fn four_cuts_hit_the_compass_points() {
        let lines = slice_lines(4, PIZZA_CENTER, PIZZA_RADIUS);
        let ends: Vec<(f64, f64)> = lines.iter().map(|l| (l.to.x, l.to.y)).collect();
        assert_eq!(
            ends,
            vec![(350.0, 200.0), (200.0, 350.0), (50.0, 200.0), (200.0, 50.0)]
        );
        assert!(lines.iter().all(|l| l.from == PIZZA_CENTER));
    }

    #[test]
    fn slice_fraction_values() {
        let eighth = SliceFraction::new(8).unwrap();
        assert_eq!(eighth.decimal, 0.125);
        assert_eq!(eighth.percent, 12.5);

        let third = SliceFraction::new(3).unwrap();
        assert_eq!(third.decimal, 0.333);
        assert_eq!(third.percent, 33.3);
    }

    #[test]
    fn lcg_sequence_is_repeatable() {
        let mut a = Lcg::default();
        let mut b = Lcg::new(42069);
        let first = a.next_f64();
        // (42069 * 9301 + 49297) % 233280 = 122506
        assert!((first - 122506.0 / 233280.0).abs() < 1e-12);
        assert_eq!(first, b.next_f64());
        for _ in 0..100 {
            let v = a.next_f64();
            assert_eq!(v, b.next_f64());
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn pepperoni_layout_is_deterministic_and_on_the_pizza() {
        let first = pepperoni(PIZZA_CENTER, PIZZA_RADIUS);
        let second = pepperoni(PIZZA_CENTER, PIZZA_RADIUS);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3 + 6 + 8 + 4 + 4);

        for p in &first {
            assert!(p.center.distance(&PIZZA_CENTER) <= PIZZA_RADIUS * 0.9 + 1e-9);
            assert!((7.0..12.0).contains(&p.radius));
        }
        // Ring pieces are at least 8 units across.
        assert!(first[..21].iter().all(|p| p.radius >= 8.0));
    }

    #[test]
    fn pepperoni_ignores_slice_count() {
        let six = PizzaLayout::new(6).unwrap();
        let twelve = PizzaLayout::new(12).unwrap();
        assert_eq!(six.pepperoni, twelve.pepperoni);
        assert_eq!(six.cuts.len(), 6);
        assert_eq!(twelve.cuts.len(), 12);
    }

    #[test]
    fn division_grouping() {
        let g = division_groups(24, 8).unwrap();
        assert_eq!(g.per_group, 3);
        assert_eq!(g.remainder, 0);

        let g = division_groups(24, 5).unwrap();
        assert_eq!(g.per_group, 4);
        assert_eq!(g.remainder, 4);

        assert_eq!(division_groups(24, 0), Err(GradingError::DivisionByZero));
    }

    #[test]
    fn multiplication_grouping() {
        let g = multiplication_groups(3, 4);
        assert_eq!(g.product, 12);
        assert_eq!(multiplication_groups(u32::MAX, 2).product, u32::MAX as u64 * 2);
    }
}
