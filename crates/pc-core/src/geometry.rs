//! Membership test for the R-scaled composite region.
//!
//! The region is the union of three closed figures, all scaled by `r`:
//!
//! ```text
//! rectangle     x ∈ [0, r/2], y ∈ [0, r]
//! quarter-disc  x² + y² ≤ (r/2)², x ≤ 0, y ≥ 0
//! triangle      (0, 0), (-r, 0), (0, r)
//! ```
//!
//! Boundary points count as inside. For `r = 0` the region collapses to the
//! origin. Negative or non-finite radii have no defined region and never
//! contain anything.

/// Tolerance used when the region collapses to the origin.
pub const ORIGIN_TOLERANCE: f64 = 1e-9;

/// Relative slack for points lying on a triangle edge, scaled by the
/// triangle's extent squared.
pub const EDGE_TOLERANCE: f64 = 1e-9;

/// A point in plot units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned closed rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Quarter of a disc centred on the origin, covering the `x ≤ 0, y ≥ 0` quadrant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterDisc {
    pub radius: f64,
}

impl QuarterDisc {
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x <= 0.0 && p.y >= 0.0 && p.x.mul_add(p.x, p.y * p.y) <= self.radius * self.radius
    }
}

/// Closed triangle given by three vertices in any winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    /// Sign-consistency test: `p` is inside when it lies on the same side of
    /// all three edges (or on an edge).
    ///
    /// Edge values within [`EDGE_TOLERANCE`] of zero count as on the edge, so
    /// rounding in the cross products cannot push a boundary point out.
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        let extent = self.extent();
        let slack = EDGE_TOLERANCE * extent * extent;
        let sides = [
            edge_side(p, self.a, self.b),
            edge_side(p, self.b, self.c),
            edge_side(p, self.c, self.a),
        ];

        let has_negative = sides.iter().any(|d| *d < -slack);
        let has_positive = sides.iter().any(|d| *d > slack);
        !(has_negative && has_positive)
    }

    /// Largest absolute vertex coordinate.
    fn extent(&self) -> f64 {
        self.vertices()
            .iter()
            .map(|v| v.x.abs().max(v.y.abs()))
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub const fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }
}

// Both products are rounded the same way; a fused multiply-add would leave a
// residue on exact edge points.
#[allow(clippy::suboptimal_flops)]
fn edge_side(p: Vec2, from: Vec2, to: Vec2) -> f64 {
    (p.x - to.x) * (from.y - to.y) - (from.x - to.x) * (p.y - to.y)
}

/// The composite region for a positive radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    r: f64,
}

impl Region {
    /// Build the region for `r`. Returns `None` when `r` is not a positive
    /// finite number.
    #[must_use]
    pub fn new(r: f64) -> Option<Self> {
        (r.is_finite() && r > 0.0).then_some(Self { r })
    }

    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.r
    }

    #[must_use]
    pub fn rectangle(&self) -> Rect {
        Rect {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(self.r / 2.0, self.r),
        }
    }

    #[must_use]
    pub fn quarter_disc(&self) -> QuarterDisc {
        QuarterDisc {
            radius: self.r / 2.0,
        }
    }

    #[must_use]
    pub const fn triangle(&self) -> Triangle {
        Triangle {
            a: Vec2::new(0.0, 0.0),
            b: Vec2::new(-self.r, 0.0),
            c: Vec2::new(0.0, self.r),
        }
    }

    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        self.rectangle().contains(p) || self.quarter_disc().contains(p) || self.triangle().contains(p)
    }
}

/// Decide whether `(x, y)` lies inside the region scaled by `r`.
///
/// Total over all inputs: non-finite values and negative radii yield `false`,
/// `r = 0` accepts only the origin.
#[must_use]
pub fn contains(x: f64, y: f64, r: f64) -> bool {
    if !(x.is_finite() && y.is_finite() && r.is_finite()) {
        return false;
    }
    if r.abs() <= ORIGIN_TOLERANCE {
        return x.abs() <= ORIGIN_TOLERANCE && y.abs() <= ORIGIN_TOLERANCE;
    }
    Region::new(r).is_some_and(|region| region.contains(Vec2::new(x, y)))
}
