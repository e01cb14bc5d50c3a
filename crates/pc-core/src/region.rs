//! Drawable shape of the region for the radius currently entered.
//!
//! The shape is derived from the same figures [`crate::geometry`] tests
//! against, so the picture and the membership test cannot drift apart.

use crate::geometry::{ORIGIN_TOLERANCE, QuarterDisc, Rect, Region, Triangle, Vec2};
use crate::plot::{PlotTransform, fmt_num};

const FILL: &str = "#3b82f6";
const STROKE: &str = "#2563eb";
const ORIGIN_DOT_RADIUS: f64 = 5.0;

/// What to draw for a given (possibly missing) radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionShape {
    /// No radius entered yet.
    Absent,
    /// `r = 0`: the region is the origin alone.
    Origin,
    /// `r > 0`: the three figures of the region.
    Figures {
        rectangle: Rect,
        quarter_disc: QuarterDisc,
        triangle: Triangle,
    },
    /// Negative or non-finite radius; no region is defined for it.
    Undefined { r: f64 },
}

impl RegionShape {
    /// Derive the shape for `r`.
    #[must_use]
    pub fn for_radius(r: Option<f64>) -> Self {
        let Some(r) = r else {
            return Self::Absent;
        };
        if r.abs() <= ORIGIN_TOLERANCE {
            return Self::Origin;
        }
        match Region::new(r) {
            Some(region) => Self::Figures {
                rectangle: region.rectangle(),
                quarter_disc: region.quarter_disc(),
                triangle: region.triangle(),
            },
            None => {
                tracing::debug!(r, "no region defined for this radius; drawing nothing");
                Self::Undefined { r }
            }
        }
    }

    /// SVG elements for the shape, in plot order.
    #[must_use]
    pub fn to_svg(&self, transform: &PlotTransform) -> Vec<String> {
        match self {
            Self::Absent | Self::Undefined { .. } => Vec::new(),
            Self::Origin => vec![format!(
                r#"<circle cx="0" cy="0" r="{}" fill="{FILL}" stroke="{STROKE}" stroke-width="2"/>"#,
                fmt_num(ORIGIN_DOT_RADIUS)
            )],
            Self::Figures {
                rectangle,
                quarter_disc,
                triangle,
            } => vec![
                rect_element(rectangle, transform),
                quarter_disc_element(quarter_disc, transform),
                triangle_element(triangle, transform),
            ],
        }
    }
}

fn rect_element(rect: &Rect, transform: &PlotTransform) -> String {
    // The SVG origin of a rect is its top-left corner: min x, max y in plot units.
    let (x, y) = transform.to_svg(Vec2::new(rect.min.x, rect.max.y));
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{FILL}" fill-opacity="0.5" stroke="{STROKE}"/>"#,
        fmt_num(x),
        fmt_num(y),
        fmt_num(transform.scale(rect.width())),
        fmt_num(transform.scale(rect.height())),
    )
}

fn quarter_disc_element(disc: &QuarterDisc, transform: &PlotTransform) -> String {
    let radius = transform.scale(disc.radius);
    let (start_x, start_y) = transform.to_svg(Vec2::new(-disc.radius, 0.0));
    let (end_x, end_y) = transform.to_svg(Vec2::new(0.0, disc.radius));
    format!(
        r#"<path d="M 0,0 L {},{} A {},{} 0 0,1 {},{} Z" fill="{FILL}" fill-opacity="0.5" stroke="{STROKE}"/>"#,
        fmt_num(start_x),
        fmt_num(start_y),
        fmt_num(radius),
        fmt_num(radius),
        fmt_num(end_x),
        fmt_num(end_y),
    )
}

fn triangle_element(triangle: &Triangle, transform: &PlotTransform) -> String {
    let points = triangle
        .vertices()
        .iter()
        .map(|vertex| {
            let (x, y) = transform.to_svg(*vertex);
            format!("{},{}", fmt_num(x), fmt_num(y))
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!(r#"<polygon points="{points}" fill="{FILL}" fill-opacity="0.5" stroke="{STROKE}"/>"#)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_radius_draws_nothing() {
        let shape = RegionShape::for_radius(None);
        assert_eq!(shape, RegionShape::Absent);
        assert!(shape.to_svg(&PlotTransform::default()).is_empty());
    }

    #[test]
    fn zero_radius_draws_origin_dot() {
        let elements = RegionShape::for_radius(Some(0.0)).to_svg(&PlotTransform::default());
        assert_eq!(elements.len(), 1);
        assert!(elements[0].starts_with("<circle"));
    }

    #[test]
    fn negative_radius_is_undefined() {
        let shape = RegionShape::for_radius(Some(-2.0));
        assert_eq!(shape, RegionShape::Undefined { r: -2.0 });
        assert!(shape.to_svg(&PlotTransform::default()).is_empty());
    }

    #[test]
    fn positive_radius_renders_three_figures_in_svg_space() {
        let elements = RegionShape::for_radius(Some(2.0)).to_svg(&PlotTransform::default());
        assert_eq!(
            elements,
            vec![
                r##"<rect x="0" y="-80" width="40" height="80" fill="#3b82f6" fill-opacity="0.5" stroke="#2563eb"/>"##.to_string(),
                r##"<path d="M 0,0 L -40,0 A 40,40 0 0,1 0,-40 Z" fill="#3b82f6" fill-opacity="0.5" stroke="#2563eb"/>"##.to_string(),
                r##"<polygon points="0,0 -80,0 0,-80" fill="#3b82f6" fill-opacity="0.5" stroke="#2563eb"/>"##.to_string(),
            ]
        );
    }

    #[test]
    fn shape_tracks_radius_changes() {
        let small = RegionShape::for_radius(Some(1.0));
        let large = RegionShape::for_radius(Some(3.0));
        assert!(small != large);
    }
}
