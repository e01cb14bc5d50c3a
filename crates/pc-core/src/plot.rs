//! Plot coordinate transform and the SVG document renderer.
//!
//! Plot units are the user's coordinates; SVG units are what the document
//! draws in. The SVG y axis points down, so `plot → svg` flips y.

use crate::geometry::Vec2;
use crate::input::{X_RANGE, Y_RANGE};
use crate::point::Point;
use crate::region::RegionShape;

/// SVG units per plot unit.
pub const PIXELS_PER_UNIT: f64 = 40.0;
/// Half the width (and height) of the square view box.
pub const VIEW_HALF_EXTENT: f64 = 220.0;
/// Labelled ticks on each axis.
pub const TICKS: [i32; 10] = [-5, -4, -3, -2, -1, 1, 2, 3, 4, 5];

const HIT_COLOR: &str = "#22c55e";
const MISS_COLOR: &str = "#ef4444";
const POINT_RADIUS: f64 = 5.0;

/// Linear mapping between plot units and SVG units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    ppu: f64,
}

impl Default for PlotTransform {
    fn default() -> Self {
        Self::new(PIXELS_PER_UNIT)
    }
}

impl PlotTransform {
    #[must_use]
    pub const fn new(ppu: f64) -> Self {
        Self { ppu }
    }

    #[must_use]
    pub const fn pixels_per_unit(&self) -> f64 {
        self.ppu
    }

    /// Scale a length from plot units to SVG units.
    #[must_use]
    pub fn scale(&self, length: f64) -> f64 {
        length * self.ppu
    }

    /// Map a plot point to SVG coordinates.
    #[must_use]
    pub fn to_svg(&self, point: Vec2) -> (f64, f64) {
        (point.x * self.ppu, -point.y * self.ppu)
    }

    /// Map an SVG position (e.g. a click) back to plot units.
    ///
    /// The result is rounded to six decimals and clamped to the input bounds,
    /// so it can be submitted as-is.
    #[must_use]
    pub fn to_plot(&self, svg_x: f64, svg_y: f64) -> Vec2 {
        let x = round6(svg_x / self.ppu).clamp(X_RANGE.0, X_RANGE.1);
        let y = round6(-svg_y / self.ppu).clamp(Y_RANGE.0, Y_RANGE.1);
        Vec2::new(x, y)
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Format a coordinate for SVG output: shortest decimal form, no `-0`.
#[must_use]
pub fn fmt_num(value: f64) -> String {
    format!("{}", value + 0.0)
}

/// Render the full plot: axes, ticks, the region for `r`, the input-bounds
/// frame and one dot per history point.
#[must_use]
pub fn render_svg(r: Option<f64>, points: &[Point], transform: &PlotTransform) -> String {
    let extent = fmt_num(VIEW_HALF_EXTENT);
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-{extent} -{extent} {size} {size}" preserveAspectRatio="xMidYMid meet">"#,
        size = fmt_num(VIEW_HALF_EXTENT * 2.0),
    ));
    svg.push('\n');

    push_axes(&mut svg, transform);

    for element in RegionShape::for_radius(r).to_svg(transform) {
        svg.push_str("  ");
        svg.push_str(&element);
        svg.push('\n');
    }

    let (frame_x, frame_y) = transform.to_svg(Vec2::new(X_RANGE.0, Y_RANGE.1));
    svg.push_str(&format!(
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"red\" stroke-width=\"2\" stroke-dasharray=\"5,5\"/>\n",
        fmt_num(frame_x),
        fmt_num(frame_y),
        fmt_num(transform.scale(X_RANGE.1 - X_RANGE.0)),
        fmt_num(transform.scale(Y_RANGE.1 - Y_RANGE.0)),
    ));

    for point in points {
        let (cx, cy) = transform.to_svg(Vec2::new(point.x, point.y));
        let fill = if point.result { HIT_COLOR } else { MISS_COLOR };
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\" stroke=\"#333\" stroke-width=\"1\"/>\n",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(POINT_RADIUS),
        ));
    }

    if r.is_none() {
        svg.push_str(
            "  <text x=\"0\" y=\"-20\" font-weight=\"bold\" text-anchor=\"middle\">Enter R</text>\n",
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_axes(svg: &mut String, transform: &PlotTransform) {
    let e = fmt_num(VIEW_HALF_EXTENT);
    svg.push_str(&format!(
        "  <line x1=\"-{e}\" y1=\"0\" x2=\"{e}\" y2=\"0\" stroke=\"black\" stroke-width=\"2\"/>\n"
    ));
    svg.push_str(&format!(
        "  <line x1=\"0\" y1=\"-{e}\" x2=\"0\" y2=\"{e}\" stroke=\"black\" stroke-width=\"2\"/>\n"
    ));
    let tip = VIEW_HALF_EXTENT - 10.0;
    svg.push_str(&format!(
        "  <polygon points=\"{e},0 {t},-5 {t},5\" fill=\"black\"/>\n",
        t = fmt_num(tip)
    ));
    svg.push_str(&format!(
        "  <polygon points=\"0,-{e} -5,-{t} 5,-{t}\" fill=\"black\"/>\n",
        t = fmt_num(tip)
    ));

    for tick in TICKS {
        let offset = fmt_num(transform.scale(f64::from(tick)));
        let neg_offset = fmt_num(-transform.scale(f64::from(tick)));
        svg.push_str(&format!(
            "  <line x1=\"{offset}\" y1=\"-3\" x2=\"{offset}\" y2=\"3\" stroke=\"black\" stroke-width=\"1\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{offset}\" y=\"15\" font-size=\"10\" text-anchor=\"middle\">{tick}</text>\n"
        ));
        svg.push_str(&format!(
            "  <line x1=\"-3\" y1=\"{neg_offset}\" x2=\"3\" y2=\"{neg_offset}\" stroke=\"black\" stroke-width=\"1\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"-10\" y=\"{}\" font-size=\"10\" text-anchor=\"end\">{tick}</text>\n",
            fmt_num(-transform.scale(f64::from(tick)) + 3.0)
        ));
    }

    svg.push_str(&format!(
        "  <text x=\"{t}\" y=\"-10\" font-weight=\"bold\">X</text>\n",
        t = fmt_num(tip)
    ));
    svg.push_str(&format!(
        "  <text x=\"10\" y=\"-{t}\" font-weight=\"bold\">Y</text>\n",
        t = fmt_num(tip)
    ));
}
