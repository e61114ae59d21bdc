//! Depth-sorted wireframe rendering.
//!
//! Turns projected vertices into an ordered list of draw primitives using
//! the painter's algorithm: edges sorted by the mean depth of their
//! endpoints, then vertices sorted by their own depth, farthest first.
//! Visual weight follows the cumulative perspective scale, with floors so
//! far geometry never vanishes.
//!
//! The renderer trusts its input. Non-finite coordinates from a singular
//! projection pass straight through to the draw list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::color::Color;
use crate::geometry::{Edge, Hypercube};
use crate::projection::{project_vertices, ProjectedPoint, ProjectionConfig};
use crate::rotation::{rotate_vertices, RotationAngles};

/// Edge opacity: `clamp(avg_scale * GAIN, FLOOR, 1)`
pub const EDGE_OPACITY_GAIN: f64 = 0.5;
pub const EDGE_OPACITY_FLOOR: f64 = 0.2;

/// Edge width: `stroke_width * max(avg_scale * GAIN, FLOOR)`
pub const EDGE_WIDTH_GAIN: f64 = 0.7;
pub const EDGE_WIDTH_FLOOR: f64 = 0.5;

/// Dot radius: `vertex_radius * max(scale * GAIN, FLOOR)`
pub const VERTEX_RADIUS_GAIN: f64 = 0.8;
pub const VERTEX_RADIUS_FLOOR: f64 = 0.5;

/// Dot opacity: `clamp(scale * GAIN, FLOOR, 1)`
pub const VERTEX_OPACITY_GAIN: f64 = 0.6;
pub const VERTEX_OPACITY_FLOOR: f64 = 0.3;

/// Stroke and layout settings for a rendered frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    #[serde(default)]
    pub color: Color,

    /// Base edge width before depth modulation
    #[serde(default = "default_stroke_width", alias = "strokeWidth")]
    pub stroke_width: f64,

    /// Base dot radius before depth modulation
    #[serde(default = "default_vertex_radius", alias = "vertexRadius")]
    pub vertex_radius: f64,

    #[serde(default = "default_true", alias = "showVertices")]
    pub show_vertices: bool,

    /// Edge of the square viewBox; output is centred on its midpoint
    #[serde(default = "default_view_box_size", alias = "viewBoxSize")]
    pub view_box_size: f64,
}

fn default_stroke_width() -> f64 { 1.5 }
fn default_vertex_radius() -> f64 { 2.0 }
fn default_view_box_size() -> f64 { 200.0 }
fn default_true() -> bool { true }

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            stroke_width: 1.5,
            vertex_radius: 2.0,
            show_vertices: true,
            view_box_size: 200.0,
        }
    }
}

impl RenderStyle {
    /// Midpoint of the viewBox
    pub fn center(&self) -> f64 {
        self.view_box_size / 2.0
    }
}

/// A stroked edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub edge: Edge,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub opacity: f64,
    /// Mean endpoint depth used for ordering
    pub depth: f64,
}

/// A filled vertex marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub opacity: f64,
    pub depth: f64,
}

/// Primitives in draw order: all lines, then all dots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub lines: Vec<Line>,
    pub dots: Vec<Dot>,
}

impl DrawList {
    /// Total primitive count
    pub fn len(&self) -> usize {
        self.lines.len() + self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.dots.is_empty()
    }
}

/// Ascending depth order. `-0.0` and `0.0` compare equal so the stable
/// sort keeps input order for them; NaN depths of either sign sort last.
fn by_depth(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Build the draw list for one frame.
///
/// `points` must be indexed like the hypercube's vertices; an edge naming a
/// point that is not there draws no line. Coordinates are shifted so the
/// origin lands on the centre of the style's viewBox.
pub fn render(points: &[ProjectedPoint], edges: &[Edge], style: &RenderStyle) -> DrawList {
    let center = style.center();
    let screen: Vec<ProjectedPoint> = points.iter().map(|p| p.translated(center, center)).collect();

    let mut lines: Vec<Line> = edges
        .iter()
        .filter_map(|&edge| {
            let p1 = screen.get(edge.a)?;
            let p2 = screen.get(edge.b)?;
            let avg_scale = (p1.scale + p2.scale) / 2.0;

            Some(Line {
                edge,
                x1: p1.x,
                y1: p1.y,
                x2: p2.x,
                y2: p2.y,
                width: style.stroke_width
                    * (avg_scale * EDGE_WIDTH_GAIN).clamp(EDGE_WIDTH_FLOOR, f64::INFINITY),
                opacity: (avg_scale * EDGE_OPACITY_GAIN).clamp(EDGE_OPACITY_FLOOR, 1.0),
                depth: (p1.depth + p2.depth) / 2.0,
            })
        })
        .collect();
    lines.sort_by(|a, b| by_depth(a.depth, b.depth));

    let mut dots = Vec::new();
    if style.show_vertices {
        dots = screen
            .iter()
            .enumerate()
            .map(|(index, p)| Dot {
                index,
                cx: p.x,
                cy: p.y,
                radius: style.vertex_radius
                    * (p.scale * VERTEX_RADIUS_GAIN).clamp(VERTEX_RADIUS_FLOOR, f64::INFINITY),
                opacity: (p.scale * VERTEX_OPACITY_GAIN).clamp(VERTEX_OPACITY_FLOOR, 1.0),
                depth: p.depth,
            })
            .collect();
        dots.sort_by(|a, b| by_depth(a.depth, b.depth));
    }

    DrawList { lines, dots }
}

/// The whole per-frame pipeline: rotate, project, depth-sort.
pub fn render_frame(
    cube: &Hypercube,
    angles: &RotationAngles,
    projection: &ProjectionConfig,
    style: &RenderStyle,
) -> DrawList {
    let rotated = rotate_vertices(&angles.to_matrix(), cube.vertices());
    let projected = project_vertices(&rotated, projection);
    tracing::trace!(
        xw = angles.xw,
        yw = angles.yw,
        zw = angles.zw,
        "rendering tesseract frame"
    );
    render(&projected, cube.edges(), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, depth: f64, scale: f64) -> ProjectedPoint {
        ProjectedPoint { x, y, depth, scale }
    }

    #[test]
    fn test_lines_sorted_far_to_near() {
        let points = [
            point(0.0, 0.0, 1.0, 1.0),
            point(1.0, 0.0, -2.0, 1.0),
            point(0.0, 1.0, 0.0, 1.0),
        ];
        let edges = [Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 2)];
        let list = render(&points, &edges, &RenderStyle::default());

        let order: Vec<Edge> = list.lines.iter().map(|l| l.edge).collect();
        // depths: (0,1) -0.5, (0,2) 0.5, (1,2) -1.0
        assert_eq!(order, vec![Edge::new(1, 2), Edge::new(0, 1), Edge::new(0, 2)]);
    }

    #[test]
    fn test_coordinates_are_centred() {
        let points = [point(0.0, 0.0, 0.0, 1.0), point(10.0, -5.0, 0.0, 1.0)];
        let list = render(&points, &[Edge::new(0, 1)], &RenderStyle::default());
        let line = list.lines[0];
        assert_eq!((line.x1, line.y1), (100.0, 100.0));
        assert_eq!((line.x2, line.y2), (110.0, 95.0));
    }

    #[test]
    fn test_edge_weight_floors_and_ceiling() {
        let far = [point(0.0, 0.0, 0.0, 0.1), point(1.0, 1.0, 0.0, 0.1)];
        let list = render(&far, &[Edge::new(0, 1)], &RenderStyle::default());
        assert_eq!(list.lines[0].opacity, EDGE_OPACITY_FLOOR);
        assert_eq!(list.lines[0].width, 1.5 * EDGE_WIDTH_FLOOR);

        let near = [point(0.0, 0.0, 0.0, 4.0), point(1.0, 1.0, 0.0, 4.0)];
        let list = render(&near, &[Edge::new(0, 1)], &RenderStyle::default());
        assert_eq!(list.lines[0].opacity, 1.0);
        assert!((list.lines[0].width - 1.5 * 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_edge_weight_uses_average_scale() {
        let pts = [point(0.0, 0.0, 0.0, 1.0), point(1.0, 1.0, 0.0, 1.4)];
        let list = render(&pts, &[Edge::new(0, 1)], &RenderStyle::default());
        assert!((list.lines[0].opacity - 0.6).abs() < 1e-12);
        assert!((list.lines[0].width - 1.5 * 0.84).abs() < 1e-12);
    }

    #[test]
    fn test_dots_use_own_scale() {
        let pts = [point(0.0, 0.0, 2.0, 0.2), point(1.0, 1.0, -1.0, 1.5)];
        let list = render(&pts, &[Edge::new(0, 1)], &RenderStyle::default());

        assert_eq!(list.dots[0].index, 1);
        assert!((list.dots[0].radius - 2.0 * 1.2).abs() < 1e-12);
        assert!((list.dots[0].opacity - 0.9).abs() < 1e-12);

        assert_eq!(list.dots[1].index, 0);
        assert_eq!(list.dots[1].radius, 2.0 * VERTEX_RADIUS_FLOOR);
        assert_eq!(list.dots[1].opacity, VERTEX_OPACITY_FLOOR);
    }

    #[test]
    fn test_hidden_vertices_emit_no_dots() {
        let style = RenderStyle {
            show_vertices: false,
            ..RenderStyle::default()
        };
        let list = render_frame(
            &Hypercube::default(),
            &RotationAngles::zero(),
            &ProjectionConfig::default(),
            &style,
        );
        assert_eq!(list.lines.len(), 32);
        assert!(list.dots.is_empty());
    }

    #[test]
    fn test_edges_past_the_points_are_skipped() {
        let pts = [point(0.0, 0.0, 0.0, 1.0), point(1.0, 1.0, 0.0, 1.0)];
        let edges = [Edge::new(0, 1), Edge::new(1, 3), Edge::new(4, 0)];
        let list = render(&pts, &edges, &RenderStyle::default());

        assert_eq!(list.lines.len(), 1);
        assert_eq!(list.lines[0].edge, Edge::new(0, 1));
        assert_eq!(list.dots.len(), 2);

        let empty = render(&[], Hypercube::default().edges(), &RenderStyle::default());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_nan_passes_through() {
        let pts = [point(f64::NAN, 0.0, f64::NAN, f64::NAN), point(1.0, 1.0, 0.0, 1.0)];
        let list = render(&pts, &[Edge::new(0, 1)], &RenderStyle::default());
        assert!(list.lines[0].x1.is_nan());
        assert!(list.lines[0].opacity.is_nan());
        assert_eq!(list.dots.last().map(|d| d.index), Some(0));
    }
}
