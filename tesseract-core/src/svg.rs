//! SVG serialisation of rendered frames.
//!
//! Produces a standalone `<svg>` document: glow filter definitions, an edge
//! group and an optional vertex group. Primitives keep draw-list order, so
//! document order is paint order.

use std::fmt::Write;

use crate::instance::Frame;
use crate::render::{DrawList, RenderStyle};

/// CSS class of the root element
pub const ROOT_CLASS: &str = "tesseract-4d";
/// CSS class of the edge group
pub const EDGES_CLASS: &str = "tesseract-4d__edges";
/// CSS class of the vertex group
pub const VERTICES_CLASS: &str = "tesseract-4d__vertices";

/// Soft glow for edges, strong double blur for vertices
fn write_defs(out: &mut String, uid: &str) {
    let _ = write!(
        out,
        concat!(
            "<defs>",
            "<filter id=\"{uid}-glow\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">",
            "<feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"2\" result=\"blur\"/>",
            "<feMerge><feMergeNode in=\"blur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>",
            "</filter>",
            "<filter id=\"{uid}-glow-strong\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">",
            "<feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"4\" result=\"blur1\"/>",
            "<feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"8\" result=\"blur2\"/>",
            "<feMerge><feMergeNode in=\"blur2\"/><feMergeNode in=\"blur1\"/>",
            "<feMergeNode in=\"SourceGraphic\"/></feMerge>",
            "</filter>",
            "</defs>"
        ),
        uid = uid
    );
}

fn write_primitives(out: &mut String, list: &DrawList, style: &RenderStyle, uid: &str) {
    let color = style.color.to_hex();

    let _ = write!(out, "<g class=\"{EDGES_CLASS}\" filter=\"url(#{uid}-glow)\">");
    for line in &list.lines {
        let _ = write!(
            out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\" stroke-linecap=\"round\"/>",
            line.x1, line.y1, line.x2, line.y2, color, line.width, line.opacity
        );
    }
    out.push_str("</g>");

    if style.show_vertices {
        let _ = write!(out, "<g class=\"{VERTICES_CLASS}\" filter=\"url(#{uid}-glow-strong)\">");
        for dot in &list.dots {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>",
                dot.cx, dot.cy, dot.radius, color, dot.opacity
            );
        }
        out.push_str("</g>");
    }
}

/// Render a frame as a complete SVG document.
///
/// `uid` prefixes filter ids so several documents can share one page.
pub fn to_document(frame: &Frame, style: &RenderStyle, uid: &str) -> String {
    let size = style.view_box_size;
    let mut out = String::with_capacity(256 + frame.draw_list.len() * 160);

    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {size} {size}\" class=\"{ROOT_CLASS}\""
    );
    if frame.params.opacity < 1.0 {
        let _ = write!(out, " opacity=\"{}\"", frame.params.opacity);
    }
    out.push('>');

    write_defs(&mut out, uid);
    write_primitives(&mut out, &frame.draw_list, style, uid);

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FrameParams;
    use crate::geometry::Hypercube;
    use crate::projection::ProjectionConfig;
    use crate::render::render_frame;
    use crate::rotation::RotationAngles;

    fn frame(style: &RenderStyle, opacity: f64) -> Frame {
        Frame {
            params: FrameParams {
                opacity,
                ..FrameParams::default()
            },
            draw_list: render_frame(
                &Hypercube::default(),
                &RotationAngles::zero(),
                &ProjectionConfig::default(),
                style,
            ),
        }
    }

    #[test]
    fn test_document_structure() {
        let style = RenderStyle::default();
        let svg = to_document(&frame(&style, 1.0), &style, "t4d-1");

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 200 200\""));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("id=\"t4d-1-glow\""));
        assert!(svg.contains("id=\"t4d-1-glow-strong\""));
        assert_eq!(svg.matches("<line ").count(), 32);
        assert_eq!(svg.matches("<circle ").count(), 16);
        assert!(svg.contains("stroke=\"#FFCB00\""));
        assert!(!svg.contains(" opacity="));
    }

    #[test]
    fn test_vertices_group_omitted() {
        let style = RenderStyle {
            show_vertices: false,
            ..RenderStyle::default()
        };
        let svg = to_document(&frame(&style, 1.0), &style, "x");
        assert!(!svg.contains(VERTICES_CLASS));
        assert_eq!(svg.matches("<circle ").count(), 0);
    }

    #[test]
    fn test_fading_frame_sets_root_opacity() {
        let style = RenderStyle::default();
        let svg = to_document(&frame(&style, 0.25), &style, "x");
        assert!(svg.contains(" opacity=\"0.25\">"));
    }
}
