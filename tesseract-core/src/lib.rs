//! # Tesseract Core
//!
//! A 4D hypercube geometry engine with a depth-sorted wireframe renderer.
//!
//! The per-frame pipeline is pure and stateless:
//!
//! - **Geometry**: the 16 vertices and 32 edges of the tesseract
//! - **Rotation**: six plane rotations composed XY, XZ, XW, YZ, YW, ZW
//! - **Projection**: 4D perspective to 3D, view tilt, 3D perspective to 2D
//! - **Render**: painter's-algorithm draw list with depth-weighted strokes
//!
//! Around it sit the stateful pieces: an animation driver mapping time to
//! angles, and a caller-owned [`Tesseract`] handle tying it all together.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use tesseract_core::{Tesseract, TesseractOptions, RotationPreset};
//!
//! let options = TesseractOptions::from_json_str(r#"{ "rotation_preset": "dual" }"#).unwrap();
//! let mut tesseract = Tesseract::create(options).unwrap();
//! assert_eq!(tesseract.animator().preset(), RotationPreset::Dual);
//!
//! // First sample anchors the timeline, the second is 2.5 s in
//! tesseract.frame_at(Duration::ZERO);
//! let frame = tesseract.frame_at(Duration::from_millis(2_500));
//! assert_eq!(frame.draw_list.lines.len(), 32);
//! assert_eq!(frame.draw_list.dots.len(), 16);
//!
//! let svg = tesseract.to_svg(&frame);
//! assert!(svg.starts_with("<svg"));
//! tesseract.dispose();
//! ```

pub mod animation;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod instance;
pub mod projection;
pub mod render;
pub mod rotation;
pub mod svg;

// Re-export main types
pub use animation::{Animator, Easing, FrameParams, RotationPreset, Variant};
pub use clock::{FrameClock, ManualClock, MonotonicClock};
pub use color::Color;
pub use config::TesseractOptions;
pub use error::{Result, TesseractError};
pub use geometry::{generate_edges, generate_vertices, Edge, Hypercube, Vertex4};
pub use instance::{Frame, Tesseract};
pub use projection::{
    project_3d_to_2d, project_4d_to_3d, project_vertices, Point3, ProjectedPoint,
    ProjectionConfig,
};
pub use render::{render, render_frame, Dot, DrawList, Line, RenderStyle};
pub use rotation::{
    identity_matrix, multiply_matrices, multiply_matrix_vector, rotate_vertices, Matrix4,
    RotationAngles, RotationPlane,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vertices of a tesseract
pub const NUM_VERTICES: usize = geometry::VERTEX_COUNT;

/// Edges of a tesseract
pub const NUM_EDGES: usize = geometry::EDGE_COUNT;
