//! 4D → 3D → 2D projection pipeline.
//!
//! Two perspective divides in sequence. The first places a synthetic camera
//! on the +w axis at `distance_4d`; the second looks at the 3D result from
//! `camera_distance` on +z after a fixed viewing tilt (rotate about Y, then
//! about X). The perspective factors multiply into [`ProjectedPoint::scale`]
//! so geometry near either camera reads heavier when rendered.
//!
//! Nothing here validates. A camera inside the transformed extent
//! (`distance - coordinate <= 0`) produces infinite or sign-flipped output,
//! which drawing surfaces skip. Setting
//! [`ProjectionConfig::min_denominator`] clamps the divisor instead.

use serde::{Deserialize, Serialize};

use crate::geometry::Vertex4;

/// Reference 4D camera distance
pub const DEFAULT_DISTANCE_4D: f64 = 2.5;
/// Reference 3D camera distance
pub const DEFAULT_CAMERA_DISTANCE: f64 = 5.0;
/// Reference viewing tilt about X, radians
pub const DEFAULT_ROTATE_X: f64 = -0.3;
/// Reference viewing turn about Y, radians
pub const DEFAULT_ROTATE_Y: f64 = 0.5;
/// Reference pixels per unit
pub const DEFAULT_PIXEL_SCALE: f64 = 40.0;

/// A point after the 4D → 3D divide, carrying its perspective factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub scale: f64,
}

/// A vertex in screen space, relative to the drawing centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Post-tilt z; larger is nearer the viewer. Only used for ordering and weight.
    pub depth: f64,
    /// Product of both perspective factors
    pub scale: f64,
}

impl ProjectedPoint {
    /// Shift the 2D position, leaving depth and scale untouched
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Projection parameters. The defaults are the reference scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Distance of the 4D camera along +w
    #[serde(default = "default_distance_4d", alias = "distance4D")]
    pub distance_4d: f64,

    /// Distance of the 3D camera along +z
    #[serde(default = "default_camera_distance", alias = "cameraDistance")]
    pub camera_distance: f64,

    /// Viewing tilt about X, applied second
    #[serde(default = "default_rotate_x", alias = "rotateX")]
    pub rotate_x: f64,

    /// Viewing turn about Y, applied first
    #[serde(default = "default_rotate_y", alias = "rotateY")]
    pub rotate_y: f64,

    /// Pixels per unit
    #[serde(default = "default_pixel_scale")]
    pub scale: f64,

    /// Perspective (true) or orthographic (false) 3D → 2D step
    #[serde(default = "default_true")]
    pub perspective: bool,

    /// Lower bound on both perspective denominators; unset keeps the
    /// unguarded reference behaviour
    #[serde(default, alias = "minDenominator", skip_serializing_if = "Option::is_none")]
    pub min_denominator: Option<f64>,
}

fn default_distance_4d() -> f64 { DEFAULT_DISTANCE_4D }
fn default_camera_distance() -> f64 { DEFAULT_CAMERA_DISTANCE }
fn default_rotate_x() -> f64 { DEFAULT_ROTATE_X }
fn default_rotate_y() -> f64 { DEFAULT_ROTATE_Y }
fn default_pixel_scale() -> f64 { DEFAULT_PIXEL_SCALE }
fn default_true() -> bool { true }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            distance_4d: DEFAULT_DISTANCE_4D,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            rotate_x: DEFAULT_ROTATE_X,
            rotate_y: DEFAULT_ROTATE_Y,
            scale: DEFAULT_PIXEL_SCALE,
            perspective: true,
            min_denominator: None,
        }
    }
}

impl ProjectionConfig {
    /// Same config with a different pixel scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Same config with a different 4D camera distance
    pub fn with_distance_4d(mut self, distance_4d: f64) -> Self {
        self.distance_4d = distance_4d;
        self
    }

    /// Full pipeline for one rotated vertex
    pub fn project(&self, v: &Vertex4) -> ProjectedPoint {
        let p3 = project_4d_with(v, self.distance_4d, self.min_denominator);
        project_3d_to_2d(&p3, self)
    }
}

/// `distance / (distance - depth)`, optionally with the divisor clamped
fn perspective_factor(distance: f64, depth: f64, min_denominator: Option<f64>) -> f64 {
    let mut denominator = distance - depth;
    if denominator <= 0.0 {
        tracing::debug!(distance, depth, "perspective denominator is non-positive");
    }
    if let Some(min) = min_denominator {
        denominator = denominator.max(min);
    }
    distance / denominator
}

fn project_4d_with(point: &Vertex4, distance_4d: f64, min_denominator: Option<f64>) -> Point3 {
    let k = perspective_factor(distance_4d, point.w, min_denominator);
    Point3 {
        x: point.x * k,
        y: point.y * k,
        z: point.z * k,
        scale: k,
    }
}

/// Perspective divide from 4D to 3D with the camera at `w = distance_4d`.
///
/// `scale` grows without bound as `w` approaches `distance_4d` from below.
pub fn project_4d_to_3d(point: &Vertex4, distance_4d: f64) -> Point3 {
    project_4d_with(point, distance_4d, None)
}

/// Apply the viewing tilt: rotate about Y by `rotate_y`, then about X by
/// `rotate_x`. Returns `(x, y, z)` after both.
pub fn view_tilt(point: &Point3, rotate_x: f64, rotate_y: f64) -> (f64, f64, f64) {
    let (sin_y, cos_y) = rotate_y.sin_cos();
    let x1 = point.x * cos_y - point.z * sin_y;
    let z1 = point.x * sin_y + point.z * cos_y;

    let (sin_x, cos_x) = rotate_x.sin_cos();
    let y1 = point.y * cos_x - z1 * sin_x;
    let z2 = point.y * sin_x + z1 * cos_x;

    (x1, y1, z2)
}

/// Tilt, then project to 2D (perspective or orthographic) and apply the
/// pixel scale. The output scale compounds the incoming 3D scale.
pub fn project_3d_to_2d(point: &Point3, config: &ProjectionConfig) -> ProjectedPoint {
    let (x1, y1, z2) = view_tilt(point, config.rotate_x, config.rotate_y);

    if config.perspective {
        let k = perspective_factor(config.camera_distance, z2, config.min_denominator);
        ProjectedPoint {
            x: x1 * k * config.scale,
            y: y1 * k * config.scale,
            depth: z2,
            scale: k * point.scale,
        }
    } else {
        ProjectedPoint {
            x: x1 * config.scale,
            y: y1 * config.scale,
            depth: z2,
            scale: point.scale,
        }
    }
}

/// Project every vertex; output indices match input indices
pub fn project_vertices(vertices: &[Vertex4], config: &ProjectionConfig) -> Vec<ProjectedPoint> {
    vertices.iter().map(|v| config.project(v)).collect()
}
