//! Options for a tesseract handle.
//!
//! Every key is optional; missing keys take the reference defaults.
//! Keys are snake_case, with camelCase aliases for browser hosts.
//!
//! ```json
//! {
//!   "color": "#5968EA",
//!   "variant": "breathe",
//!   "rotation_preset": "dual",
//!   "projection": { "distance_4d": 3.0, "scale": 36 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::animation::{RotationPreset, Variant};
use crate::error::{Result, TesseractError};
use crate::projection::ProjectionConfig;
use crate::render::RenderStyle;

/// Everything needed to create a [`Tesseract`](crate::Tesseract)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TesseractOptions {
    /// Colour, stroke widths and viewBox
    #[serde(flatten)]
    pub style: RenderStyle,

    #[serde(default)]
    pub variant: Variant,

    #[serde(default, alias = "rotationPreset")]
    pub rotation_preset: RotationPreset,

    /// Time multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Start playing on creation
    #[serde(default = "default_true", alias = "autoPlay")]
    pub auto_play: bool,

    /// Half-edge of the hypercube
    #[serde(default = "default_hypercube_scale", alias = "hypercubeScale")]
    pub hypercube_scale: f64,

    #[serde(default, alias = "projectionConfig")]
    pub projection: ProjectionConfig,
}

fn default_speed() -> f64 { 1.0 }
fn default_true() -> bool { true }
fn default_hypercube_scale() -> f64 { 1.0 }

impl Default for TesseractOptions {
    fn default() -> Self {
        Self {
            style: RenderStyle::default(),
            variant: Variant::default(),
            rotation_preset: RotationPreset::default(),
            speed: 1.0,
            auto_play: true,
            hypercube_scale: 1.0,
            projection: ProjectionConfig::default(),
        }
    }
}

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TesseractError::invalid_option(field, format!("must be finite, got {}", value)))
    }
}

pub(crate) fn positive(field: &str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TesseractError::invalid_option(field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TesseractError::invalid_option(field, format!("must not be negative, got {}", value)))
    }
}

impl TesseractOptions {
    /// Parse and validate a JSON options document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: TesseractOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read, parse and validate an options file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TesseractError::io(path, e))?;
        tracing::debug!(path = %path.display(), "loaded tesseract options");
        Self::from_json_str(&content)
    }

    /// Pretty JSON, suitable for writing back to a file
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    ///
    /// Camera distances are only required to be finite: a distance inside
    /// the hypercube's extent is legal and renders as a visual singularity.
    pub fn validate(&self) -> Result<()> {
        positive("speed", self.speed)?;
        positive("view_box_size", self.style.view_box_size)?;
        non_negative("stroke_width", self.style.stroke_width)?;
        non_negative("vertex_radius", self.style.vertex_radius)?;
        non_negative("hypercube_scale", self.hypercube_scale)?;

        let p = &self.projection;
        finite("projection.distance_4d", p.distance_4d)?;
        finite("projection.camera_distance", p.camera_distance)?;
        finite("projection.rotate_x", p.rotate_x)?;
        finite("projection.rotate_y", p.rotate_y)?;
        finite("projection.scale", p.scale)?;
        if let Some(min) = p.min_denominator {
            positive("projection.min_denominator", min)?;
        }

        Ok(())
    }
}
