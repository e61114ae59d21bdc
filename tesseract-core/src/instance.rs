//! Caller-owned tesseract handles.
//!
//! A [`Tesseract`] bundles the cached geometry, style, projection and
//! playback state for one animated hypercube. The caller owns it outright;
//! there is no registry to look handles up in, and disposing is just
//! dropping. Handles share nothing mutable, so any number can render side
//! by side.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::{Animator, FrameParams, RotationPreset};
use crate::clock::FrameClock;
use crate::config::{positive, TesseractOptions};
use crate::error::Result;
use crate::geometry::Hypercube;
use crate::projection::ProjectionConfig;
use crate::render::{render_frame, DrawList, RenderStyle};
use crate::rotation::RotationAngles;
use crate::svg;

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Driver output the frame was rendered from
    pub params: FrameParams,
    pub draw_list: DrawList,
}

/// An animated hypercube
#[derive(Debug, Clone)]
pub struct Tesseract {
    id: Uuid,
    cube: Hypercube,
    style: RenderStyle,
    projection: ProjectionConfig,
    animator: Animator,
    initial: Frame,
}

impl Tesseract {
    /// Validate options and build a handle.
    ///
    /// The zero-angle frame is rendered immediately; it is what the handle
    /// shows until its animation first plays.
    pub fn create(options: TesseractOptions) -> Result<Self> {
        options.validate()?;

        let cube = Hypercube::new(options.hypercube_scale);
        let mut animator = Animator::new(options.variant, options.rotation_preset, options.speed);
        if options.auto_play {
            animator.play();
        }

        let params = FrameParams::default();
        let initial = Frame {
            params,
            draw_list: render_frame(&cube, &params.angles, &options.projection, &options.style),
        };

        let handle = Self {
            id: Uuid::new_v4(),
            cube,
            style: options.style,
            projection: options.projection,
            animator,
            initial,
        };

        tracing::debug!(
            id = %handle.id,
            variant = %handle.animator.variant(),
            preset = %handle.animator.preset(),
            "created tesseract"
        );
        Ok(handle)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Short id used to namespace SVG filter ids
    pub fn uid(&self) -> String {
        format!("t4d-{}", &self.id.simple().to_string()[..8])
    }

    pub fn hypercube(&self) -> &Hypercube {
        &self.cube
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// The zero-angle frame rendered at creation
    pub fn initial_frame(&self) -> &Frame {
        &self.initial
    }

    fn render_params(&self, params: FrameParams) -> Frame {
        let mut projection = self
            .projection
            .with_scale(self.projection.scale * params.pixel_scale_factor);
        if let Some(distance_4d) = params.distance_4d {
            projection = projection.with_distance_4d(distance_4d);
        }

        Frame {
            params,
            draw_list: render_frame(&self.cube, &params.angles, &projection, &self.style),
        }
    }

    /// Frame at monotonic time `now`
    pub fn frame_at(&mut self, now: Duration) -> Frame {
        if !self.animator.has_started() {
            return self.initial.clone();
        }
        let params = self.animator.sample(now);
        self.render_params(params)
    }

    /// Frame at the clock's current time
    pub fn tick(&mut self, clock: &dyn FrameClock) -> Frame {
        self.frame_at(clock.now())
    }

    /// Render fixed angles with the configured projection, ignoring playback
    pub fn render_static(&self, angles: &RotationAngles) -> Frame {
        self.render_params(FrameParams {
            angles: *angles,
            ..FrameParams::default()
        })
    }

    /// Serialise a frame with this handle's style and filter ids
    pub fn to_svg(&self, frame: &Frame) -> String {
        svg::to_document(frame, &self.style, &self.uid())
    }

    /// SVG document for the frame at `now`
    pub fn svg_at(&mut self, now: Duration) -> String {
        let frame = self.frame_at(now);
        self.to_svg(&frame)
    }

    pub fn is_playing(&self) -> bool {
        self.animator.is_playing()
    }

    pub fn play(&mut self) {
        self.animator.play();
    }

    pub fn pause(&mut self, now: Duration) {
        self.animator.pause(now);
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    pub fn restart(&mut self) {
        self.animator.restart();
    }

    /// Change the time multiplier from `now` on; `speed` must be positive
    /// and finite, as in the options
    pub fn set_speed(&mut self, speed: f64, now: Duration) -> Result<()> {
        positive("speed", speed)?;
        self.animator.set_speed(speed, now);
        Ok(())
    }

    pub fn set_preset(&mut self, preset: RotationPreset) {
        self.animator.set_preset(preset);
    }

    /// Stop the animation and release the handle
    pub fn dispose(mut self) {
        self.animator.stop();
        tracing::debug!(id = %self.id, "disposed tesseract");
    }
}
