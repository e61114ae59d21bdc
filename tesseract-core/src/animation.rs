//! Animation driver.
//!
//! Maps elapsed time to per-frame parameters: the six rotation angles plus
//! a few projection overrides. The geometry pipeline never sees time; the
//! driver is the only stateful piece and its state lives in [`Animator`],
//! owned by whoever owns the tesseract handle.
//!
//! ## Variants
//!
//! | Variant | Behaviour |
//! |---------|-----------|
//! | `rotation` | Linear 2π cycle every 10 s, looping |
//! | `continuous` | Angles grow with elapsed seconds, never wrap |
//! | `breathe` | Eased scale 0.8 ↔ 1.2 and half-turn, alternating every 3 s |
//! | `explode` | 2 s entrance from far in 4D, then a gentle rotation cycle |
//! | `static` | Zero angles |

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TesseractError};
use crate::rotation::{RotationAngles, RotationPlane};

/// Period of one `rotation` cycle at speed 1
pub const ROTATION_PERIOD: Duration = Duration::from_secs(10);
/// One direction of the `breathe` timeline
pub const BREATHE_HALF_PERIOD: Duration = Duration::from_secs(3);
/// Pixel-scale range of `breathe`
pub const BREATHE_MIN_SCALE: f64 = 0.8;
pub const BREATHE_MAX_SCALE: f64 = 1.2;
/// Length of the `explode` entrance
pub const EXPLODE_DURATION: Duration = Duration::from_secs(2);
/// Pixel-scale keyframes of `explode`, each held for a third of the entrance
pub const EXPLODE_SCALE_KEYFRAMES: [f64; 3] = [0.01, 1.1, 1.0];
/// 4D camera distance at the start and end of `explode`
pub const EXPLODE_DISTANCE_4D: (f64, f64) = (5.0, 2.5);

/// Per-plane angular rates of the built-in rotation styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPreset {
    /// Pure XW turn, the recognisable inside-out tesseract
    #[default]
    Classic,
    /// XW and YW together
    Dual,
    /// Every plane at once
    Complex,
    /// Slow mix for ambient use
    Gentle,
}

impl RotationPreset {
    pub const ALL: [RotationPreset; 4] = [
        RotationPreset::Classic,
        RotationPreset::Dual,
        RotationPreset::Complex,
        RotationPreset::Gentle,
    ];

    /// Rates in radians per unit of driver progress
    pub fn rates(self) -> RotationAngles {
        let zero = RotationAngles::zero();
        match self {
            RotationPreset::Classic => zero.with(RotationPlane::XW, 1.0),
            RotationPreset::Dual => zero
                .with(RotationPlane::XW, 0.7)
                .with(RotationPlane::YW, 0.5),
            RotationPreset::Complex => RotationAngles {
                xy: 0.2,
                xz: 0.1,
                xw: 0.5,
                yz: 0.15,
                yw: 0.3,
                zw: 0.7,
            },
            RotationPreset::Gentle => zero
                .with(RotationPlane::XW, 0.3)
                .with(RotationPlane::YW, 0.2)
                .with(RotationPlane::XY, 0.1)
                .with(RotationPlane::YZ, 0.1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RotationPreset::Classic => "classic",
            RotationPreset::Dual => "dual",
            RotationPreset::Complex => "complex",
            RotationPreset::Gentle => "gentle",
        }
    }
}

impl fmt::Display for RotationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotationPreset {
    type Err = TesseractError;

    fn from_str(s: &str) -> Result<Self> {
        RotationPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TesseractError::UnknownPreset { name: s.to_string() })
    }
}

/// Animation style of a tesseract handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Rotation,
    Continuous,
    Breathe,
    Explode,
    Static,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Rotation,
        Variant::Continuous,
        Variant::Breathe,
        Variant::Explode,
        Variant::Static,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Rotation => "rotation",
            Variant::Continuous => "continuous",
            Variant::Breathe => "breathe",
            Variant::Explode => "explode",
            Variant::Static => "static",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = TesseractError;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TesseractError::UnknownVariant { name: s.to_string() })
    }
}

/// Timing curves, `t ∈ [0, 1] → [0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInOutSine,
    EaseOutExpo,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// What the driver hands the pipeline for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    pub angles: RotationAngles,
    /// Multiplier on the configured pixel scale
    pub pixel_scale_factor: f64,
    /// Replaces the configured 4D camera distance when set
    pub distance_4d: Option<f64>,
    /// Whole-frame opacity
    pub opacity: f64,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            angles: RotationAngles::zero(),
            pixel_scale_factor: 1.0,
            distance_4d: None,
            opacity: 1.0,
        }
    }
}

impl FrameParams {
    fn with_angles(angles: RotationAngles) -> Self {
        Self {
            angles,
            ..Self::default()
        }
    }
}

/// Looping linear cycle: progress `2π · (t mod period) / period`
pub fn rotation_cycle(elapsed: Duration, rates: &RotationAngles) -> FrameParams {
    let period = ROTATION_PERIOD.as_secs_f64();
    let phase = elapsed.as_secs_f64().rem_euclid(period) / period;
    FrameParams::with_angles(rates.scaled(2.0 * PI * phase))
}

/// Unbounded rotation: angle = seconds × rate
pub fn continuous(elapsed: Duration, rates: &RotationAngles) -> FrameParams {
    FrameParams::with_angles(rates.scaled(elapsed.as_secs_f64()))
}

/// Alternating eased swell with a half-turn
pub fn breathe(elapsed: Duration, rates: &RotationAngles) -> FrameParams {
    let half = BREATHE_HALF_PERIOD.as_secs_f64();
    let t = elapsed.as_secs_f64();
    let cycle = (t / half).floor();
    let mut phase = (t - cycle * half) / half;
    if cycle as u64 % 2 == 1 {
        phase = 1.0 - phase;
    }

    let eased = Easing::EaseInOutSine.apply(phase);
    FrameParams {
        angles: rates.scaled(PI * eased),
        pixel_scale_factor: lerp(BREATHE_MIN_SCALE, BREATHE_MAX_SCALE, eased),
        ..FrameParams::default()
    }
}

/// Entrance animation; `None` once the entrance has finished
pub fn explode(elapsed: Duration) -> Option<FrameParams> {
    if elapsed >= EXPLODE_DURATION {
        return None;
    }

    let t = elapsed.as_secs_f64() / EXPLODE_DURATION.as_secs_f64();
    let eased = Easing::EaseOutExpo.apply(t);

    // Three equal keyframe segments, each eased on its own: hold, overshoot, settle
    let [k0, k1, k2] = EXPLODE_SCALE_KEYFRAMES;
    let segment = (t * 3.0).floor().min(2.0);
    let local = Easing::EaseOutExpo.apply(t * 3.0 - segment);
    let scale = match segment as u8 {
        0 => k0,
        1 => lerp(k0, k1, local),
        _ => lerp(k1, k2, local),
    };

    let r = lerp(-PI, 0.0, eased);
    let angles = RotationAngles::zero()
        .with(RotationPlane::XW, r)
        .with(RotationPlane::YW, r * 0.5)
        .with(RotationPlane::XY, r * 0.3);

    Some(FrameParams {
        angles,
        pixel_scale_factor: scale,
        distance_4d: Some(lerp(EXPLODE_DISTANCE_4D.0, EXPLODE_DISTANCE_4D.1, eased)),
        opacity: eased,
    })
}

/// Playback state of one animated tesseract.
///
/// Time comes from the caller as a monotonic timestamp. The first sample
/// after `play` anchors the timeline, like a frame callback's first tick.
/// Elapsed driver time is kept pre-multiplied by `speed`, so changing speed
/// never makes the animation jump. Driver time is tracked in `f64` seconds
/// and saturates when converted back, so no speed value can make sampling
/// panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    variant: Variant,
    preset: RotationPreset,
    speed: f64,
    playing: bool,
    started_at: Option<Duration>,
    /// Driver seconds banked before the current anchor
    accumulated: f64,
}

/// Driver seconds as a `Duration`: negative and NaN clamp to zero, overflow
/// saturates
fn driver_time(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}

impl Animator {
    /// New animator, paused at time zero
    pub fn new(variant: Variant, preset: RotationPreset, speed: f64) -> Self {
        Self {
            variant,
            preset,
            speed,
            playing: false,
            started_at: None,
            accumulated: 0.0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn preset(&self) -> RotationPreset {
        self.preset
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the timeline has moved off zero or is running
    pub fn has_started(&self) -> bool {
        self.playing || self.accumulated != 0.0
    }

    fn elapsed_secs(&mut self, now: Duration) -> f64 {
        if !self.playing {
            return self.accumulated;
        }
        let start = *self.started_at.get_or_insert(now);
        self.accumulated + now.saturating_sub(start).as_secs_f64() * self.speed
    }

    /// Driver time at `now`, anchoring the timeline if needed
    pub fn elapsed(&mut self, now: Duration) -> Duration {
        driver_time(self.elapsed_secs(now))
    }

    /// Resume; the next sample re-anchors the timeline
    pub fn play(&mut self) {
        if !self.playing {
            tracing::debug!(variant = %self.variant, "animation playing");
            self.playing = true;
            self.started_at = None;
        }
    }

    /// Freeze driver time at `now`
    pub fn pause(&mut self, now: Duration) {
        if self.playing {
            self.accumulated = self.elapsed_secs(now);
            self.playing = false;
            self.started_at = None;
            tracing::debug!(elapsed_secs = self.accumulated, "animation paused");
        }
    }

    /// Pause and rewind to zero
    pub fn stop(&mut self) {
        self.playing = false;
        self.started_at = None;
        self.accumulated = 0.0;
        tracing::debug!("animation stopped");
    }

    /// Rewind to zero and play
    pub fn restart(&mut self) {
        self.stop();
        self.play();
    }

    /// Change the time multiplier from `now` on. Callers validate `speed`;
    /// a negative or NaN speed freezes the animation at zero.
    pub fn set_speed(&mut self, speed: f64, now: Duration) {
        if self.playing {
            self.accumulated = self.elapsed_secs(now);
            self.started_at = Some(now);
        }
        self.speed = speed;
    }

    /// Swap rotation rates without touching the timeline
    pub fn set_preset(&mut self, preset: RotationPreset) {
        self.preset = preset;
    }

    /// Frame parameters at `now`
    pub fn sample(&mut self, now: Duration) -> FrameParams {
        let elapsed = self.elapsed(now);
        let rates = self.preset.rates();

        match self.variant {
            Variant::Rotation => rotation_cycle(elapsed, &rates),
            Variant::Continuous => continuous(elapsed, &rates),
            Variant::Breathe => breathe(elapsed, &rates),
            Variant::Explode => explode(elapsed).unwrap_or_else(|| {
                rotation_cycle(elapsed - EXPLODE_DURATION, &RotationPreset::Gentle.rates())
            }),
            Variant::Static => FrameParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("gentle".parse::<RotationPreset>().unwrap(), RotationPreset::Gentle);
        assert_eq!(" Dual ".parse::<RotationPreset>().unwrap(), RotationPreset::Dual);
        let err = "spin".parse::<RotationPreset>().unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_PRESET");
        assert_eq!("static".parse::<Variant>().unwrap(), Variant::Static);
        assert!("wobble".parse::<Variant>().is_err());
    }

    #[test]
    fn test_preset_rates() {
        let classic = RotationPreset::Classic.rates();
        assert_eq!(classic.xw, 1.0);
        assert_eq!(classic.yw + classic.zw + classic.xy + classic.xz + classic.yz, 0.0);
        assert_eq!(RotationPreset::Complex.rates().zw, 0.7);
        assert_eq!(RotationPreset::Gentle.rates().yz, 0.1);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOutSine, Easing::EaseOutExpo] {
            assert_relative_eq!(easing.apply(0.0), 0.0, epsilon = 1e-12);
            assert_relative_eq!(easing.apply(1.0), 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(Easing::EaseInOutSine.apply(0.5), 0.5, epsilon = 1e-12);
        assert!(Easing::EaseOutExpo.apply(0.3) > 0.8);
    }

    #[test]
    fn test_rotation_cycle_wraps() {
        let rates = RotationPreset::Classic.rates();
        let quarter = rotation_cycle(ms(2_500), &rates);
        assert_relative_eq!(quarter.angles.xw, PI / 2.0, epsilon = 1e-12);

        let wrapped = rotation_cycle(ms(12_500), &rates);
        assert_relative_eq!(wrapped.angles.xw, PI / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_continuous_does_not_wrap() {
        let p = continuous(ms(12_000), &RotationPreset::Dual.rates());
        assert_relative_eq!(p.angles.xw, 12.0 * 0.7, epsilon = 1e-12);
        assert_relative_eq!(p.angles.yw, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_breathe_alternates() {
        let rates = RotationPreset::Gentle.rates();
        let start = breathe(Duration::ZERO, &rates);
        assert_relative_eq!(start.pixel_scale_factor, BREATHE_MIN_SCALE);

        let peak = breathe(ms(3_000), &rates);
        assert_relative_eq!(peak.pixel_scale_factor, BREATHE_MAX_SCALE, epsilon = 1e-12);
        assert_relative_eq!(peak.angles.xw, PI * 0.3, epsilon = 1e-12);

        let back = breathe(ms(6_000), &rates);
        assert_relative_eq!(back.pixel_scale_factor, BREATHE_MIN_SCALE, epsilon = 1e-12);

        // Symmetric around the peak
        let before = breathe(ms(2_000), &rates);
        let after = breathe(ms(4_000), &rates);
        assert_relative_eq!(before.pixel_scale_factor, after.pixel_scale_factor, epsilon = 1e-12);
    }

    #[test]
    fn test_explode_entrance() {
        let first = explode(Duration::ZERO).unwrap();
        assert_eq!(first.opacity, 0.0);
        assert_eq!(first.pixel_scale_factor, 0.01);
        assert_eq!(first.distance_4d, Some(5.0));
        assert_relative_eq!(first.angles.xw, -PI);
        assert_relative_eq!(first.angles.yw, -PI * 0.5);

        // Overshoot segment peaks near 1.1 just before two thirds
        let mid = explode(ms(1_300)).unwrap();
        assert!(mid.pixel_scale_factor > 1.0 && mid.pixel_scale_factor <= 1.1);

        let late = explode(ms(1_999)).unwrap();
        assert!((late.pixel_scale_factor - 1.0).abs() < 0.01);
        assert!(late.opacity > 0.99);

        assert!(explode(EXPLODE_DURATION).is_none());
    }

    #[test]
    fn test_animator_anchors_on_first_sample() {
        let mut a = Animator::new(Variant::Rotation, RotationPreset::Classic, 1.0);
        assert_eq!(a.sample(ms(5_000)).angles.xw, 0.0);

        a.play();
        assert_eq!(a.sample(ms(5_000)).angles.xw, 0.0);
        assert_relative_eq!(a.sample(ms(7_500)).angles.xw, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_animator_pause_freezes_time() {
        let mut a = Animator::new(Variant::Continuous, RotationPreset::Classic, 1.0);
        a.play();
        a.sample(ms(1_000));
        a.pause(ms(2_000));
        assert!(!a.is_playing());
        assert_relative_eq!(a.sample(ms(9_000)).angles.xw, 1.0, epsilon = 1e-12);

        a.play();
        a.sample(ms(10_000));
        assert_relative_eq!(a.sample(ms(10_500)).angles.xw, 1.5, epsilon = 1e-12);

        a.stop();
        assert!(!a.has_started());
        assert_eq!(a.sample(ms(11_000)).angles.xw, 0.0);
    }

    #[test]
    fn test_animator_speed_change_is_continuous() {
        let mut a = Animator::new(Variant::Continuous, RotationPreset::Classic, 1.0);
        a.play();
        a.sample(Duration::ZERO);
        a.set_speed(2.0, ms(1_000));
        assert_relative_eq!(a.sample(ms(1_000)).angles.xw, 1.0, epsilon = 1e-12);
        assert_relative_eq!(a.sample(ms(1_500)).angles.xw, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extreme_speeds_saturate() {
        let mut fast = Animator::new(Variant::Continuous, RotationPreset::Classic, 1e300);
        fast.play();
        fast.sample(Duration::ZERO);
        assert_eq!(fast.elapsed(ms(1_000)), Duration::MAX);
        assert!(fast.sample(ms(1_000)).angles.xw.is_finite());

        let mut backwards = Animator::new(Variant::Rotation, RotationPreset::Classic, 1.0);
        backwards.play();
        backwards.sample(Duration::ZERO);
        backwards.set_speed(-1.0, ms(100));
        assert_eq!(backwards.elapsed(ms(10_000)), Duration::ZERO);
        backwards.set_speed(f64::NAN, ms(10_000));
        assert_eq!(backwards.sample(ms(20_000)).angles.xw, 0.0);
    }

    #[test]
    fn test_explode_hands_over_to_gentle_rotation() {
        let mut a = Animator::new(Variant::Explode, RotationPreset::Complex, 1.0);
        a.play();
        a.sample(Duration::ZERO);
        let p = a.sample(EXPLODE_DURATION + ms(2_500));
        assert_eq!(p.opacity, 1.0);
        assert_eq!(p.distance_4d, None);
        assert_relative_eq!(p.angles.xw, 0.3 * PI / 2.0, epsilon = 1e-9);
        assert_eq!(p.angles.zw, 0.0);
    }

    #[test]
    fn test_static_variant() {
        let mut a = Animator::new(Variant::Static, RotationPreset::Complex, 3.0);
        a.play();
        a.sample(Duration::ZERO);
        assert_eq!(a.sample(ms(4_000)), FrameParams::default());
    }
}
