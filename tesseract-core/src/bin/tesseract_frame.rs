//! Tesseract frame exporter
//!
//! Renders one frame, or a sequence of frames, of an animated tesseract
//! offline.
//!
//! Usage:
//!     tesseract-frame --time-ms 2500 > frame.svg
//!     tesseract-frame --config tesseract.json --variant explode --frames 60 --fps 30 --out frames/
//!     tesseract-frame --preset complex --format json --time-ms 1000

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tesseract_core::{
    Frame, FrameClock, ManualClock, Result, RotationPreset, Tesseract, TesseractError,
    TesseractOptions, Variant,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Json => "json",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tesseract-frame")]
#[command(about = "Render frames of an animated 4D hypercube")]
#[command(version)]
struct Args {
    /// Path to an options JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rotation preset (classic, dual, complex, gentle)
    #[arg(short, long)]
    preset: Option<RotationPreset>,

    /// Animation variant (rotation, continuous, breathe, explode, static)
    #[arg(long)]
    variant: Option<Variant>,

    /// Elapsed animation time of the first frame, in milliseconds
    #[arg(short, long, default_value_t = 0.0)]
    time_ms: f64,

    /// Number of frames to render
    #[arg(short = 'n', long, default_value_t = 1)]
    frames: usize,

    /// Frame rate of a sequence
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Directory for frame-NNNN files (default: stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "tesseract_core=debug"
    } else {
        "tesseract_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error [{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}

fn load_options(args: &Args) -> Result<TesseractOptions> {
    let mut options = match &args.config {
        Some(path) => TesseractOptions::from_file(path)?,
        None => TesseractOptions::default(),
    };
    if let Some(preset) = args.preset {
        options.rotation_preset = preset;
    }
    if let Some(variant) = args.variant {
        options.variant = variant;
    }
    options.validate()?;
    Ok(options)
}

/// First frame time and the step between frames
fn check_timing(time_ms: f64, fps: f64) -> Result<(Duration, Duration)> {
    let start = Duration::try_from_secs_f64(time_ms / 1000.0).map_err(|e| {
        TesseractError::invalid_option("time_ms", format!("{} ({})", e, time_ms))
    })?;
    if !fps.is_finite() || fps <= 0.0 {
        return Err(TesseractError::invalid_option(
            "fps",
            format!("must be positive, got {}", fps),
        ));
    }
    let step = Duration::try_from_secs_f64(1.0 / fps)
        .map_err(|e| TesseractError::invalid_option("fps", format!("{} ({})", e, fps)))?;
    Ok((start, step))
}

/// Timestamp of frame `index` in a sequence
fn frame_time(start: Duration, step: Duration, index: usize) -> Result<Duration> {
    u32::try_from(index)
        .ok()
        .and_then(|i| step.checked_mul(i))
        .and_then(|offset| start.checked_add(offset))
        .ok_or_else(|| {
            TesseractError::invalid_option(
                "frames",
                format!("frame {} is past the end of the timeline", index),
            )
        })
}

fn run(args: &Args) -> Result<()> {
    let (start, step) = check_timing(args.time_ms, args.fps)?;
    let options = load_options(args)?;
    let mut tesseract = Tesseract::create(options)?;
    tesseract.play();

    tracing::info!(
        id = %tesseract.id(),
        variant = %tesseract.animator().variant(),
        preset = %tesseract.animator().preset(),
        frames = args.frames,
        "rendering tesseract"
    );

    // Anchor the timeline at zero, then jump to each frame's timestamp
    let clock = ManualClock::new();
    tesseract.tick(&clock);

    if let Some(dir) = &args.out {
        std::fs::create_dir_all(dir).map_err(|e| TesseractError::io(dir, e))?;
    }

    for index in 0..args.frames {
        clock.set(frame_time(start, step, index)?);
        let frame = tesseract.tick(&clock);
        let body = encode(&tesseract, &frame, args.format)?;

        match &args.out {
            Some(dir) => write_frame(dir, index, args.format, &body)?,
            None => println!("{}", body),
        }
        tracing::debug!(index, now_ms = clock.now().as_millis() as u64, "frame written");
    }

    tesseract.dispose();
    Ok(())
}

fn encode(tesseract: &Tesseract, frame: &Frame, format: Format) -> Result<String> {
    match format {
        Format::Svg => Ok(tesseract.to_svg(frame)),
        Format::Json => Ok(serde_json::to_string_pretty(frame)?),
    }
}

fn write_frame(dir: &Path, index: usize, format: Format, body: &str) -> Result<()> {
    let path = dir.join(format!("frame-{:04}.{}", index, format.extension()));
    std::fs::write(&path, body).map_err(|e| TesseractError::io(&path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_accepts_sequence() {
        let (start, step) = check_timing(2500.0, 50.0).unwrap();
        assert_eq!(start, Duration::from_millis(2500));
        assert_eq!(step, Duration::from_millis(20));
        assert_eq!(frame_time(start, step, 3).unwrap(), Duration::from_millis(2560));
    }

    #[test]
    fn test_timing_rejects_unrepresentable_values() {
        for time_ms in [-1.0, f64::NAN, f64::INFINITY, 1e300] {
            let err = check_timing(time_ms, 60.0).unwrap_err();
            assert_eq!(err.code(), "INVALID_OPTION");
        }
        for fps in [0.0, -30.0, f64::NAN, 1e-300] {
            let err = check_timing(0.0, fps).unwrap_err();
            assert_eq!(err.code(), "INVALID_OPTION");
        }
    }

    #[test]
    fn test_frame_time_overflow_is_an_error() {
        let step = Duration::from_secs(1);
        assert!(frame_time(Duration::ZERO, step, u32::MAX as usize + 1).is_err());
        assert!(frame_time(Duration::MAX, step, 1).is_err());
        assert_eq!(frame_time(Duration::MAX, step, 0).unwrap(), Duration::MAX);
    }
}
