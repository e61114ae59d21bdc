//! Error types for tesseract operations
//!
//! The geometry, rotation, projection and rendering functions are total:
//! degenerate input (a camera inside the hypercube's extent) shows up as
//! non-finite coordinates in the output, never as an error. Errors only
//! arise at the edges of the crate, when an options document is parsed or
//! validated, or when frames are written out.
//!
//! Each variant has a stable error code (e.g. `INVALID_COLOR`) that bindings
//! can switch on without matching on message text.
//!
//! # Example
//!
//! ```rust
//! use tesseract_core::error::TesseractError;
//! use tesseract_core::TesseractOptions;
//!
//! let err = TesseractOptions::from_json_str(r#"{"speed": -1}"#).unwrap_err();
//! assert_eq!(err.code(), "INVALID_OPTION");
//! assert!(matches!(err, TesseractError::InvalidOption { .. }));
//! ```

use thiserror::Error;

/// Result type alias for tesseract operations
pub type Result<T> = std::result::Result<T, TesseractError>;

/// Errors that can occur while configuring or exporting a tesseract
#[derive(Error, Debug)]
pub enum TesseractError {
    // ═══════════════════════════════════════════════════════════════════════
    // Options errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Colour token is not `#RGB` or `#RRGGBB`
    #[error("Invalid color '{value}': {reason}. Use '#RRGGBB' or '#RGB'.")]
    InvalidColor { value: String, reason: String },

    /// An option value is outside its accepted range
    #[error("Invalid option '{field}': {reason}")]
    InvalidOption { field: String, reason: String },

    /// Rotation preset name is not one of the built-in presets
    #[error("Unknown rotation preset: '{name}'. Expected classic, dual, complex or gentle.")]
    UnknownPreset { name: String },

    /// Animation variant name is not recognised
    #[error("Unknown animation variant: '{name}'. Expected rotation, continuous, breathe, explode or static.")]
    UnknownVariant { name: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure errors
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading options or writing frames failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TesseractError {
    /// Stable, machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            TesseractError::InvalidColor { .. } => "INVALID_COLOR",
            TesseractError::InvalidOption { .. } => "INVALID_OPTION",
            TesseractError::UnknownPreset { .. } => "UNKNOWN_PRESET",
            TesseractError::UnknownVariant { .. } => "UNKNOWN_VARIANT",
            TesseractError::Serialization(_) => "SERIALIZATION_ERROR",
            TesseractError::Io { .. } => "IO_ERROR",
        }
    }

    /// Whether the error was caused by caller-supplied input
    pub fn is_input_error(&self) -> bool {
        !matches!(self, TesseractError::Io { .. })
    }

    /// Convenience constructor for option validation failures
    pub fn invalid_option(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TesseractError::InvalidOption {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        TesseractError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
