//! Error types with rich diagnostics using miette
//!
//! Every failure here is a caller bug (bad color literal, unknown alignment
//! keyword, nonsensical page geometry). Rendering stops at the first one.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Color Errors
// ============================================================================

/// Errors produced while parsing a hex color string
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color {input:?} does not start with #")]
    #[diagnostic(
        code(mathdiagrams::color::invalid_format),
        help("colors are written as #rgb, #rgba, #rrggbb or #rrggbbaa")
    )]
    InvalidFormat { input: String },

    #[error("color {input:?} has {len} hex digits")]
    #[diagnostic(
        code(mathdiagrams::color::invalid_length),
        help("expected 3, 4, 6 or 8 hex digits after the #")
    )]
    InvalidLength { input: String, len: usize },

    #[error("color {input:?} has non-hex chars")]
    #[diagnostic(code(mathdiagrams::color::invalid_digits))]
    InvalidDigits { input: String },

    #[error("a color needs 3 or 4 channels, got {count}")]
    #[diagnostic(code(mathdiagrams::color::invalid_channel_count))]
    InvalidChannelCount { count: usize },
}

// ============================================================================
// Diagram Errors
// ============================================================================

/// Errors that abort rendering a diagram
#[derive(Error, Diagnostic, Debug)]
pub enum DiagramError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Color(#[from] ColorError),

    #[error("unknown alignment: {keyword:?}")]
    #[diagnostic(
        code(mathdiagrams::text::invalid_alignment),
        help("horizontal: left, middle, center, right; vertical: bottom, middle, center, top")
    )]
    InvalidAlignment { keyword: String },

    #[error("invalid scale {value}: {reason}")]
    #[diagnostic(
        code(mathdiagrams::transform::invalid_scale),
        help("the scale is the number of pixels per mathematical unit and must be positive")
    )]
    InvalidScale { value: f64, reason: NumericError },

    #[error("invalid config value for `{field}`: {reason}")]
    #[diagnostic(code(mathdiagrams::config::invalid))]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse canvas config")]
    #[diagnostic(
        code(mathdiagrams::config::parse),
        help("unknown keys are rejected; check the field names")
    )]
    ConfigParse(#[source] serde_json::Error),

    #[error("failed to write diagram")]
    #[diagnostic(code(mathdiagrams::io))]
    Io(#[from] std::io::Error),
}

impl DiagramError {
    pub(crate) fn invalid_scale(value: f64, reason: NumericError) -> Self {
        DiagramError::InvalidScale { value, reason }
    }

    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        DiagramError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
