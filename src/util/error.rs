use crate::core::constants::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error type for digipin-rs operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DigiPinError {
    /// A coordinate is not finite or lies outside the bounding region.
    #[error("{0}")]
    OutOfRange(RangeViolation),
    /// The code does not have exactly 10 symbols once separators are removed.
    /// Carries the symbol count, which stops at 11 for longer input.
    #[error("DigiPin must be 10 characters long (excluding hyphens)")]
    InvalidLength(usize),
    /// The code contains a character outside the symbol alphabet.
    #[error("Invalid character in DigiPin: {0}")]
    InvalidSymbol(char),
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}

/// Coarse classification of a [`DigiPinError`], for callers that map failures
/// onto their own transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    OutOfRange,
    Format,
    InvalidSymbol,
    Io,
    Csv,
    GeometryParse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::Format => "Format",
            ErrorKind::InvalidSymbol => "InvalidSymbol",
            ErrorKind::Io => "Io",
            ErrorKind::Csv => "Csv",
            ErrorKind::GeometryParse => "GeometryParse",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(kind, message)` pair handed to a boundary layer.
///
/// Serializes as `{"kind": "...", "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub error: String,
}

impl DigiPinError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DigiPinError::OutOfRange(_) => ErrorKind::OutOfRange,
            DigiPinError::InvalidLength(_) => ErrorKind::Format,
            DigiPinError::InvalidSymbol(_) => ErrorKind::InvalidSymbol,
            DigiPinError::IoError(_) => ErrorKind::Io,
            DigiPinError::CsvError(_) => ErrorKind::Csv,
            DigiPinError::GeometryParseError(_) => ErrorKind::GeometryParse,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            kind: self.kind(),
            error: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Inclusive `(min, max)` range of the bounding region on this axis.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Axis::Latitude => (MIN_LAT, MAX_LAT),
            Axis::Longitude => (MIN_LON, MAX_LON),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("Latitude"),
            Axis::Longitude => f.write_str("Longitude"),
        }
    }
}

/// Which constraint a rejected coordinate broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolatedBound {
    /// NaN or infinite.
    NotFinite,
    BelowMin,
    AboveMax,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub axis: Axis,
    pub bound: ViolatedBound,
    pub value: f64,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.axis.range();
        match self.bound {
            ViolatedBound::NotFinite => {
                write!(f, "{} must be a valid number", self.axis)
            }
            ViolatedBound::BelowMin => write!(
                f,
                "{} must be between {} and {}: {} is below the minimum {}",
                self.axis, min, max, self.value, min
            ),
            ViolatedBound::AboveMax => write!(
                f,
                "{} must be between {} and {}: {} is above the maximum {}",
                self.axis, min, max, self.value, max
            ),
        }
    }
}
