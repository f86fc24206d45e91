use crate::core::bounds::{BoundsWindow, validate_coordinates};
use crate::core::constants::{CODE_LENGTH, LEVELS, SEPARATOR, SEPARATOR_LEVELS};
use crate::core::grid::{narrow_for_decode, narrow_for_encode, point_to_row_col};
use crate::core::symbols::symbol_at;
use crate::util::code::code_to_positions;
use crate::util::error::DigiPinError;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Options controlling how a code is rendered.
///
/// Deserializes from `{"includeHyphens": bool}`; a missing field means `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodeOptions {
    pub include_hyphens: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            include_hyphens: true,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_hyphens(mut self, include: bool) -> Self {
        self.include_hyphens = include;
        self
    }
}

/// Centroid of a decoded cell, each axis formatted to 6 decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCoordinate {
    pub latitude: String,
    pub longitude: String,
}

/// Encodes a coordinate as a hyphenated code (`XXX-XXX-XXXX`).
///
/// # Example
/// ```
/// use digipin_rs::encode;
///
/// # fn main() -> Result<(), digipin_rs::DigiPinError> {
/// assert_eq!(encode(20.5, 81.5)?, "2LL-LLL-LLLL");
/// # Ok(())
/// # }
/// ```
pub fn encode(lat: f64, lon: f64) -> Result<String, DigiPinError> {
    encode_with_options(lat, lon, EncodeOptions::default())
}

/// Encodes a coordinate, rendering separators only if `options.include_hyphens`.
///
/// Fails with `OutOfRange` if either value is not finite or lies outside
/// `[2.5, 38.5] x [63.5, 99.5]`.
pub fn encode_with_options(
    lat: f64,
    lon: f64,
    options: EncodeOptions,
) -> Result<String, DigiPinError> {
    validate_coordinates(lat, lon)?;

    let mut window = BoundsWindow::REGION;
    let mut code = String::with_capacity(CODE_LENGTH + SEPARATOR_LEVELS.len());

    for level in 1..=LEVELS {
        let (row, col) = point_to_row_col(lat, lon, &window);
        code.push(symbol_at(row, col));

        if options.include_hyphens && SEPARATOR_LEVELS.contains(&level) {
            code.push(SEPARATOR);
        }

        window = narrow_for_encode(&window, row, col);
    }

    Ok(code)
}

/// Returns the final-level bounds window a code identifies.
pub(crate) fn decode_window(code: &str) -> Result<BoundsWindow, DigiPinError> {
    let positions = code_to_positions(code)?;

    let window = positions
        .iter()
        .fold(BoundsWindow::REGION, |window, &(row, col)| {
            narrow_for_decode(&window, row, col)
        });

    Ok(window)
}

/// Decodes a code, with or without separators, into the centroid of its cell.
pub fn decode_to_point(code: &str) -> Result<Point<f64>, DigiPinError> {
    Ok(decode_window(code)?.center())
}

/// Decodes a code into its cell centroid formatted to 6 decimal places.
///
/// Fails with `InvalidLength` unless the code has exactly 10 symbols once
/// separators are removed, and with `InvalidSymbol` for the first character
/// outside the alphabet.
pub fn decode(code: &str) -> Result<DecodedCoordinate, DigiPinError> {
    let center = decode_to_point(code)?;

    Ok(DecodedCoordinate {
        latitude: format!("{:.6}", center.y()),
        longitude: format!("{:.6}", center.x()),
    })
}

/// Returns true if `code` has 10 symbols from the alphabet once separators
/// are removed. Never fails.
pub fn is_valid_code(code: &str) -> bool {
    code_to_positions(code).is_ok()
}

/// Like [`is_valid_code`], for untyped input. Anything but a JSON string is invalid.
pub fn is_valid_value(value: &serde_json::Value) -> bool {
    value.as_str().is_some_and(is_valid_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{CELL_SIZE, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
    use crate::util::error::{Axis, ErrorKind, RangeViolation, ViolatedBound};
    use serde_json::json;

    #[test]
    fn test_encode_region_center() -> Result<(), DigiPinError> {
        assert_eq!(encode(20.5, 81.5)?, "2LL-LLL-LLLL");
        let options = EncodeOptions::new().include_hyphens(false);
        assert_eq!(encode_with_options(20.5, 81.5, options)?, "2LLLLLLLLL");
        Ok(())
    }

    #[test]
    fn test_encode_corners() -> Result<(), DigiPinError> {
        assert_eq!(encode(MAX_LAT, MAX_LON)?, "888-888-8888");
        assert_eq!(encode(MIN_LAT, MIN_LON)?, "LLL-LLL-LLLL");
        assert_eq!(encode(MAX_LAT, MIN_LON)?, "FFF-FFF-FFFF");
        assert_eq!(encode(MIN_LAT, MAX_LON)?, "TTT-TTT-TTTT");
        Ok(())
    }

    #[test]
    fn test_encode_is_deterministic() -> Result<(), DigiPinError> {
        let a = encode(28.622788, 77.213033)?;
        let b = encode(28.622788, 77.213033)?;
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_eq!(a.chars().nth(3), Some('-'));
        assert_eq!(a.chars().nth(7), Some('-'));
        Ok(())
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        match encode(0.0, 80.0) {
            Err(DigiPinError::OutOfRange(RangeViolation { axis, bound, .. })) => {
                assert_eq!(axis, Axis::Latitude);
                assert_eq!(bound, ViolatedBound::BelowMin);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }

        match encode(20.0, 150.0) {
            Err(DigiPinError::OutOfRange(RangeViolation { axis, bound, .. })) => {
                assert_eq!(axis, Axis::Longitude);
                assert_eq!(bound, ViolatedBound::AboveMax);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }

        let err = encode(f64::NAN, 80.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(err.to_string(), "Latitude must be a valid number");
    }

    #[test]
    fn test_error_messages() {
        let err = decode("39J-49L").unwrap_err();
        assert_eq!(
            err.to_string(),
            "DigiPin must be 10 characters long (excluding hyphens)"
        );

        let err = encode(20.0, f64::INFINITY).unwrap_err();
        assert_eq!(err.to_string(), "Longitude must be a valid number");
    }

    #[test]
    fn test_decode_known_cells() -> Result<(), DigiPinError> {
        let decoded = decode("2LL-LLL-LLLL")?;
        assert_eq!(decoded.latitude, "20.500017");
        assert_eq!(decoded.longitude, "81.500017");

        let decoded = decode("888-888-8888")?;
        assert_eq!(decoded.latitude, "38.499983");
        assert_eq!(decoded.longitude, "99.499983");
        Ok(())
    }

    #[test]
    fn test_decode_ignores_separators() -> Result<(), DigiPinError> {
        let with = decode("39J-49L-L8T4")?;
        let without = decode("39J49LL8T4")?;
        assert_eq!(with, without);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_bad_codes() {
        assert_eq!(
            decode("AAA-AAA-AAAA"),
            Err(DigiPinError::InvalidSymbol('A'))
        );
        assert_eq!(decode("39J-49L"), Err(DigiPinError::InvalidLength(6)));
        assert_eq!(
            decode("39j-49l-l8t4"),
            Err(DigiPinError::InvalidSymbol('j'))
        );
    }

    #[test]
    fn test_round_trip_within_half_cell() -> Result<(), DigiPinError> {
        let points = [
            (20.5, 81.5),
            (28.622788, 77.213033),
            (12.9716, 77.5946),
            (19.076, 72.8777),
            (MIN_LAT, MIN_LON),
            (MAX_LAT, MAX_LON),
        ];

        for (lat, lon) in points {
            let center = decode_to_point(&encode(lat, lon)?)?;
            assert!((center.y() - lat).abs() <= CELL_SIZE / 2.0 + 1e-12, "lat {lat}");
            assert!((center.x() - lon).abs() <= CELL_SIZE / 2.0 + 1e-12, "lon {lon}");
        }
        Ok(())
    }

    #[test]
    fn test_decode_then_encode_returns_code() -> Result<(), DigiPinError> {
        for code in ["39J-49L-L8T4", "FC9-8JL-MPTT", "2LL-LLL-LLLL", "888-888-8888"] {
            let decoded = decode(code)?;
            let lat: f64 = decoded.latitude.parse().unwrap();
            let lon: f64 = decoded.longitude.parse().unwrap();
            assert_eq!(encode(lat, lon)?, code);
        }
        Ok(())
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("39J-49L-L8T4"));
        assert!(is_valid_code("39J49LL8T4"));
        assert!(!is_valid_code("AAA-AAA-AAAA"));
        assert!(!is_valid_code("39J-49L-L8T"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn test_is_valid_value_rejects_non_strings() {
        assert!(is_valid_value(&json!("39J-49L-L8T4")));
        assert!(!is_valid_value(&json!(3949)));
        assert!(!is_valid_value(&json!(null)));
        assert!(!is_valid_value(&json!(["39J-49L-L8T4"])));
    }

    #[test]
    fn test_encode_options_deserialize() {
        let opts: EncodeOptions = serde_json::from_value(json!({})).unwrap();
        assert!(opts.include_hyphens);
        let opts: EncodeOptions =
            serde_json::from_value(json!({ "includeHyphens": false })).unwrap();
        assert!(!opts.include_hyphens);
    }
}
