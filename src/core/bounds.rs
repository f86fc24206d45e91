use crate::core::constants::{GRID_SIZE, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::util::error::{Axis, DigiPinError, RangeViolation, ViolatedBound};
use geo_types::{Point, Rect, coord};

/// Working rectangle narrowed once per level during a single encode or decode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsWindow {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundsWindow {
    /// The fixed outer region every code lives in.
    pub const REGION: BoundsWindow = BoundsWindow {
        min_lat: MIN_LAT,
        max_lat: MAX_LAT,
        min_lon: MIN_LON,
        max_lon: MAX_LON,
    };

    pub fn lat_div(&self) -> f64 {
        (self.max_lat - self.min_lat) / GRID_SIZE as f64
    }

    pub fn lon_div(&self) -> f64 {
        (self.max_lon - self.min_lon) / GRID_SIZE as f64
    }

    /// Midpoint of the window as a lon/lat point.
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// The window as a `Rect` with x = longitude and y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}

/// Checks that `lat` and `lon` are finite and inside the bounding region.
///
/// Bounds are inclusive. Latitude is checked before longitude.
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), DigiPinError> {
    check_axis(Axis::Latitude, lat)?;
    check_axis(Axis::Longitude, lon)
}

fn check_axis(axis: Axis, value: f64) -> Result<(), DigiPinError> {
    let (min, max) = axis.range();
    let bound = if !value.is_finite() {
        ViolatedBound::NotFinite
    } else if value < min {
        ViolatedBound::BelowMin
    } else if value > max {
        ViolatedBound::AboveMax
    } else {
        return Ok(());
    };

    Err(DigiPinError::OutOfRange(RangeViolation { axis, bound, value }))
}
