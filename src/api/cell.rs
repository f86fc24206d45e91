use crate::api::codec::{EncodeOptions, decode_window, encode_with_options};
use crate::core::bounds::BoundsWindow;
use crate::core::geometry::create_cell_polygon;
use crate::util::code::format_code;
use crate::util::coord::Coordinate;
use crate::util::error::DigiPinError;
use geo_types::{Point, Polygon, Rect};
use geojson::{Feature, JsonObject};
use serde_json::Value;

/// A single level-10 cell of the DIGIPIN grid.
///
/// # Example
///
/// ```
/// use digipin_rs::DigiPinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigiPinError> {
/// let cell = DigiPinCell::from_lat_lon(28.622788, 77.213033)?;
/// println!("DigiPin: {}", cell.code);
/// println!("Center: ({}, {})", cell.latitude(), cell.longitude());
///
/// let restored = DigiPinCell::from_code(&cell.code)?;
/// assert_eq!(cell.code, restored.code);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DigiPinCell {
    /// Code rendered according to the options the cell was built with
    pub code: String,
    /// Cell centroid, x = longitude, y = latitude
    pub center: Point<f64>,
    /// Cell extent, x = longitude, y = latitude
    pub bounds: Rect<f64>,
}

impl DigiPinCell {
    fn from_window(code: String, window: &BoundsWindow) -> Self {
        Self {
            code,
            center: window.center(),
            bounds: window.to_rect(),
        }
    }

    /// Create the cell containing a WGS84 (lon/lat) coordinate.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{DigiPinCell, EncodeOptions};
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigiPinError> {
    /// // From tuple
    /// let cell = DigiPinCell::from_wgs84(&(77.213033, 28.622788), EncodeOptions::default())?;
    /// // From Point
    /// let point = Point::new(77.213033, 28.622788);
    /// let cell = DigiPinCell::from_wgs84(&point, EncodeOptions::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(
        coord: &impl Coordinate,
        options: EncodeOptions,
    ) -> Result<Self, DigiPinError> {
        let code = encode_with_options(coord.y(), coord.x(), options)?;
        let window = decode_window(&code)?;
        Ok(Self::from_window(code, &window))
    }

    /// Create the cell containing `(lat, lon)`, with a hyphenated code.
    pub fn from_lat_lon(lat: f64, lon: f64) -> Result<Self, DigiPinError> {
        Self::from_wgs84(&(lon, lat), EncodeOptions::default())
    }

    /// Create a cell from an existing code. The stored code is normalised to
    /// the hyphenated form.
    pub fn from_code(code: &str) -> Result<Self, DigiPinError> {
        let window = decode_window(code)?;
        Ok(Self::from_window(format_code(code)?, &window))
    }

    /// Latitude of the cell centroid in degrees.
    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    /// Longitude of the cell centroid in degrees.
    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    fn window(&self) -> BoundsWindow {
        BoundsWindow {
            min_lat: self.bounds.min().y,
            max_lat: self.bounds.max().y,
            min_lon: self.bounds.min().x,
            max_lon: self.bounds.max().x,
        }
    }

    /// Converts this cell to its rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_cell_polygon(&self.window())
    }

    /// Returns true if the coordinate encodes to this cell.
    ///
    /// Cell edges are owned the same way the encoder assigns them, so a point
    /// on a shared edge belongs to exactly one cell.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        let Ok(code) = encode_with_options(coord.y(), coord.x(), EncodeOptions::default()) else {
            return false;
        };
        match format_code(&self.code) {
            Ok(own) => own == code,
            Err(_) => false,
        }
    }

    /// Converts this cell to a GeoJSON feature with `digipin`, `latitude` and
    /// `longitude` properties.
    pub fn to_geojson_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("digipin".to_string(), Value::from(self.code.clone()));
        properties.insert(
            "latitude".to_string(),
            Value::from(format!("{:.6}", self.latitude())),
        );
        properties.insert(
            "longitude".to_string(),
            Value::from(format!("{:.6}", self.longitude())),
        );

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
