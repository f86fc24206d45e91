//! # digipin-rs
//!
//! DIGIPIN splits the region `2.5..=38.5` N, `63.5..=99.5` E into a 4x4 grid,
//! ten times over, and names each level-10 cell (about 3.8 m square) with a
//! 10-symbol code such as `39J-49L-L8T4`.
//!
//! There are currently three main entry points.
//!
//! ### 1. `encode` / `decode` - The Codec
//!
//! ```
//! use digipin_rs::{decode, encode, is_valid_code};
//!
//! # fn main() -> Result<(), digipin_rs::DigiPinError> {
//! let code = encode(28.622788, 77.213033)?;
//! assert!(is_valid_code(&code));
//!
//! let coords = decode(&code)?;
//! println!("{} -> ({}, {})", code, coords.latitude, coords.longitude);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `DigiPinCell` - Single Cell Operations
//!
//! ```
//! use digipin_rs::DigiPinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigiPinError> {
//! let cell = DigiPinCell::from_code("39J-49L-L8T4")?;
//! let polygon = cell.to_polygon();
//! let feature = cell.to_geojson_feature();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToDigiPin` - CSV File Conversion
//!
//! ```no_run
//! use digipin_rs::{CsvDigiPinConfig, CsvToDigiPin, GeometryFormat};
//!
//! let config = CsvDigiPinConfig::from_coords("Latitude", "Longitude")
//!     .with_cell_geometry(GeometryFormat::GeoJson)
//!     .skip_invalid(true);
//!
//! "input.csv".to_digipin_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod core;
pub mod geom;
pub mod util;

pub use api::{
    CoordinateSource, CsvDigiPinConfig, CsvStats, CsvToDigiPin, DecodedCoordinate, DigiPinCell,
    EncodeOptions, GeometryFormat, csv_to_digipin_csv, decode, decode_to_point,
    digipin_csv_to_coords_csv, encode, encode_with_options, is_valid_code, is_valid_value,
};
pub use crate::core::{
    BoundsWindow, CELL_SIZE, CODE_LENGTH, DIGIPIN_GRID, GRID_SIZE, LEVELS, MAX_LAT, MAX_LON,
    MIN_LAT, MIN_LON, SEPARATOR, create_cell_polygon, point_to_row_col, validate_coordinates,
};
pub use geom::parse_geometry;
pub use util::{
    Axis, Coordinate, DigiPinError, ErrorKind, ErrorResponse, RangeViolation, ViolatedBound,
    format_code, strip_separators,
};

pub use geo_types;
