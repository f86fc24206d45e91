pub mod cell;
pub mod codec;
pub mod digipin_csv;

pub use cell::DigiPinCell;
pub use codec::{
    DecodedCoordinate, EncodeOptions, decode, decode_to_point, encode, encode_with_options,
    is_valid_code, is_valid_value,
};
pub use digipin_csv::{
    CoordinateSource, CsvDigiPinConfig, CsvStats, CsvToDigiPin, GeometryFormat,
    csv_to_digipin_csv, digipin_csv_to_coords_csv,
};
