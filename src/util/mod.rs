pub mod code;
pub mod coord;
pub mod error;

pub use code::{code_to_positions, format_code, strip_separators};
pub use coord::Coordinate;
pub use error::{Axis, DigiPinError, ErrorKind, ErrorResponse, RangeViolation, ViolatedBound};
