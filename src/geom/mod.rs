pub mod parse;

pub use parse::{parse_geometry, parse_geometry_field};
