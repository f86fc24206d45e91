pub mod bounds;
pub mod constants;
pub mod geometry;
pub mod grid;
pub mod symbols;

pub use bounds::{BoundsWindow, validate_coordinates};
pub use constants::{
    CELL_SIZE, CODE_LENGTH, DIGIPIN_GRID, GRID_SIZE, LEVELS, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
    SEPARATOR, SEPARATOR_LEVELS,
};
pub use geometry::create_cell_polygon;
pub use grid::{narrow_for_decode, narrow_for_encode, point_to_row_col};
pub use symbols::{is_symbol, symbol_at, symbol_position};
