use crate::core::bounds::BoundsWindow;
use crate::core::constants::GRID_SIZE;

const LAST_INDEX: f64 = (GRID_SIZE - 1) as f64;

/// Selects the `(row, col)` cell of `window` containing `(lat, lon)`.
///
/// Rows count down from the north (row 0 is the northernmost band), columns
/// count up to the east. A point on the window's northern or eastern edge would
/// compute index 4 and is clamped back into the grid.
pub fn point_to_row_col(lat: f64, lon: f64, window: &BoundsWindow) -> (usize, usize) {
    let lat_div = window.lat_div();
    let lon_div = window.lon_div();

    let row = (LAST_INDEX - ((lat - window.min_lat) / lat_div).floor()).clamp(0.0, LAST_INDEX);
    let col = ((lon - window.min_lon) / lon_div).floor().clamp(0.0, LAST_INDEX);

    (row as usize, col as usize)
}

/// Narrows `window` to cell `(row, col)` the way the encoder does, building
/// the latitude band up from `min_lat`.
pub fn narrow_for_encode(window: &BoundsWindow, row: usize, col: usize) -> BoundsWindow {
    let lat_div = window.lat_div();
    let lon_div = window.lon_div();
    let row = row as f64;
    let col = col as f64;

    let max_lat = window.min_lat + lat_div * (4.0 - row);
    let min_lat = window.min_lat + lat_div * (3.0 - row);
    let min_lon = window.min_lon + lon_div * col;
    let max_lon = min_lon + lon_div;

    BoundsWindow {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

/// Narrows `window` to cell `(row, col)` the way the decoder does, stepping
/// the latitude band down from `max_lat`.
pub fn narrow_for_decode(window: &BoundsWindow, row: usize, col: usize) -> BoundsWindow {
    let lat_div = window.lat_div();
    let lon_div = window.lon_div();
    let row = row as f64;
    let col = col as f64;

    let max_lat = window.max_lat - lat_div * row;
    let min_lat = max_lat - lat_div;
    let min_lon = window.min_lon + lon_div * col;
    let max_lon = min_lon + lon_div;

    BoundsWindow {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}
