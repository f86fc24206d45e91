use crate::core::bounds::BoundsWindow;
use geo_types::{Coord, LineString, Polygon};

/// Builds the closed rectangular ring of a cell, counter-clockwise from the
/// south-west corner, in lon/lat order.
pub fn create_cell_polygon(window: &BoundsWindow) -> Polygon<f64> {
    let coords = vec![
        Coord { x: window.min_lon, y: window.min_lat },
        Coord { x: window.max_lon, y: window.min_lat },
        Coord { x: window.max_lon, y: window.max_lat },
        Coord { x: window.min_lon, y: window.max_lat },
        Coord { x: window.min_lon, y: window.min_lat },
    ];

    Polygon::new(LineString::from(coords), vec![])
}
