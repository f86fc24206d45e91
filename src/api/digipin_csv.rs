use crate::api::cell::DigiPinCell;
use crate::api::codec::{EncodeOptions, decode};
use crate::geom::parse::parse_geometry_field;
use crate::util::error::DigiPinError;
use geo::Centroid;
use geo_types::Geometry;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// For the type of location source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry in lon/lat order
    GeometryColumn(String),
    /// Separate latitude and longitude columns
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

/// Configuration for CSV to DigiPin conversion.
#[derive(Debug, Clone)]
pub struct CsvDigiPinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub encode_options: EncodeOptions,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub skip_invalid: bool,
}

impl CsvDigiPinConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigiPinConfig;
    ///
    /// let config = CsvDigiPinConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::GeometryColumn(geometry_column.into()))
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigiPinConfig;
    ///
    /// let config = CsvDigiPinConfig::from_coords("Latitude", "Longitude")
    ///     .include_hyphens(false);
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::CoordinateColumns {
            lat_column: lat_column.into(),
            lon_column: lon_column.into(),
        })
    }

    fn with_source(source: CoordinateSource) -> Self {
        Self {
            source,
            exclude_columns: Vec::new(),
            encode_options: EncodeOptions::default(),
            include_cell_geometry: None,
            skip_invalid: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn include_hyphens(mut self, include: bool) -> Self {
        self.encode_options = self.encode_options.include_hyphens(include);
        self
    }

    /// Include the cell polygon in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    /// Drop rows that cannot be encoded (with a warning) instead of failing.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

/// Row counts reported by the CSV converters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvStats {
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

pub trait CsvToDigiPin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigiPinConfig,
    ) -> Result<CsvStats, DigiPinError>;
}

impl<P: AsRef<Path>> CsvToDigiPin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigiPinConfig,
    ) -> Result<CsvStats, DigiPinError> {
        csv_to_digipin_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Points are encoded directly, other single geometries through their
/// centroid, and multi-geometries once per member.
fn geometry_to_cells(
    geom: Geometry<f64>,
    options: EncodeOptions,
) -> Result<Vec<DigiPinCell>, DigiPinError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![DigiPinCell::from_wgs84(&pt, options)?]),
        Geometry::MultiPoint(mp) => mp
            .0
            .iter()
            .map(|pt| DigiPinCell::from_wgs84(pt, options))
            .collect(),
        Geometry::MultiLineString(mls) => mls
            .0
            .into_iter()
            .filter_map(|line| line.centroid())
            .map(|c| DigiPinCell::from_wgs84(&c, options))
            .collect(),
        Geometry::MultiPolygon(mp) => mp
            .0
            .into_iter()
            .filter_map(|poly| poly.centroid())
            .map(|c| DigiPinCell::from_wgs84(&c, options))
            .collect(),
        Geometry::GeometryCollection(gc) => {
            let mut all_cells = Vec::new();
            for g in gc.0 {
                all_cells.extend(geometry_to_cells(g, options)?);
            }
            Ok(all_cells)
        }
        other => match other.centroid() {
            Some(c) => Ok(vec![DigiPinCell::from_wgs84(&c, options)?]),
            None => Ok(vec![]),
        },
    }
}

fn parse_coordinate(value: Option<&str>, column: &str) -> Result<f64, DigiPinError> {
    let raw = value
        .ok_or_else(|| DigiPinError::CsvError(format!("Missing {} column", column)))?
        .trim();
    raw.parse()
        .map_err(|_| DigiPinError::CsvError(format!("Invalid {}: '{}'", column, raw)))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, DigiPinError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigiPinError::CsvError(format!("Column '{}' not found", name)))
}

// ============================================================================
// CSV Conversion
// ============================================================================

/// Converts a CSV file with geometry or coordinate columns to a CSV file with
/// DigiPin codes.
///
/// Streams output to minimize memory usage for large files. The `digipin`
/// column (and `cell_geometry`, if requested) comes first, followed by every
/// input column that is not a source or excluded column.
///
/// # Example with coordinate columns
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvDigiPinConfig, GeometryFormat};
///
/// let config = CsvDigiPinConfig::from_coords("Latitude", "Longitude")
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_digipin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvDigiPinConfig,
) -> Result<CsvStats, DigiPinError> {
    let file = File::open(csv_path).map_err(|e| DigiPinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigiPinError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col)?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = column_index(&headers, lat_column)?;
            let lon_idx = column_index(&headers, lon_column)?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| DigiPinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["digipin"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| DigiPinError::CsvError(e.to_string()))?;

    let mut stats = CsvStats::default();

    for result in reader.records() {
        let record = result.map_err(|e| DigiPinError::CsvError(e.to_string()))?;
        stats.rows_read += 1;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => record
                .get(*idx)
                .ok_or_else(|| {
                    DigiPinError::CsvError(format!("Missing geometry column at index {}", idx))
                })
                .and_then(|field| {
                    parse_geometry_field(field, headers.get(*idx).unwrap_or_default(), line)
                })
                .and_then(|geom| geometry_to_cells(geom, config.encode_options)),
            SourceIndices::Coordinates { lat_idx, lon_idx } => {
                parse_coordinate(record.get(*lat_idx), "latitude").and_then(|lat| {
                    let lon = parse_coordinate(record.get(*lon_idx), "longitude")?;
                    Ok(vec![DigiPinCell::from_wgs84(&(lon, lat), config.encode_options)?])
                })
            }
        };

        let cells = match cells {
            Ok(cells) => cells,
            Err(e) if config.skip_invalid => {
                warn!(line, error = %e, "skipping row");
                stats.rows_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.code.clone()];

            if let Some(format) = config.include_cell_geometry {
                let polygon = cell.to_polygon();
                let geom_str = match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                };
                row.push(geom_str);
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| DigiPinError::CsvError(e.to_string()))?;
            stats.rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| DigiPinError::IoError(e.to_string()))?;

    debug!(?stats, "csv encode finished");
    Ok(stats)
}

/// Decodes a column of DigiPin codes, appending `latitude` and `longitude`
/// columns with the cell centroids (6 decimal places).
///
/// Rows with an invalid code fail the conversion unless `skip_invalid` is set.
pub fn digipin_csv_to_coords_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    code_column: &str,
    skip_invalid: bool,
) -> Result<CsvStats, DigiPinError> {
    let file = File::open(csv_path).map_err(|e| DigiPinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigiPinError::CsvError(e.to_string()))?
        .clone();
    let code_idx = column_index(&headers, code_column)?;

    let out_file = File::create(output_path).map_err(|e| DigiPinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = headers.iter().collect();
    header_row.extend(["latitude", "longitude"]);
    writer
        .write_record(&header_row)
        .map_err(|e| DigiPinError::CsvError(e.to_string()))?;

    let mut stats = CsvStats::default();

    for result in reader.records() {
        let record = result.map_err(|e| DigiPinError::CsvError(e.to_string()))?;
        stats.rows_read += 1;

        let decoded = record
            .get(code_idx)
            .ok_or_else(|| DigiPinError::CsvError(format!("Missing {} column", code_column)))
            .and_then(|code| decode(code.trim()));

        let coords = match decoded {
            Ok(coords) => coords,
            Err(e) if skip_invalid => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                warn!(line, error = %e, "skipping row");
                stats.rows_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut row: Vec<&str> = record.iter().collect();
        row.push(&coords.latitude);
        row.push(&coords.longitude);
        writer
            .write_record(&row)
            .map_err(|e| DigiPinError::CsvError(e.to_string()))?;
        stats.rows_written += 1;
    }

    writer
        .flush()
        .map_err(|e| DigiPinError::IoError(e.to_string()))?;

    debug!(?stats, "csv decode finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(path: &Path, lines: &[&str]) -> Result<(), DigiPinError> {
        let mut file = File::create(path).map_err(|e| DigiPinError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| DigiPinError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_output(path: &Path) -> Result<String, DigiPinError> {
        std::fs::read_to_string(path).map_err(|e| DigiPinError::IoError(e.to_string()))
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ID,Latitude,Longitude,Name",
                "1,20.5,81.5,Centre",
                "2,38.5,99.5,Corner",
            ],
        )?;

        let config = CsvDigiPinConfig::from_coords("Latitude", "Longitude");
        let stats = csv_to_digipin_csv(&csv_path, &output_path, &config)?;
        assert_eq!(stats.rows_read, 2);
        assert_eq!(stats.rows_written, 2);

        let output = read_output(&output_path)?;
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("digipin,ID,Name"));
        assert_eq!(lines.next(), Some("2LL-LLL-LLLL,1,Centre"));
        assert_eq!(lines.next(), Some("888-888-8888,2,Corner"));
        Ok(())
    }

    #[test]
    fn test_csv_geometry_column_with_cell_geometry() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "SITE,TYPE,geometry",
                "S1,Depot,\"POINT(81.5 20.5)\"",
                "S2,Yard,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[81.5,20.5]}\"",
            ],
        )?;

        let config = CsvDigiPinConfig::new("geometry")
            .include_hyphens(false)
            .with_cell_geometry(GeometryFormat::Wkt);
        csv_to_digipin_csv(&csv_path, &output_path, &config)?;

        let output = read_output(&output_path)?;
        assert!(output.starts_with("digipin,cell_geometry,SITE,TYPE"));
        assert_eq!(output.matches("2LLLLLLLLL").count(), 2);
        assert!(output.contains("POLYGON"));
        assert!(!output.contains("POINT"));
        Ok(())
    }

    #[test]
    fn test_csv_multipoint_yields_row_per_member() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ID,geometry",
                "1,\"{\"\"type\"\":\"\"MultiPoint\"\",\"\"coordinates\"\":[[81.5,20.5],[99.5,38.5]]}\"",
            ],
        )?;

        let config = CsvDigiPinConfig::new("geometry");
        let stats = csv_to_digipin_csv(&csv_path, &output_path, &config)?;
        assert_eq!(stats.rows_read, 1);
        assert_eq!(stats.rows_written, 2);
        Ok(())
    }

    #[test]
    fn test_csv_out_of_range_fails_by_default() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["lat,lon", "20.5,81.5", "0,80"])?;

        let config = CsvDigiPinConfig::from_coords("lat", "lon");
        let result = csv_to_digipin_csv(&csv_path, &output_path, &config);
        assert!(matches!(result, Err(DigiPinError::OutOfRange(_))));
        Ok(())
    }

    #[test]
    fn test_csv_skip_invalid() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["lat,lon", "20.5,81.5", "0,80", "abc,81"])?;

        let config = CsvDigiPinConfig::from_coords("lat", "lon").skip_invalid(true);
        let stats = csv_path.to_digipin_csv(&output_path, &config)?;
        assert_eq!(
            stats,
            CsvStats {
                rows_read: 3,
                rows_written: 1,
                rows_skipped: 2
            }
        );
        Ok(())
    }

    #[test]
    fn test_csv_bad_geometry_names_column_and_line() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &["id,location", "1,POINT(81.5 20.5)", "2,POINT(81.5"],
        )?;

        let config = CsvDigiPinConfig::new("location");
        match csv_to_digipin_csv(&csv_path, &output_path, &config) {
            Err(DigiPinError::GeometryParseError(msg)) => {
                assert!(
                    msg.starts_with("column 'location', line 3: invalid WKT"),
                    "{msg}"
                );
            }
            other => panic!("expected GeometryParseError, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["x,y", "81.5,20.5"])?;

        let config = CsvDigiPinConfig::from_coords("Latitude", "Longitude");
        let result = csv_to_digipin_csv(&csv_path, &output_path, &config);
        assert!(matches!(result, Err(DigiPinError::CsvError(_))));
        Ok(())
    }

    #[test]
    fn test_decode_csv() -> Result<(), DigiPinError> {
        let dir = tempdir().map_err(|e| DigiPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("codes.csv");
        let output_path = dir.path().join("coords.csv");

        write_input(
            &csv_path,
            &["Name,digipin", "Centre,2LL-LLL-LLLL", "Bad,AAA-AAA-AAAA"],
        )?;

        let result = digipin_csv_to_coords_csv(&csv_path, &output_path, "digipin", false);
        assert_eq!(result, Err(DigiPinError::InvalidSymbol('A')));

        let stats = digipin_csv_to_coords_csv(&csv_path, &output_path, "digipin", true)?;
        assert_eq!(stats.rows_written, 1);
        assert_eq!(stats.rows_skipped, 1);

        let output = read_output(&output_path)?;
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Name,digipin,latitude,longitude"));
        assert_eq!(
            lines.next(),
            Some("Centre,2LL-LLL-LLLL,20.500017,81.500017")
        );
        Ok(())
    }
}
