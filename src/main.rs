//! Command-line front end for the DigiPin codec.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use digipin_rs::{
    CsvDigiPinConfig, DigiPinError, EncodeOptions, GeometryFormat, csv_to_digipin_csv, decode,
    digipin_csv_to_coords_csv, encode_with_options, is_valid_code,
};

#[derive(Parser, Debug)]
#[command(name = "digipin")]
#[command(about = "Encode and decode DIGIPIN grid codes")]
struct Args {
    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a latitude/longitude pair
    Encode {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Omit the separators after the 3rd and 6th symbol
        #[arg(long)]
        no_hyphens: bool,
    },
    /// Decode a code into its cell centroid
    Decode { code: String },
    /// Check whether a code is well formed
    Validate { code: String },
    /// Add a digipin column to a CSV file
    CsvEncode {
        input: PathBuf,
        output: PathBuf,
        /// Latitude column (used with --lon-column)
        #[arg(long, default_value = "latitude", conflicts_with = "geometry_column")]
        lat_column: String,
        /// Longitude column (used with --lat-column)
        #[arg(long, default_value = "longitude", conflicts_with = "geometry_column")]
        lon_column: String,
        /// WKT or GeoJSON geometry column, instead of lat/lon columns
        #[arg(long)]
        geometry_column: Option<String>,
        /// Columns to leave out of the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        #[arg(long)]
        no_hyphens: bool,
        /// Also write each cell's polygon
        #[arg(long, value_enum)]
        cell_geometry: Option<CellGeometry>,
        /// Skip rows that cannot be encoded instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Add latitude/longitude columns decoded from a digipin column
    CsvDecode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "digipin")]
        column: String,
        #[arg(long)]
        skip_invalid: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CellGeometry {
    Wkt,
    Geojson,
}

impl From<CellGeometry> for GeometryFormat {
    fn from(value: CellGeometry) -> Self {
        match value {
            CellGeometry::Wkt => GeometryFormat::Wkt,
            CellGeometry::Geojson => GeometryFormat::GeoJson,
        }
    }
}

fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            if args.json {
                println!("{}", serde_json::to_string(&e.to_response())?);
            } else {
                error!(kind = %e.kind(), "{}", e);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(args: &Args) -> Result<(), DigiPinError> {
    match &args.command {
        Command::Encode {
            lat,
            lon,
            no_hyphens,
        } => {
            let options = EncodeOptions::new().include_hyphens(!no_hyphens);
            let digipin = encode_with_options(*lat, *lon, options)?;
            if args.json {
                println!("{}", json!({ "digipin": digipin }));
            } else {
                println!("{}", digipin);
            }
        }
        Command::Decode { code } => {
            let coords = decode(code)?;
            if args.json {
                println!("{}", json!(coords));
            } else {
                println!("{},{}", coords.latitude, coords.longitude);
            }
        }
        Command::Validate { code } => {
            let valid = is_valid_code(code);
            if args.json {
                println!("{}", json!({ "valid": valid }));
            } else {
                println!("{}", valid);
            }
        }
        Command::CsvEncode {
            input,
            output,
            lat_column,
            lon_column,
            geometry_column,
            exclude,
            no_hyphens,
            cell_geometry,
            skip_invalid,
        } => {
            let mut config = match geometry_column {
                Some(col) => CsvDigiPinConfig::new(col.as_str()),
                None => CsvDigiPinConfig::from_coords(lat_column.as_str(), lon_column.as_str()),
            }
            .exclude(exclude.clone())
            .include_hyphens(!no_hyphens)
            .skip_invalid(*skip_invalid);
            if let Some(format) = cell_geometry {
                config = config.with_cell_geometry((*format).into());
            }

            info!("Encoding {} -> {}", input.display(), output.display());
            let stats = csv_to_digipin_csv(input, output, &config)?;
            info!(
                "Read {} rows, wrote {}, skipped {}",
                stats.rows_read, stats.rows_written, stats.rows_skipped
            );
        }
        Command::CsvDecode {
            input,
            output,
            column,
            skip_invalid,
        } => {
            info!("Decoding {} -> {}", input.display(), output.display());
            let stats = digipin_csv_to_coords_csv(input, output, column, *skip_invalid)?;
            info!(
                "Read {} rows, wrote {}, skipped {}",
                stats.rows_read, stats.rows_written, stats.rows_skipped
            );
        }
    }

    Ok(())
}
