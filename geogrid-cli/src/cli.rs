//! CLI argument definitions for geogrid

use clap::{Parser, Subcommand, ValueEnum};
use geogrid_core::NorthAxis;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geogrid")]
#[command(about = "Convert between WGS84 latitude/longitude and block-grid coordinates")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with base point, grid and solver settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Real-world meters per grid unit (overrides the config file)
    #[arg(long, global = true)]
    pub meters_per_unit: Option<f64>,

    /// Which grid y direction points north (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub north: Option<NorthArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one coordinate pair given on the command line, printing JSON
    Var(VarArgs),

    /// Convert every row of a CSV file, appending output columns
    Csv(CsvArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// latitude/longitude -> absolute grid block
    #[value(alias = "lat2mc")]
    ToGrid,
    /// absolute grid position -> latitude/longitude
    #[value(alias = "mc2lat")]
    ToLatlng,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NorthArg {
    /// North is +y
    PositiveY,
    /// North is -y (Minecraft's -Z)
    NegativeY,
}

impl From<NorthArg> for NorthAxis {
    fn from(arg: NorthArg) -> Self {
        match arg {
            NorthArg::PositiveY => NorthAxis::PositiveY,
            NorthArg::NegativeY => NorthAxis::NegativeY,
        }
    }
}

#[derive(Parser)]
pub struct VarArgs {
    /// Conversion direction
    #[arg(value_enum)]
    pub direction: Direction,

    /// Values: <latitude> <longitude> for to-grid, <x> <y> for to-latlng
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<String>,
}

#[derive(Parser)]
pub struct CsvArgs {
    /// Input CSV path (must have a header row)
    pub input: PathBuf,

    /// Output CSV path
    pub output: PathBuf,

    /// Conversion direction
    #[arg(long, value_enum, default_value = "to-grid")]
    pub direction: Direction,

    /// Latitude column name (to-grid)
    #[arg(long, default_value = "lat")]
    pub lat_col: String,

    /// Longitude column name (to-grid)
    #[arg(long, default_value = "lng")]
    pub lng_col: String,

    /// Grid x column name (to-latlng)
    #[arg(long, default_value = "x")]
    pub x_col: String,

    /// Grid y column name (to-latlng)
    #[arg(long, default_value = "y")]
    pub y_col: String,

    /// Names of the two output columns [default: grid_x grid_y, or latitude longitude]
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"])]
    pub output_columns: Option<Vec<String>>,
}
