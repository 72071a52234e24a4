//! Command-line front end for `geogrid-core`.
//!
//! Two modes share one conversion path ([`boundary::convert_pair`]): `var` converts a single
//! pair given as arguments and prints JSON, `csv` converts a whole file. Both work in absolute
//! grid coordinates; the base point's grid anchor is applied here, not in the core.

pub mod boundary;
pub mod cli;
pub mod config;
pub mod csv_io;
pub mod inline;
pub mod logging;

pub use boundary::{convert_pair, Converted};
pub use config::{AppConfig, ConfigError, DEFAULT_BASE_POINT};
pub use csv_io::{convert_csv, convert_csv_file, CsvError, CsvJob, CsvSummary};
pub use inline::{convert_inline, InlineError};
