//! `var` mode: one pair of values from the command line.

use crate::boundary::{convert_pair, Converted};
use crate::cli::Direction;
use geogrid_core::{BasePoint, Converter, GridError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InlineError {
    #[error("Expected exactly 2 values, got {0}")]
    WrongArity(usize),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Converts the two positional values in `direction`.
pub fn convert_inline(
    direction: Direction,
    values: &[String],
    converter: &Converter,
    base: &BasePoint,
) -> Result<Converted, InlineError> {
    match values {
        [first, second] => Ok(convert_pair(direction, first, second, converter, base)?),
        _ => Err(InlineError::WrongArity(values.len())),
    }
}
