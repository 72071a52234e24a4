//! Text in, absolute coordinates out.
//!
//! This is where raw strings become numbers and where the base point's grid anchor is added
//! or removed. The core only ever sees finite, parsed values and relative offsets.

use crate::cli::Direction;
use geogrid_core::batch::{try_grid_to_latlng_batch, try_latlng_to_grid_batch};
use geogrid_core::{BasePoint, Converter, GridError, GridPoint, GridResult, LatLng, ValidationKind};
use serde::Serialize;

/// Result of converting one coordinate pair, in absolute terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Converted {
    /// Absolute grid block.
    Grid { x: i64, y: i64 },
    LatLng { latitude: f64, longitude: f64 },
}

impl Converted {
    /// The two values as CSV cells.
    pub fn cells(&self) -> [String; 2] {
        match self {
            Converted::Grid { x, y } => [x.to_string(), y.to_string()],
            Converted::LatLng {
                latitude,
                longitude,
            } => [latitude.to_string(), longitude.to_string()],
        }
    }
}

/// Parses one numeric field, rejecting empty, non-numeric and non-finite text.
pub fn parse_field(field: &str, raw: &str) -> GridResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GridError::validation(
            field,
            ValidationKind::Missing,
            "value is empty",
        ));
    }
    let value: f64 = trimmed.parse().map_err(|_| {
        GridError::validation(
            field,
            ValidationKind::Unparseable,
            &format!("'{}' is not a number", trimmed),
        )
    })?;
    if !value.is_finite() {
        return Err(GridError::validation(
            field,
            ValidationKind::NotFinite,
            &format!("'{}' is not a finite number", trimmed),
        ));
    }
    Ok(value)
}

/// Parses a latitude/longitude pair into a validated coordinate.
pub fn parse_latlng(latitude: &str, longitude: &str) -> GridResult<LatLng> {
    LatLng::new(
        parse_field("latitude", latitude)?,
        parse_field("longitude", longitude)?,
    )
}

/// Parses an absolute grid position and removes the base point's anchor.
pub fn parse_offset(x: &str, y: &str, base: &BasePoint) -> GridResult<GridPoint> {
    let absolute = GridPoint::new(parse_field("x", x)?, parse_field("y", y)?);
    Ok(base.to_relative(absolute))
}

fn anchored_block(offset: GridPoint, base: &BasePoint) -> Converted {
    let (x, y) = base.to_absolute(offset).to_block();
    Converted::Grid { x, y }
}

fn latlng_output(latlng: LatLng) -> Converted {
    Converted::LatLng {
        latitude: latlng.latitude,
        longitude: latlng.longitude,
    }
}

/// Converts a raw `(first, second)` pair in `direction`.
///
/// `to-grid` takes latitude and longitude and returns the absolute block; `to-latlng` takes an
/// absolute grid position and returns latitude and longitude.
pub fn convert_pair(
    direction: Direction,
    first: &str,
    second: &str,
    converter: &Converter,
    base: &BasePoint,
) -> GridResult<Converted> {
    match direction {
        Direction::ToGrid => {
            let offset = converter.latlng_to_grid(parse_latlng(first, second)?, base)?;
            Ok(anchored_block(offset, base))
        }
        Direction::ToLatlng => {
            let latlng = converter.grid_to_latlng(parse_offset(first, second, base)?, base)?;
            Ok(latlng_output(latlng))
        }
    }
}

/// [`convert_pair`] over many rows at once, through the core batch converters.
///
/// One result per row, in row order.
pub fn convert_pairs<'a, I>(
    direction: Direction,
    pairs: I,
    converter: &Converter,
    base: &BasePoint,
) -> Vec<GridResult<Converted>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    match direction {
        Direction::ToGrid => {
            let parsed = pairs
                .into_iter()
                .map(|(lat, lng)| parse_latlng(lat, lng))
                .collect();
            try_latlng_to_grid_batch(converter, parsed, base)
                .into_iter()
                .map(|r| r.map(|offset| anchored_block(offset, base)))
                .collect()
        }
        Direction::ToLatlng => {
            let parsed = pairs
                .into_iter()
                .map(|(x, y)| parse_offset(x, y, base))
                .collect();
            try_grid_to_latlng_batch(converter, parsed, base)
                .into_iter()
                .map(|r| r.map(latlng_output))
                .collect()
        }
    }
}
