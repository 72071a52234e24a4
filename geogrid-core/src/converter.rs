//! Conversion between geodetic coordinates and relative grid offsets.
//!
//! # Contract
//!
//! Both directions work on offsets *relative to a base point*:
//!
//! - [`Converter::latlng_to_grid`] returns how far the coordinate is from
//!   `base.latlng`, in grid units. Add `base.grid` (or call
//!   [`BasePoint::to_absolute`]) for a world position.
//! - [`Converter::grid_to_latlng`] takes an offset from `base.grid` (see
//!   [`BasePoint::to_relative`]) and returns an absolute coordinate.
//!
//! # Axes
//!
//! `x` is east-west along the parallel, east positive. `y` is north-south along the
//! meridian; whether north is `+y` or `-y` is set by [`NorthAxis`]. The north-south offset
//! is the difference of two meridian arc lengths; the east-west offset is measured along the
//! parallel at the *target* latitude, and the inverse uses the recovered latitude so the two
//! directions share one curvature model.

use crate::base_point::BasePoint;
use crate::constants::{DEFAULT_METERS_PER_UNIT, MAX_LONGITUDE_DEG};
use crate::errors::{GridError, GridResult, ValidationKind};
use crate::geodesy::{
    east_west_distance, inverse_longitude_delta, inverse_meridional_latitude,
    meridional_arc_length, normalize_longitude, quarter_meridian, SolverConfig,
};
use crate::point::{GridPoint, LatLng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const ANTIMERIDIAN_SNAP_DEG: f64 = 1e-9;

/// Which grid `y` direction points north.
///
/// Renderers disagree: Minecraft's Z axis grows toward the south, while a map-style grid
/// grows toward the north. Pick the one that matches the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NorthAxis {
    /// North is increasing `y`.
    #[default]
    PositiveY,
    /// North is decreasing `y` (Minecraft's `-Z`).
    NegativeY,
}

impl NorthAxis {
    /// Multiplier taking a north-positive distance to a grid `y` distance, and back.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            NorthAxis::PositiveY => 1.0,
            NorthAxis::NegativeY => -1.0,
        }
    }
}

/// Converts between [`LatLng`] and relative [`GridPoint`] offsets.
///
/// Holds only configuration, so a single instance can be shared freely across threads.
///
/// ```
/// use geogrid_core::{BasePoint, Converter, GridPoint, LatLng};
///
/// let base = BasePoint::new(LatLng::new(36.1, 139.38)?, GridPoint::new(0.0, 0.0))?;
/// let converter = Converter::default();
///
/// let offset = converter.latlng_to_grid(LatLng::new(36.1389, 139.3891)?, &base)?;
/// assert!(offset.y > 4300.0 && offset.x > 800.0);
///
/// let back = converter.grid_to_latlng(offset, &base)?;
/// assert!((back.latitude - 36.1389).abs() < 1e-9);
/// # Ok::<(), geogrid_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Converter {
    /// Real-world meters covered by one grid unit.
    pub meters_per_unit: f64,
    pub north: NorthAxis,
    pub solver: SolverConfig,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            meters_per_unit: DEFAULT_METERS_PER_UNIT,
            north: NorthAxis::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl Converter {
    pub fn new(meters_per_unit: f64, north: NorthAxis, solver: SolverConfig) -> GridResult<Self> {
        let converter = Self {
            meters_per_unit,
            north,
            solver,
        };
        converter.validate()?;
        Ok(converter)
    }

    pub fn with_meters_per_unit(mut self, meters_per_unit: f64) -> Self {
        self.meters_per_unit = meters_per_unit;
        self
    }

    pub fn with_north(mut self, north: NorthAxis) -> Self {
        self.north = north;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn validate(&self) -> GridResult<()> {
        if !self.meters_per_unit.is_finite() || self.meters_per_unit <= 0.0 {
            return Err(GridError::validation(
                "meters_per_unit",
                ValidationKind::OutOfRange,
                &format!(
                    "must be positive and finite, got {}",
                    self.meters_per_unit
                ),
            ));
        }
        self.solver.validate()
    }

    /// Offset of `coordinate` from `base.latlng`, in grid units.
    ///
    /// # Errors
    ///
    /// Validation error if the coordinate, base point or converter settings are invalid.
    pub fn latlng_to_grid(&self, coordinate: LatLng, base: &BasePoint) -> GridResult<GridPoint> {
        self.validate()?;
        coordinate.validate()?;
        base.validate()?;

        if coordinate.bit_eq(&base.latlng) {
            return Ok(GridPoint::ORIGIN);
        }

        let north_m =
            meridional_arc_length(coordinate.latitude) - meridional_arc_length(base.latlng.latitude);
        let delta_lon = normalize_longitude(coordinate.longitude - base.latlng.longitude);
        let east_m = east_west_distance(coordinate.latitude, delta_lon);

        Ok(GridPoint::new(
            east_m / self.meters_per_unit,
            self.north.sign() * north_m / self.meters_per_unit,
        ))
    }

    /// Absolute coordinate for an `offset` from `base.grid`.
    ///
    /// # Errors
    ///
    /// - Validation error for a non-finite offset, an invalid base point, or an offset that
    ///   runs past a pole by more than half a grid unit. At a pole the east-west offset is ignored and the base longitude
    ///   is returned.
    /// - Convergence error if the inverse latitude solver exhausts its iteration bound.
    pub fn grid_to_latlng(&self, offset: GridPoint, base: &BasePoint) -> GridResult<LatLng> {
        self.validate()?;
        offset.validate()?;
        base.validate()?;

        let north_m = self.north.sign() * offset.y * self.meters_per_unit;
        let east_m = offset.x * self.meters_per_unit;

        let target_arc = clamp_block_overshoot(
            meridional_arc_length(base.latlng.latitude) + north_m,
            self.meters_per_unit,
        );
        let latitude = inverse_meridional_latitude(target_arc, &self.solver)?;

        let delta_lon = inverse_longitude_delta(latitude, east_m);
        let longitude = wrap_output_longitude(base.latlng.longitude + delta_lon);

        Ok(LatLng {
            latitude,
            longitude,
        })
    }
}

/// Pulls an arc that overshoots a pole by no more than half a grid unit back onto the pole.
/// Block-rounded positions near a pole land there.
fn clamp_block_overshoot(arc_m: f64, meters_per_unit: f64) -> f64 {
    let quarter = quarter_meridian();
    let overshoot = arc_m.abs() - quarter;
    if overshoot > 0.0 && overshoot <= 0.5 * meters_per_unit {
        quarter.copysign(arc_m)
    } else {
        arc_m
    }
}

/// Normalises to [-180, 180], keeping the side of the antimeridian `raw` came from when the
/// result lands within rounding of ±180.
fn wrap_output_longitude(raw: f64) -> f64 {
    let longitude = normalize_longitude(raw);
    if (longitude.abs() - MAX_LONGITUDE_DEG).abs() < ANTIMERIDIAN_SNAP_DEG {
        MAX_LONGITUDE_DEG.copysign(raw)
    } else {
        longitude
    }
}

/// [`Converter::latlng_to_grid`] with default settings.
pub fn latlng_to_grid(coordinate: LatLng, base: &BasePoint) -> GridResult<GridPoint> {
    Converter::default().latlng_to_grid(coordinate, base)
}

/// [`Converter::grid_to_latlng`] with default settings.
pub fn grid_to_latlng(offset: GridPoint, base: &BasePoint) -> GridResult<LatLng> {
    Converter::default().grid_to_latlng(offset, base)
}
