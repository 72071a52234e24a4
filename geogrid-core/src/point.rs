//! Point types on both sides of the conversion.
//!
//! - [`LatLng`]: WGS84 geodetic latitude/longitude in degrees. North and east are positive.
//! - [`GridPoint`]: position on the renderer's horizontal block grid. `x` runs east-west and
//!   `y` runs north-south. The renderer's vertical axis is not represented.
//!
//! Both are small `Copy` values. A `GridPoint` is either a relative offset from a base
//! point or an absolute grid position; which one is determined by the function that
//! produced it, not by the type.

use crate::constants::{MAX_LATITUDE_DEG, MAX_LONGITUDE_DEG};
use crate::errors::{check_finite, check_symmetric_range, GridResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A WGS84 geodetic coordinate in degrees.
///
/// Fields are public so callers can build literals, which means a `LatLng` is not
/// guaranteed to be in range. The converter re-checks with [`validate`](Self::validate)
/// before doing any math.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
    /// Geodetic latitude in degrees, [-90, 90]. North is positive.
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]. East is positive.
    pub longitude: f64,
}

impl LatLng {
    /// Creates a coordinate from degrees.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either value is non-finite or out of range.
    ///
    /// ```
    /// use geogrid_core::LatLng;
    ///
    /// let p = LatLng::new(36.138755, 139.388908)?;
    /// assert_eq!(p.latitude, 36.138755);
    /// assert!(LatLng::new(91.0, 0.0).is_err());
    /// # Ok::<(), geogrid_core::GridError>(())
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> GridResult<Self> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> GridResult<()> {
        check_symmetric_range("latitude", self.latitude, MAX_LATITUDE_DEG)?;
        check_symmetric_range("longitude", self.longitude, MAX_LONGITUDE_DEG)?;
        Ok(())
    }

    #[inline]
    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Exact bitwise equality, so `0.0` and `-0.0` differ and NaN equals itself.
    #[inline]
    pub fn bit_eq(&self, other: &LatLng) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

/// A position or offset on the horizontal block grid, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPoint {
    /// East-west grid units. East is positive.
    pub x: f64,
    /// North-south grid units. Which direction is positive depends on
    /// [`NorthAxis`](crate::NorthAxis).
    pub y: f64,
}

impl GridPoint {
    pub const ORIGIN: GridPoint = GridPoint { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn validate(&self) -> GridResult<()> {
        check_finite("x", self.x)?;
        check_finite("y", self.y)?;
        Ok(())
    }

    /// Straight-line length of the offset in grid units.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Snaps to the containing block, rounding half away from zero.
    ///
    /// ```
    /// use geogrid_core::GridPoint;
    ///
    /// assert_eq!(GridPoint::new(2.5, -2.5).to_block(), (3, -3));
    /// assert_eq!(GridPoint::new(0.49, -0.49).to_block(), (0, 0));
    /// ```
    #[inline]
    pub fn to_block(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

impl From<(i64, i64)> for GridPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

impl std::ops::Add for GridPoint {
    type Output = GridPoint;

    fn add(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for GridPoint {
    type Output = GridPoint;

    fn sub(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}
