//! The anchor pairing a real-world coordinate with a grid position.

use crate::errors::GridResult;
use crate::point::{GridPoint, LatLng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A real-world anchor and the absolute grid position it corresponds to.
///
/// Every conversion is relative to one of these. The library holds no default; callers
/// build one from their own configuration and may pass a different one per call.
///
/// ```
/// use geogrid_core::{BasePoint, GridPoint, LatLng};
///
/// let base = BasePoint::new(
///     LatLng::new(36.138755, 139.388908)?,
///     GridPoint::new(-559.0, -395.0),
/// )?;
/// let world = base.to_absolute(GridPoint::new(10.0, 20.0));
/// assert_eq!(world, GridPoint::new(-549.0, -375.0));
/// # Ok::<(), geogrid_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasePoint {
    pub latlng: LatLng,
    pub grid: GridPoint,
}

impl BasePoint {
    pub fn new(latlng: LatLng, grid: GridPoint) -> GridResult<Self> {
        let base = Self { latlng, grid };
        base.validate()?;
        Ok(base)
    }

    pub fn validate(&self) -> GridResult<()> {
        self.latlng.validate()?;
        self.grid.validate()
    }

    /// Adds the grid anchor to a relative offset.
    #[inline]
    pub fn to_absolute(&self, offset: GridPoint) -> GridPoint {
        self.grid + offset
    }

    /// Subtracts the grid anchor from an absolute grid position.
    #[inline]
    pub fn to_relative(&self, absolute: GridPoint) -> GridPoint {
        absolute - self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BasePoint {
        BasePoint::new(
            LatLng::new(36.138755, 139.388908).unwrap(),
            GridPoint::new(-559.0, -395.0),
        )
        .unwrap()
    }

    #[test]
    fn test_absolute_relative_are_inverse() {
        let b = base();
        let offset = GridPoint::new(500.0, -300.0);
        assert_eq!(b.to_relative(b.to_absolute(offset)), offset);
    }

    #[test]
    fn test_anchor_maps_to_zero_offset() {
        let b = base();
        assert_eq!(b.to_relative(b.grid), GridPoint::ORIGIN);
    }

    #[test]
    fn test_rejects_invalid_members() {
        let bad_latlng = LatLng {
            latitude: 95.0,
            longitude: 0.0,
        };
        assert!(BasePoint::new(bad_latlng, GridPoint::ORIGIN).is_err());

        let good_latlng = LatLng::new(0.0, 0.0).unwrap();
        assert!(BasePoint::new(good_latlng, GridPoint::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_fractional_offsets_survive_anchoring() {
        use crate::test_helpers::assert_ulp_le;

        let b = base();
        let offset = GridPoint::new(0.1 + 0.2, -1234.5678);
        let back = b.to_relative(b.to_absolute(offset));
        assert_ulp_le(back.x, offset.x, 2048, "x");
        assert_ulp_le(back.y, offset.y, 16, "y");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&base()).unwrap();
        assert_eq!(
            json,
            r#"{"latlng":{"latitude":36.138755,"longitude":139.388908},"grid":{"x":-559.0,"y":-395.0}}"#
        );
        let parsed: BasePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, base());
    }
}
