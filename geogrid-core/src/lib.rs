//! WGS84 latitude/longitude to block-grid conversion.
//!
//! `geogrid-core` maps real-world coordinates onto the flat horizontal grid of a voxel
//! renderer and back. North-south distance is the difference of two meridian arc lengths
//! on the WGS84 ellipsoid; east-west distance is measured along the parallel using the
//! prime-vertical radius of curvature.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`geodesy`] | Meridian arc length and its iterative inverse, parallel distances, Vincenty |
//! | [`converter`] | [`Converter`]: latlng <-> relative grid offset, [`NorthAxis`] |
//! | [`base_point`] | [`BasePoint`]: the anchor every conversion is relative to |
//! | [`point`] | [`LatLng`] and [`GridPoint`] value types |
//! | [`ellipsoid`] | WGS84 parameters and radii of curvature |
//! | [`batch`] | Per-item conversion over slices (rayon with `parallel`) |
//! | [`constants`] | Ellipsoid constants and conversion defaults |
//! | [`errors`] | [`GridError`] and [`GridResult`] |
//!
//! # Example
//!
//! ```
//! use geogrid_core::{BasePoint, Converter, GridPoint, LatLng};
//!
//! let base = BasePoint::new(
//!     LatLng::new(36.138755, 139.388908)?,
//!     GridPoint::new(-559.0, -395.0),
//! )?;
//! let converter = Converter::default();
//!
//! // Forward: relative offset, then the caller anchors it.
//! let offset = converter.latlng_to_grid(LatLng::new(36.147755, 139.388908)?, &base)?;
//! let (x, y) = base.to_absolute(offset).to_block();
//! assert_eq!((x, y), (-559, 604));
//!
//! // Inverse: the caller removes the anchor first.
//! let latlng = converter.grid_to_latlng(base.to_relative(GridPoint::new(-559.0, 604.0)), &base)?;
//! assert!((latlng.latitude - 36.147755).abs() < 1e-5);
//! # Ok::<(), geogrid_core::GridError>(())
//! ```
//!
//! # Design Notes
//!
//! - **Relative offsets only**: the converter never adds or removes the grid anchor. That
//!   bookkeeping belongs to the caller ([`BasePoint::to_absolute`] / [`BasePoint::to_relative`]).
//! - **No implicit state**: ellipsoid parameters are `const`; the solver bound and tolerance
//!   travel in [`SolverConfig`]. Every function is safe to call from any thread.
//! - **Degrees at the boundary**: public APIs take and return degrees and meters.

pub mod base_point;
pub mod batch;
pub mod constants;
pub mod converter;
pub mod ellipsoid;
pub mod errors;
pub mod geodesy;
pub mod point;

pub use base_point::BasePoint;
pub use converter::{grid_to_latlng, latlng_to_grid, Converter, NorthAxis};
pub use ellipsoid::Ellipsoid;
pub use errors::{GridError, GridResult, ValidationKind};
pub use geodesy::SolverConfig;
pub use point::{GridPoint, LatLng};

pub mod test_helpers;
