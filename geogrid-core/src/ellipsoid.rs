//! Reference ellipsoid and its radii of curvature.
//!
//! The only ellipsoid in use is WGS84:
//! - Semi-major axis (equatorial radius): 6,378,137.0 m
//! - Flattening: 1/298.257223563
//! - First eccentricity squared: ~0.00669438
//!
//! All derived quantities are computed once in the `const` item, so [`Ellipsoid::WGS84`] is
//! a plain process-wide value with nothing to initialise.

use crate::constants::{
    WGS84_ECCENTRICITY_SQUARED, WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis in meters.
    pub a: f64,
    /// Flattening, (a - b) / a.
    pub f: f64,
    /// Semi-minor axis in meters.
    pub b: f64,
    /// First eccentricity squared.
    pub e2: f64,
    /// Third flattening, (a - b) / (a + b). The meridian arc series is expanded in this.
    pub n: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: WGS84_SEMI_MAJOR_AXIS,
        f: WGS84_FLATTENING,
        b: WGS84_SEMI_MAJOR_AXIS * (1.0 - WGS84_FLATTENING),
        e2: WGS84_ECCENTRICITY_SQUARED,
        n: WGS84_FLATTENING / (2.0 - WGS84_FLATTENING),
    };

    /// Radius of the sphere whose great circle has the same length as the meridian.
    ///
    /// Meridian arc length is approximately `rectifying_radius * φ`, which makes
    /// `arc / rectifying_radius` a good starting latitude for the inverse solver.
    #[inline]
    pub fn rectifying_radius(&self) -> f64 {
        let n2 = self.n * self.n;
        self.a / (1.0 + self.n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0)
    }

    /// Meridian radius of curvature ρ(φ) = a(1 - e²) / (1 - e² sin²φ)^(3/2).
    ///
    /// This is dM/dφ, the rate at which meridian arc length grows with latitude.
    #[inline]
    pub fn meridian_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        let w2 = 1.0 - self.e2 * sin_lat * sin_lat;
        self.a * (1.0 - self.e2) / (w2 * w2.sqrt())
    }

    /// Prime-vertical radius of curvature N(φ) = a / sqrt(1 - e² sin²φ).
    #[inline]
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }

    /// Radius of the parallel circle at `lat_rad`, N(φ)·cos φ.
    ///
    /// Zero at the poles (up to rounding of cos(π/2)).
    #[inline]
    pub fn parallel_radius(&self, lat_rad: f64) -> f64 {
        self.prime_vertical_radius(lat_rad) * lat_rad.cos()
    }
}
