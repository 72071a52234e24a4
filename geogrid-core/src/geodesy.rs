//! Distances on the WGS84 ellipsoid.
//!
//! # North-south: meridian arc
//!
//! The meridional arc length `M(φ)` is the surface distance along a meridian from the
//! equator to latitude `φ`. It is evaluated with Helmert's series in the third flattening
//! `n`, truncated after `n⁴`:
//!
//! ```text
//! M(φ) = a/(1+n) · [ (1 + n²/4 + n⁴/64) φ
//!                    - 3/2 (n - n³/8) sin 2φ
//!                    + 15/16 (n² - n⁴/4) sin 4φ
//!                    - 35/48 n³ sin 6φ
//!                    + 315/512 n⁴ sin 8φ ]
//! ```
//!
//! The truncation error is well under a millimeter for WGS84. There is no closed-form
//! inverse; [`inverse_meridional_latitude`] refines a latitude estimate by dividing the
//! arc-length residual by the meridian radius of curvature (dM/dφ).
//!
//! # East-west: parallel circle
//!
//! At a fixed latitude the east-west distance for a longitude change `Δλ` is
//! `N(φ) · cos φ · Δλ`, where `N` is the prime-vertical radius of curvature. This is
//! directly invertible, so the inverse needs no iteration.
//!
//! # Units
//!
//! Angles in and out are degrees; distances are meters.

use crate::constants::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_DEG, MAX_LATITUDE_DEG, RAD_TO_DEG,
};
use crate::ellipsoid::Ellipsoid;
use crate::errors::{GridError, GridResult, ValidationKind};
use crate::point::LatLng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Iteration bound and stopping tolerance for the inverse latitude solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// Stop once a refinement step moves the latitude by less than this many degrees.
    pub tolerance_deg: f64,
}

impl SolverConfig {
    pub const fn new(max_iterations: usize, tolerance_deg: f64) -> Self {
        Self {
            max_iterations,
            tolerance_deg,
        }
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.max_iterations == 0 {
            return Err(GridError::validation(
                "max_iterations",
                ValidationKind::OutOfRange,
                "at least one iteration is required",
            ));
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err(GridError::validation(
                "tolerance_deg",
                ValidationKind::OutOfRange,
                &format!("must be positive and finite, got {}", self.tolerance_deg),
            ));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_DEG)
    }
}

/// Below this parallel radius (1 µm) the latitude is treated as a pole.
const POLAR_PARALLEL_RADIUS_M: f64 = 1e-6;

fn arc_length_radians(wgs: &Ellipsoid, lat_rad: f64) -> f64 {
    let n = wgs.n;
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n2 * n2;

    let c0 = 1.0 + n2 / 4.0 + n4 / 64.0;
    let c2 = -1.5 * (n - n3 / 8.0);
    let c4 = 15.0 / 16.0 * (n2 - n4 / 4.0);
    let c6 = -35.0 / 48.0 * n3;
    let c8 = 315.0 / 512.0 * n4;

    wgs.a / (1.0 + n)
        * (c0 * lat_rad
            + c2 * (2.0 * lat_rad).sin()
            + c4 * (4.0 * lat_rad).sin()
            + c6 * (6.0 * lat_rad).sin()
            + c8 * (8.0 * lat_rad).sin())
}

/// Meridian distance in meters from the equator to `latitude_deg`.
///
/// Negative in the southern hemisphere. Defined on [-90, 90]; the caller is responsible
/// for validating the latitude.
///
/// ```
/// use geogrid_core::geodesy::meridional_arc_length;
///
/// assert_eq!(meridional_arc_length(0.0), 0.0);
/// // Equator to pole is about 10,002 km.
/// assert!((meridional_arc_length(90.0) - 10_001_965.729).abs() < 0.01);
/// ```
pub fn meridional_arc_length(latitude_deg: f64) -> f64 {
    arc_length_radians(&Ellipsoid::WGS84, latitude_deg.to_radians())
}

/// Meridian distance from the equator to either pole.
pub fn quarter_meridian() -> f64 {
    Ellipsoid::WGS84.rectifying_radius() * std::f64::consts::FRAC_PI_2
}

/// Solves `meridional_arc_length(φ) = arc_m` for `φ` in degrees.
///
/// # Errors
///
/// - Validation error if `arc_m` is not finite or longer than the quarter meridian.
/// - Convergence error if `config.max_iterations` steps pass without a step smaller than
///   `config.tolerance_deg`.
pub fn inverse_meridional_latitude(arc_m: f64, config: &SolverConfig) -> GridResult<f64> {
    if !arc_m.is_finite() {
        return Err(GridError::validation(
            "arc_length",
            ValidationKind::NotFinite,
            &format!("arc length must be finite, got {}", arc_m),
        ));
    }
    let quarter = quarter_meridian();
    if arc_m.abs() > quarter + 1e-6 {
        return Err(GridError::validation(
            "arc_length",
            ValidationKind::OutOfRange,
            &format!(
                "{:.3} m is beyond the pole (quarter meridian is {:.3} m)",
                arc_m, quarter
            ),
        ));
    }

    let wgs = Ellipsoid::WGS84;
    let half_pi = std::f64::consts::FRAC_PI_2;
    let mut lat_rad = (arc_m / wgs.rectifying_radius()).clamp(-half_pi, half_pi);
    let mut step_deg = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let residual = arc_m - arc_length_radians(&wgs, lat_rad);
        let step = residual / wgs.meridian_radius(lat_rad);
        lat_rad = (lat_rad + step).clamp(-half_pi, half_pi);
        step_deg = step.abs() * RAD_TO_DEG;

        if step_deg < config.tolerance_deg {
            tracing::trace!(iteration, arc_m, "inverse meridional latitude converged");
            return Ok((lat_rad * RAD_TO_DEG).clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG));
        }
    }

    tracing::debug!(
        arc_m,
        max_iterations = config.max_iterations,
        last_step_deg = step_deg,
        "inverse meridional latitude did not converge"
    );
    Err(GridError::convergence(
        "inverse_meridional_latitude",
        config.max_iterations,
        step_deg,
    ))
}

/// East-west ground distance in meters along the parallel at `latitude_deg` for a
/// longitude change of `delta_lon_deg`. Positive eastward.
pub fn east_west_distance(latitude_deg: f64, delta_lon_deg: f64) -> f64 {
    Ellipsoid::WGS84.parallel_radius(latitude_deg.to_radians()) * delta_lon_deg.to_radians()
}

/// Longitude change in degrees that covers `distance_m` along the parallel at
/// `latitude_deg`. Inverse of [`east_west_distance`].
///
/// At a pole every longitude names the same point, so the change is zero there.
pub fn inverse_longitude_delta(latitude_deg: f64, distance_m: f64) -> f64 {
    let radius = Ellipsoid::WGS84.parallel_radius(latitude_deg.to_radians());
    if radius <= POLAR_PARALLEL_RADIUS_M {
        tracing::trace!(latitude_deg, distance_m, "longitude degenerate at pole");
        return 0.0;
    }
    (distance_m / radius) * RAD_TO_DEG
}

/// Wraps a longitude or longitude difference into [-180, 180].
#[inline]
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    let mut normalized = lon_deg % 360.0;
    if normalized > 180.0 {
        normalized -= 360.0;
    } else if normalized < -180.0 {
        normalized += 360.0;
    }
    normalized
}

/// Ellipsoidal surface distance in meters between two points (Vincenty's inverse formula).
///
/// Independent of the meridian/parallel decomposition used for grid offsets, which makes
/// it the reference for checking that decomposition.
///
/// # Errors
///
/// Validation error for invalid coordinates; convergence error for nearly antipodal
/// points, where Vincenty's iteration is known to fail.
pub fn vincenty_distance(from: &LatLng, to: &LatLng) -> GridResult<f64> {
    const MAX_ITER: usize = 200;
    const TOL: f64 = 1e-12;

    from.validate()?;
    to.validate()?;

    let wgs = Ellipsoid::WGS84;
    let (a, b, f) = (wgs.a, wgs.b, wgs.f);

    let l = normalize_longitude(to.longitude - from.longitude).to_radians();
    let u1 = ((1.0 - f) * from.latitude_radians().tan()).atan();
    let u2 = ((1.0 - f) * to.latitude_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut last_change = f64::INFINITY;

    for _ in 0..MAX_ITER {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return Ok(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos2_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial line: cos²α = 0 and the midpoint term drops out.
        let cos_2sigma_m = if cos2_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos2_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos2_alpha * (4.0 + f * (4.0 - 3.0 * cos2_alpha));

        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));
        last_change = (lambda - previous).abs();

        if last_change < TOL {
            let u_sq = cos2_alpha * (a * a - b * b) / (b * b);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Ok(b * big_a * (sigma - delta_sigma));
        }
    }

    Err(GridError::convergence("vincenty_distance", MAX_ITER, last_change))
}
