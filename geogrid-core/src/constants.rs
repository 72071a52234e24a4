pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 inverse flattening, 1/f.
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257223563;

pub const WGS84_FLATTENING: f64 = 1.0 / WGS84_INVERSE_FLATTENING;

/// WGS84 first eccentricity squared: e² = f(2 - f).
pub const WGS84_ECCENTRICITY_SQUARED: f64 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

pub const MAX_LATITUDE_DEG: f64 = 90.0;

pub const MAX_LONGITUDE_DEG: f64 = 180.0;

/// Real-world length of one grid unit (one block) in meters.
pub const DEFAULT_METERS_PER_UNIT: f64 = 1.0;

/// Upper bound on inverse-latitude refinement steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Latitude step, in degrees, below which the inverse solver stops.
pub const DEFAULT_TOLERANCE_DEG: f64 = 1e-10;
