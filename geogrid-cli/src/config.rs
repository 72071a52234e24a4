//! Run configuration, parsed from a TOML file.
//!
//! Every section is optional; anything left out falls back to [`AppConfig::default`].
//!
//! ```toml
//! [base_point.latlng]
//! latitude = 36.138755
//! longitude = 139.388908
//!
//! [base_point.grid]
//! x = -559.0
//! y = -395.0
//!
//! [grid]
//! meters_per_unit = 1.0
//! north = "positive-y"
//!
//! [solver]
//! max_iterations = 10
//! tolerance_deg = 1e-10
//! ```
//!
//! `base_point` must give both `latlng` and `grid` when present.

use geogrid_core::constants::DEFAULT_METERS_PER_UNIT;
use geogrid_core::{BasePoint, Converter, GridError, GridPoint, LatLng, NorthAxis, SolverConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in anchor used when no config file names one.
pub const DEFAULT_BASE_POINT: BasePoint = BasePoint {
    latlng: LatLng {
        latitude: 36.138755,
        longitude: 139.388908,
    },
    grid: GridPoint::new(-559.0, -395.0),
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_point: BasePoint,
    pub grid: GridSection,
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSection {
    pub meters_per_unit: f64,
    pub north: NorthAxis,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            meters_per_unit: DEFAULT_METERS_PER_UNIT,
            north: NorthAxis::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_point: DEFAULT_BASE_POINT,
            grid: GridSection::default(),
            solver: SolverConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] GridError),
}

impl AppConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(mut self, meters_per_unit: Option<f64>, north: Option<NorthAxis>) -> Self {
        if let Some(m) = meters_per_unit {
            self.grid.meters_per_unit = m;
        }
        if let Some(n) = north {
            self.grid.north = n;
        }
        self
    }

    pub fn validate(&self) -> Result<(), GridError> {
        self.base_point.validate()?;
        self.converter().validate()
    }

    pub fn converter(&self) -> Converter {
        Converter::default()
            .with_meters_per_unit(self.grid.meters_per_unit)
            .with_north(self.grid.north)
            .with_solver(self.solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
            [base_point.latlng]
            latitude = 35.0
            longitude = 135.0

            [base_point.grid]
            x = 100.0
            y = -200.0

            [grid]
            meters_per_unit = 2.0
            north = "negative-y"

            [solver]
            max_iterations = 6
            tolerance_deg = 1e-9
            "#,
        )
        .unwrap();

        assert_eq!(config.base_point.latlng.latitude, 35.0);
        assert_eq!(config.base_point.grid, GridPoint::new(100.0, -200.0));
        assert_eq!(config.grid.meters_per_unit, 2.0);
        assert_eq!(config.grid.north, NorthAxis::NegativeY);
        assert_eq!(config.solver, SolverConfig::new(6, 1e-9));
    }

    #[test]
    fn test_partial_solver_section_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[solver]\nmax_iterations = 3\n").unwrap();
        assert_eq!(config.solver.max_iterations, 3);
        assert_eq!(
            config.solver.tolerance_deg,
            SolverConfig::default().tolerance_deg
        );
        assert_eq!(config.base_point, DEFAULT_BASE_POINT);
    }

    #[test]
    fn test_base_point_needs_both_halves() {
        let result = AppConfig::from_toml_str(
            "[base_point.latlng]\nlatitude = 35.0\nlongitude = 135.0\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_north_value_is_rejected() {
        assert!(AppConfig::from_toml_str("[grid]\nnorth = \"up\"\n").is_err());
    }

    #[test]
    fn test_validation_catches_bad_values() {
        let mut config = AppConfig::default();
        config.grid.meters_per_unit = -1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.base_point.latlng.latitude = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::default().with_overrides(Some(0.5), Some(NorthAxis::NegativeY));
        let converter = config.converter();
        assert_eq!(converter.meters_per_unit, 0.5);
        assert_eq!(converter.north, NorthAxis::NegativeY);

        let untouched = AppConfig::default().with_overrides(None, None);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/geogrid.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("geogrid.toml"));
    }
}
