//! Simulation configuration — peak, slopes, pullback depths, buy count.
//!
//! Loaded from TOML; every key is optional and falls back to the defaults
//! below. Validation is strict: a config that would make the geometry
//! undefined is rejected before anything is computed.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, DomainError};
use crate::geometry::{Heading, Point};

const DEFAULT_START: Point = Point::new(100.0, 300.0);

/// Immutable input for a single run of the visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Angle of the decline leg in degrees (negative points down).
    pub drop_angle_deg: f64,
    /// Angle of the recovery leg in degrees.
    pub rise_angle_deg: f64,
    /// One scenario per entry, each in (0, 1).
    pub pullback_fractions: Vec<f64>,
    /// Evenly spaced purchases per scenario.
    pub num_buys: usize,
    /// Time zero and peak price.
    #[serde(deserialize_with = "deserialize_start_point")]
    pub start_point: Point,
    /// Chart viewport.
    pub view: ViewConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            drop_angle_deg: -75.0,
            rise_angle_deg: 45.0,
            pullback_fractions: vec![0.1, 0.2, 0.3],
            num_buys: 10,
            start_point: DEFAULT_START,
            view: ViewConfig::default(),
        }
    }
}

/// Axis bounds, expressed relative to the start point so the chart scales
/// with any peak price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Time units shown before the start point.
    pub x_before: f64,
    /// Time units shown after the start point.
    pub x_after: f64,
    /// Fraction of the peak price below the peak where the y axis starts.
    pub y_floor_depth: f64,
    /// Fraction of the peak price above the peak where the y axis ends.
    pub y_headroom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        // 300 peak -> y in [200, 320]
        Self {
            x_before: 50.0,
            x_after: 300.0,
            y_floor_depth: 1.0 / 3.0,
            y_headroom: 1.0 / 15.0,
        }
    }
}

impl ViewConfig {
    pub fn x_bounds(&self, start: Point) -> [f64; 2] {
        [start.x - self.x_before, start.x + self.x_after]
    }

    pub fn y_bounds(&self, start: Point) -> [f64; 2] {
        [
            start.y - start.y * self.y_floor_depth,
            start.y + start.y * self.y_headroom,
        ]
    }

    /// Both axis ranges must be finite and non-empty for any positive peak.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("x_before", self.x_before),
            ("x_after", self.x_after),
            ("y_floor_depth", self.y_floor_depth),
            ("y_headroom", self.y_headroom),
        ] {
            if !value.is_finite() {
                return Err(DomainError::InvalidView { name, value });
            }
        }
        let x_span = self.x_before + self.x_after;
        if x_span <= 0.0 {
            return Err(DomainError::InvalidView { name: "x_before + x_after", value: x_span });
        }
        let y_span = self.y_floor_depth + self.y_headroom;
        if y_span <= 0.0 {
            return Err(DomainError::InvalidView {
                name: "y_floor_depth + y_headroom",
                value: y_span,
            });
        }
        Ok(())
    }
}

/// `[start_point]` as written in TOML; either coordinate may be omitted.
#[derive(Deserialize)]
#[serde(default)]
struct StartPointTable {
    x: f64,
    y: f64,
}

impl Default for StartPointTable {
    fn default() -> Self {
        Self {
            x: DEFAULT_START.x,
            y: DEFAULT_START.y,
        }
    }
}

fn deserialize_start_point<'de, D>(deserializer: D) -> Result<Point, D::Error>
where
    D: Deserializer<'de>,
{
    let table = StartPointTable::deserialize(deserializer)?;
    Ok(Point::new(table.x, table.y))
}

impl SimulationConfig {
    /// Load a config from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), scenarios = config.pullback_fractions.len(), "loaded config");
        Ok(config)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render this config as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn drop_heading(&self) -> Heading {
        Heading::from_degrees(self.drop_angle_deg)
    }

    pub fn rise_heading(&self) -> Heading {
        Heading::from_degrees(self.rise_angle_deg)
    }

    /// Check everything except the individual pullback fractions.
    pub fn validate_geometry(&self) -> Result<(), DomainError> {
        check_finite("start_point.x", self.start_point.x)?;
        check_finite("start_point.y", self.start_point.y)?;
        check_finite("drop_angle_deg", self.drop_angle_deg)?;
        check_finite("rise_angle_deg", self.rise_angle_deg)?;

        if self.start_point.y <= 0.0 {
            return Err(DomainError::NonPositivePeak(self.start_point.y));
        }

        let drop = self.drop_heading();
        if drop.is_axis_aligned() {
            return Err(DomainError::DegenerateDropAngle(self.drop_angle_deg));
        }
        if drop.sin >= 0.0 {
            return Err(DomainError::DropAngleNotDescending(self.drop_angle_deg));
        }
        if self.rise_heading().is_axis_aligned() {
            return Err(DomainError::DegenerateRiseAngle(self.rise_angle_deg));
        }
        if self.num_buys == 0 {
            return Err(DomainError::ZeroBuys);
        }
        self.view.validate()
    }

    /// Full validation: geometry plus every configured pullback fraction.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.validate_geometry()?;
        self.pullback_fractions
            .iter()
            .try_for_each(|&f| validate_fraction(f))
    }
}

pub(crate) fn validate_fraction(fraction: f64) -> Result<(), DomainError> {
    if fraction.is_finite() && fraction > 0.0 && fraction < 1.0 {
        Ok(())
    } else {
        Err(DomainError::PullbackOutOfRange(fraction))
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { name, value })
    }
}
