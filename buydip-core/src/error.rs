//! Error types for configuration loading and scenario geometry.

use std::path::PathBuf;

/// A configuration or input that would make the scenario geometry undefined.
///
/// Every variant corresponds to a division by zero, a NaN, or a decline leg
/// that does not actually decline. Validation happens before any arithmetic,
/// so no partial result is ever produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("drop angle {0}° is a multiple of 90° (slope undefined)")]
    DegenerateDropAngle(f64),
    #[error("drop angle {0}° does not point downward (sin must be negative)")]
    DropAngleNotDescending(f64),
    #[error("rise angle {0}° is a multiple of 90° (slope undefined)")]
    DegenerateRiseAngle(f64),
    #[error("peak price must be positive, got {0}")]
    NonPositivePeak(f64),
    #[error("pullback fraction {0} is outside (0, 1)")]
    PullbackOutOfRange(f64),
    #[error("num_buys must be at least 1")]
    ZeroBuys,
    #[error("view {name} is invalid, got {value}")]
    InvalidView { name: &'static str, value: f64 },
}

/// Errors raised while loading a [`SimulationConfig`](crate::config::SimulationConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Domain(#[from] DomainError),
}
