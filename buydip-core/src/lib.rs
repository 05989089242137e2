//! BuyDip Core — scenario geometry, cost basis metrics, chart composition.
//!
//! This crate contains everything that is not terminal I/O:
//! - Simulation config with TOML loading and strict validation
//! - Two-leg price path (decline at the drop angle, recovery at the rise angle)
//! - Evenly spaced dip buys, average cost, breakeven and final return
//! - Chart composition into an explicit list of draw commands

pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod scenario;

pub use chart::{compose, draw_scenario, Chart, DrawCommand, SeriesColor};
pub use config::{SimulationConfig, ViewConfig};
pub use error::{ConfigError, DomainError};
pub use geometry::Point;
pub use scenario::{compute_scenario, summarize, ScenarioResult};
