//! Per-pullback scenario: decline geometry, buy schedule, cost basis, return.
//!
//! A scenario is a pure function of the config and one pullback fraction.
//! The price path is two straight legs: a decline at the drop angle from the
//! peak to the bottom, then a recovery at the rise angle back to the peak
//! price. One unit is bought at each of `num_buys` evenly spaced prices from
//! halfway down the decline to the bottom.

use serde::{Deserialize, Serialize};

use crate::config::{validate_fraction, SimulationConfig};
use crate::error::DomainError;
use crate::geometry::{linspace, Point};

/// Shares bought at each buy event.
const UNITS_PER_BUY: f64 = 1.0;

/// Where buying starts, as a fraction of the total dip below the peak.
const BUY_START_DEPTH: f64 = 0.5;

/// Everything derived for one pullback depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub pullback_fraction: f64,
    /// Bottom of the decline.
    pub turn_point: Point,
    /// End of the recovery leg, back at the peak price.
    pub end_point: Point,
    /// Buy prices from halfway down to the bottom (non-increasing).
    pub buy_prices: Vec<f64>,
    /// Position of each buy on the decline leg, same order as `buy_prices`.
    pub buy_points: Vec<Point>,
    pub total_shares: f64,
    pub total_cost: f64,
    pub avg_cost: f64,
    /// Point on the recovery leg where price equals `avg_cost`.
    pub breakeven_point: Point,
    /// Value of all shares at the peak price.
    pub final_value: f64,
    pub return_pct: f64,
}

impl ScenarioResult {
    /// Pullback as a whole percentage, e.g. `10` for 0.1.
    pub fn pullback_pct(&self) -> i64 {
        // round: 0.3 * 100 is 30.000000000000004 but 0.29 * 100 is 28.999999999999996
        (self.pullback_fraction * 100.0).round() as i64
    }

    pub fn first_buy(&self) -> Option<Point> {
        self.buy_points.first().copied()
    }

    /// Vertical depth of the dip.
    pub fn dip_amount(&self, start: Point) -> f64 {
        start.y - self.turn_point.y
    }
}

/// Compute the scenario for one pullback fraction.
///
/// Validates the config geometry and the fraction first; a degenerate input
/// returns a [`DomainError`] and nothing is computed.
pub fn compute_scenario(
    config: &SimulationConfig,
    pullback_fraction: f64,
) -> Result<ScenarioResult, DomainError> {
    config.validate_geometry()?;
    validate_fraction(pullback_fraction)?;

    let start = config.start_point;
    let drop = config.drop_heading();
    let rise = config.rise_heading();

    // Decline leg: walk the hypotenuse until the vertical drop is reached.
    let vertical_drop = start.y * pullback_fraction;
    let hypotenuse = vertical_drop / drop.sin.abs();
    // sin < 0 is validated, so sin * hypotenuse equals -vertical_drop;
    // subtracting directly keeps the bottom free of rounding noise.
    let turn_point = Point::new(start.x + drop.cos * hypotenuse, start.y - vertical_drop);

    // Recovery leg back to the peak price.
    let dip_amount = start.y - turn_point.y;
    let end_point = Point::new(turn_point.x + rise.run_for_rise(dip_amount), start.y);

    let buy_start = start.y - BUY_START_DEPTH * dip_amount;
    let buy_prices = linspace(buy_start, turn_point.y, config.num_buys);
    let buy_points = buy_prices
        .iter()
        .map(|&price| Point::new(start.x + drop.run_for_rise(price - start.y), price))
        .collect();

    let total_shares = UNITS_PER_BUY * buy_prices.len() as f64;
    let total_cost: f64 = buy_prices.iter().map(|p| p * UNITS_PER_BUY).sum();
    let avg_cost = total_cost / total_shares;

    let breakeven_point = Point::new(
        turn_point.x + rise.run_for_rise(avg_cost - turn_point.y),
        avg_cost,
    );

    let final_value = total_shares * start.y;
    let return_pct = (final_value - total_cost) / total_cost * 100.0;

    tracing::debug!(
        pullback = pullback_fraction,
        bottom = turn_point.y,
        avg_cost,
        return_pct,
        "computed scenario"
    );

    Ok(ScenarioResult {
        pullback_fraction,
        turn_point,
        end_point,
        buy_prices,
        buy_points,
        total_shares,
        total_cost,
        avg_cost,
        breakeven_point,
        final_value,
        return_pct,
    })
}

/// Compute every configured scenario, in list order.
pub fn summarize(config: &SimulationConfig) -> Result<Vec<ScenarioResult>, DomainError> {
    config
        .pullback_fractions
        .iter()
        .map(|&fraction| compute_scenario(config, fraction))
        .collect()
}
