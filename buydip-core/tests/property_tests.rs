//! Property tests for scenario invariants.
//!
//! Uses proptest to verify, across peaks, angles, depths and buy counts:
//! 1. Drop depth — the bottom sits exactly `fraction` below the peak
//! 2. Recovery — the end point returns to the peak price
//! 3. Cost basis — average cost lies between the bottom and the first buy
//! 4. Return identity — return_pct matches the closed form
//! 5. Purity — identical inputs give identical outputs

use approx::relative_eq;
use buydip_core::{compute_scenario, Point, SimulationConfig};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_peak() -> impl Strategy<Value = f64> {
    10.0..10_000.0_f64
}

fn arb_fraction() -> impl Strategy<Value = f64> {
    0.001..0.999_f64
}

/// Downward drop angles that stay clear of -90° and -180°/0°.
fn arb_drop_angle() -> impl Strategy<Value = f64> {
    prop_oneof![-89.0..-1.0_f64, -179.0..-91.0_f64]
}

/// Rise angles clear of the axes.
fn arb_rise_angle() -> impl Strategy<Value = f64> {
    prop_oneof![1.0..89.0_f64, 91.0..179.0_f64]
}

fn arb_config() -> impl Strategy<Value = SimulationConfig> {
    (arb_peak(), -500.0..500.0_f64, arb_drop_angle(), arb_rise_angle(), 1usize..50).prop_map(
        |(peak, x, drop, rise, num_buys)| SimulationConfig {
            start_point: Point::new(x, peak),
            drop_angle_deg: drop,
            rise_angle_deg: rise,
            num_buys,
            ..Default::default()
        },
    )
}

fn close(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = 1e-9, max_relative = 1e-9)
}

proptest! {
    #[test]
    fn bottom_matches_requested_depth(config in arb_config(), f in arb_fraction()) {
        let r = compute_scenario(&config, f).unwrap();
        let start = config.start_point;
        prop_assert!(close(r.turn_point.y, start.y - start.y * f));
        prop_assert!(r.turn_point.y < start.y);
    }

    #[test]
    fn recovery_returns_to_peak(config in arb_config(), f in arb_fraction()) {
        let r = compute_scenario(&config, f).unwrap();
        prop_assert_eq!(r.end_point.y, config.start_point.y);
    }

    #[test]
    fn avg_cost_within_buy_range(config in arb_config(), f in arb_fraction()) {
        let r = compute_scenario(&config, f).unwrap();
        let start = config.start_point;
        let upper = start.y - 0.5 * (start.y - r.turn_point.y);
        let tol = 1e-9 * start.y;
        prop_assert!(r.avg_cost >= r.turn_point.y - tol);
        prop_assert!(r.avg_cost <= upper + tol);
    }

    #[test]
    fn buy_prices_non_increasing(config in arb_config(), f in arb_fraction()) {
        let r = compute_scenario(&config, f).unwrap();
        prop_assert_eq!(r.buy_prices.len(), config.num_buys);
        prop_assert!(r.buy_prices.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn return_identity(config in arb_config(), f in arb_fraction()) {
        let r = compute_scenario(&config, f).unwrap();
        let total_cost: f64 = r.buy_prices.iter().sum();
        let expected =
            (config.num_buys as f64 * config.start_point.y - total_cost) / total_cost * 100.0;
        prop_assert_eq!(r.total_cost, total_cost);
        prop_assert_eq!(r.return_pct, expected);
    }

    #[test]
    fn breakeven_lies_on_recovery_leg(config in arb_config(), f in arb_fraction()) {
        let r = compute_scenario(&config, f).unwrap();
        let rise_tan = config.rise_angle_deg.to_radians().tan();
        let slope = (r.breakeven_point.y - r.turn_point.y) / (r.breakeven_point.x - r.turn_point.x);
        // single buy at the bottom puts breakeven on the turn point itself
        if r.breakeven_point.x != r.turn_point.x {
            prop_assert!(relative_eq!(slope, rise_tan, max_relative = 1e-6));
        }
    }

    #[test]
    fn pure_function(config in arb_config(), f in arb_fraction()) {
        let a = compute_scenario(&config, f).unwrap();
        let b = compute_scenario(&config, f).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn tiny_pullback_converges_to_start() {
    let config = SimulationConfig::default();
    let r = compute_scenario(&config, 1e-9).unwrap();
    assert!((r.turn_point.x - config.start_point.x).abs() < 1e-6);
    assert!((r.turn_point.y - config.start_point.y).abs() < 1e-6);
}
