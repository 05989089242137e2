//! Chart composition — an explicit draw-command accumulator.
//!
//! [`compose`] creates one [`Chart`], passes it to [`draw_scenario`] for each
//! pullback in list order, and returns it. Nothing is drawn here: a display
//! backend walks `elements` once and maps each command onto its own
//! primitives. Commands are in data coordinates (x = time, y = price).

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::DomainError;
use crate::geometry::Point;
use crate::scenario::{compute_scenario, ScenarioResult};

pub const TITLE: &str = "BuyDip Strategy - Fixed Shares Per Buy";
pub const X_LABEL: &str = "Time";
pub const Y_LABEL: &str = "Price";

/// Scenario colours, assigned by position and cycled past the third.
pub const PALETTE: [SeriesColor; 3] = [SeriesColor::Green, SeriesColor::Gold, SeriesColor::Red];

// Annotation offsets, in data units.
const FIRST_BUY_LABEL_DX: f64 = -16.0;
const BOTTOM_LABEL_DY: f64 = -10.0;
const BREAKEVEN_LABEL_DX: f64 = 8.0;
const FINAL_LABEL_DY: f64 = 4.0;
const RETURN_LABEL_DX: f64 = 8.0;

/// Logical colour of a draw command. Backends pick the concrete shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesColor {
    /// Shared colour of every decline leg.
    Neutral,
    Green,
    Gold,
    Red,
}

/// Colour for the scenario at `index`.
pub fn palette_color(index: usize) -> SeriesColor {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    /// First buy.
    Circle,
    /// Bottom of the decline.
    Cross,
    /// Breakeven.
    Square,
    /// Final value.
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    /// Faint dashed reference line.
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    /// Last line sits on the anchor, earlier lines stack above it.
    Baseline,
    /// Lines are centred vertically on the anchor.
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Segment {
        from: Point,
        to: Point,
        color: SeriesColor,
        style: LineStyle,
    },
    /// Horizontal line across the full x range.
    HLine {
        y: f64,
        color: SeriesColor,
        style: LineStyle,
    },
    Marker {
        at: Point,
        shape: MarkerShape,
        color: SeriesColor,
    },
    Label {
        at: Point,
        lines: Vec<String>,
        color: SeriesColor,
        h_align: HAlign,
        v_align: VAlign,
    },
}

impl DrawCommand {
    pub fn is_label(&self) -> bool {
        matches!(self, DrawCommand::Label { .. })
    }
}

/// A draw command tagged with the scenario that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub scenario: usize,
    pub command: DrawCommand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub scenario: usize,
    pub label: String,
    pub color: SeriesColor,
}

/// The chart context: axes, bounds, accumulated commands and legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub elements: Vec<Element>,
    pub legend: Vec<LegendEntry>,
}

impl Chart {
    pub fn new(x_bounds: [f64; 2], y_bounds: [f64; 2]) -> Self {
        Self {
            title: TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            x_bounds,
            y_bounds,
            elements: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub fn push(&mut self, scenario: usize, command: DrawCommand) {
        self.elements.push(Element { scenario, command });
    }

    pub fn scenario_count(&self) -> usize {
        self.legend.len()
    }

    /// Commands belonging to one scenario, in draw order.
    pub fn scenario_elements(&self, scenario: usize) -> impl Iterator<Item = &DrawCommand> {
        self.elements
            .iter()
            .filter(move |e| e.scenario == scenario)
            .map(|e| &e.command)
    }
}

/// Build the full chart for every configured pullback.
pub fn compose(config: &SimulationConfig) -> Result<Chart, DomainError> {
    config.validate()?;

    let start = config.start_point;
    let mut chart = Chart::new(config.view.x_bounds(start), config.view.y_bounds(start));

    if config.pullback_fractions.len() > PALETTE.len() {
        tracing::warn!(
            scenarios = config.pullback_fractions.len(),
            palette = PALETTE.len(),
            "more scenarios than palette colours, colours will repeat"
        );
    }

    for (index, &fraction) in config.pullback_fractions.iter().enumerate() {
        let result = compute_scenario(config, fraction)?;
        draw_scenario(&mut chart, index, start, &result);
    }

    tracing::info!(
        scenarios = chart.scenario_count(),
        elements = chart.elements.len(),
        "composed chart"
    );
    Ok(chart)
}

/// Append one scenario's legs, markers and annotations to `chart`.
pub fn draw_scenario(chart: &mut Chart, index: usize, start: Point, result: &ScenarioResult) {
    let color = palette_color(index);
    let turn = result.turn_point;
    let end = result.end_point;

    chart.legend.push(LegendEntry {
        scenario: index,
        label: format!("{}% Pullback", result.pullback_pct()),
        color,
    });

    chart.push(
        index,
        DrawCommand::Segment {
            from: start,
            to: turn,
            color: SeriesColor::Neutral,
            style: LineStyle::Solid,
        },
    );
    chart.push(
        index,
        DrawCommand::Segment {
            from: turn,
            to: end,
            color,
            style: LineStyle::Solid,
        },
    );

    if let Some(first) = result.first_buy() {
        chart.push(index, marker(first, MarkerShape::Circle, color));
        chart.push(
            index,
            label(
                Point::new(first.x + FIRST_BUY_LABEL_DX, first.y),
                ["1st Buy".to_string(), dollars(first.y)],
                color,
                HAlign::Center,
                VAlign::Baseline,
            ),
        );
    }

    chart.push(index, marker(turn, MarkerShape::Cross, color));
    chart.push(
        index,
        label(
            Point::new(turn.x, turn.y + BOTTOM_LABEL_DY),
            ["Bottom".to_string(), dollars(turn.y)],
            color,
            HAlign::Center,
            VAlign::Baseline,
        ),
    );

    let breakeven = result.breakeven_point;
    chart.push(
        index,
        DrawCommand::HLine {
            y: breakeven.y,
            color,
            style: LineStyle::Dashed,
        },
    );
    chart.push(index, marker(breakeven, MarkerShape::Square, color));
    chart.push(
        index,
        label(
            Point::new(breakeven.x + BREAKEVEN_LABEL_DX, breakeven.y),
            ["Breakeven".to_string(), dollars(breakeven.y)],
            color,
            HAlign::Left,
            VAlign::Center,
        ),
    );

    chart.push(index, marker(end, MarkerShape::Diamond, color));
    chart.push(
        index,
        label(
            Point::new(end.x, end.y + FINAL_LABEL_DY),
            ["Final".to_string(), dollars(result.final_value)],
            color,
            HAlign::Center,
            VAlign::Baseline,
        ),
    );
    chart.push(
        index,
        label(
            Point::new(end.x + RETURN_LABEL_DX, end.y),
            ["Return".to_string(), format!("{:.1}%", result.return_pct)],
            color,
            HAlign::Left,
            VAlign::Center,
        ),
    );
}

/// Dollar amount truncated toward zero, e.g. `$277` for 277.5.
pub fn dollars(value: f64) -> String {
    format!("${}", value.trunc() as i64)
}

fn marker(at: Point, shape: MarkerShape, color: SeriesColor) -> DrawCommand {
    DrawCommand::Marker { at, shape, color }
}

fn label(
    at: Point,
    lines: [String; 2],
    color: SeriesColor,
    h_align: HAlign,
    v_align: VAlign,
) -> DrawCommand {
    DrawCommand::Label {
        at,
        lines: lines.into(),
        color,
        h_align,
        v_align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn label_texts(chart: &Chart, scenario: usize) -> Vec<String> {
        chart
            .scenario_elements(scenario)
            .filter_map(|c| match c {
                DrawCommand::Label { lines, .. } => Some(lines.join(" ")),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_compose_default() {
        let chart = compose(&SimulationConfig::default()).unwrap();
        assert_eq!(chart.title, TITLE);
        assert_eq!(chart.scenario_count(), 3);
        assert_eq!(chart.x_bounds, [50.0, 400.0]);
        let labels: Vec<&str> = chart.legend.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["10% Pullback", "20% Pullback", "30% Pullback"]);
    }

    #[test]
    fn test_scenario_annotations() {
        let chart = compose(&SimulationConfig::default()).unwrap();
        let texts = label_texts(&chart, 0);
        assert_eq!(
            texts,
            vec![
                "1st Buy $285",
                "Bottom $270",
                "Breakeven $277",
                "Final $3000",
                "Return 8.1%",
            ]
        );
    }

    #[test]
    fn test_each_scenario_draws_same_shapes() {
        let chart = compose(&SimulationConfig::default()).unwrap();
        for s in 0..3 {
            let cmds: Vec<&DrawCommand> = chart.scenario_elements(s).collect();
            assert_eq!(cmds.len(), 12);
            let markers = cmds
                .iter()
                .filter(|c| matches!(c, DrawCommand::Marker { .. }))
                .count();
            assert_eq!(markers, 4);
            let dashed = cmds
                .iter()
                .filter(|c| matches!(c, DrawCommand::HLine { style: LineStyle::Dashed, .. }))
                .count();
            assert_eq!(dashed, 1);
        }
    }

    #[test]
    fn test_decline_is_neutral_recovery_is_scenario_colour() {
        let chart = compose(&SimulationConfig::default()).unwrap();
        let segs: Vec<SeriesColor> = chart
            .scenario_elements(2)
            .filter_map(|c| match c {
                DrawCommand::Segment { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(segs, vec![SeriesColor::Neutral, SeriesColor::Red]);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), SeriesColor::Green);
        assert_eq!(palette_color(3), SeriesColor::Green);
        assert_eq!(palette_color(4), SeriesColor::Gold);

        let config = SimulationConfig {
            pullback_fractions: vec![0.05, 0.1, 0.15, 0.2, 0.25],
            ..Default::default()
        };
        let chart = compose(&config).unwrap();
        let colors: Vec<SeriesColor> = chart.legend.iter().map(|l| l.color).collect();
        assert_eq!(
            colors,
            vec![
                SeriesColor::Green,
                SeriesColor::Gold,
                SeriesColor::Red,
                SeriesColor::Green,
                SeriesColor::Gold,
            ]
        );
    }

    #[test]
    fn test_bounds_scale_with_peak() {
        let config = SimulationConfig { start_point: Point::new(0.0, 150.0), ..Default::default() };
        let chart = compose(&config).unwrap();
        assert_eq!(chart.x_bounds, [-50.0, 300.0]);
        assert_relative_eq!(chart.y_bounds[0], 100.0, epsilon = 1e-9);
        assert_relative_eq!(chart.y_bounds[1], 160.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compose_rejects_degenerate() {
        let config = SimulationConfig { drop_angle_deg: -180.0, ..Default::default() };
        assert_eq!(compose(&config), Err(DomainError::DegenerateDropAngle(-180.0)));
    }

    #[test]
    fn test_compose_empty_pullbacks() {
        let config = SimulationConfig { pullback_fractions: vec![], ..Default::default() };
        let chart = compose(&config).unwrap();
        assert!(chart.elements.is_empty());
        assert!(chart.legend.is_empty());
    }

    #[test]
    fn test_dollars_truncates() {
        assert_eq!(dollars(277.5), "$277");
        assert_eq!(dollars(269.9999), "$269");
        assert_eq!(dollars(3000.0), "$3000");
    }
}
