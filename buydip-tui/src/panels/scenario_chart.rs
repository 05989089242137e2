//! Scenario chart panel - decline/recovery legs with buy annotations
//!
//! Displays, for every visible scenario:
//! - Decline leg (shared colour) and recovery leg (scenario colour)
//! - First buy, bottom, breakeven and final-value markers
//! - Faint dashed breakeven reference line
//! - Price/return annotations (toggleable)
//!
//! Lines go through a braille `Canvas`; markers and labels are printed as
//! text at data coordinates. Tick labels and axis titles are written to
//! the buffer around the canvas.

use buydip_core::chart::{DrawCommand, HAlign, LineStyle, VAlign};
use buydip_core::Chart;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Block, Borders, Widget,
    },
};

use crate::theme::{marker_glyph, Theme};

/// Columns reserved left of the plot for y tick labels.
const Y_LABEL_WIDTH: u16 = 7;
/// Row reserved above the plot for the y axis title.
const Y_TITLE_HEIGHT: u16 = 1;
/// Rows reserved below the plot: tick labels, then the x axis title.
const X_LABEL_HEIGHT: u16 = 2;
/// Dash + gap pairs across the full x range of a dashed line.
const DASH_COUNT: usize = 40;
const X_TICK_TARGET: usize = 7;
const Y_TICK_TARGET: usize = 6;

/// Scenario chart widget
pub struct ScenarioChartPanel<'a> {
    chart: &'a Chart,
    visible: &'a [bool],
    theme: &'a Theme,
    show_labels: bool,
    show_grid: bool,
}

impl<'a> ScenarioChartPanel<'a> {
    pub fn new(chart: &'a Chart, visible: &'a [bool], theme: &'a Theme) -> Self {
        Self {
            chart,
            visible,
            theme,
            show_labels: true,
            show_grid: true,
        }
    }

    pub fn labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    fn is_visible(&self, scenario: usize) -> bool {
        self.visible.get(scenario).copied().unwrap_or(true)
    }

    fn visible_commands(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.chart
            .elements
            .iter()
            .filter(move |e| self.is_visible(e.scenario))
            .map(|e| &e.command)
    }

    fn paint(&self, ctx: &mut Context, plot: Rect) {
        let [x_lo, x_hi] = self.chart.x_bounds;
        let [y_lo, y_hi] = self.chart.y_bounds;
        // Data units per terminal cell, matching the canvas label mapping.
        let cell_w = (x_hi - x_lo) / plot.width.saturating_sub(1).max(1) as f64;
        let cell_h = (y_hi - y_lo) / plot.height.saturating_sub(1).max(1) as f64;

        if self.show_grid {
            for x in nice_ticks(x_lo, x_hi, X_TICK_TARGET) {
                ctx.draw(&CanvasLine { x1: x, y1: y_lo, x2: x, y2: y_hi, color: self.theme.grid });
            }
            for y in nice_ticks(y_lo, y_hi, Y_TICK_TARGET) {
                ctx.draw(&CanvasLine { x1: x_lo, y1: y, x2: x_hi, y2: y, color: self.theme.grid });
            }
            ctx.layer();
        }

        for cmd in self.visible_commands() {
            match cmd {
                DrawCommand::Segment { from, to, color, style } => {
                    let color = self.theme.series(*color);
                    match style {
                        LineStyle::Solid => ctx.draw(&CanvasLine {
                            x1: from.x,
                            y1: from.y,
                            x2: to.x,
                            y2: to.y,
                            color,
                        }),
                        LineStyle::Dashed => {
                            draw_dashed(ctx, (from.x, from.y), (to.x, to.y), self.theme.faint(color))
                        }
                    }
                }
                DrawCommand::HLine { y, color, style } => {
                    let color = self.theme.series(*color);
                    match style {
                        LineStyle::Solid => ctx.draw(&CanvasLine {
                            x1: x_lo,
                            y1: *y,
                            x2: x_hi,
                            y2: *y,
                            color,
                        }),
                        LineStyle::Dashed => {
                            draw_dashed(ctx, (x_lo, *y), (x_hi, *y), self.theme.faint(color))
                        }
                    }
                }
                DrawCommand::Marker { .. } | DrawCommand::Label { .. } => {}
            }
        }
        ctx.layer();

        for cmd in self.visible_commands() {
            match cmd {
                DrawCommand::Marker { at, shape, color } => {
                    let style = Style::default().fg(self.theme.series(*color));
                    ctx.print(at.x, at.y, Span::styled(marker_glyph(*shape), style));
                }
                DrawCommand::Label { at, lines, color, h_align, v_align } if self.show_labels => {
                    let style = Style::default().fg(self.theme.series(*color));
                    let n = lines.len() as f64;
                    for (i, text) in lines.iter().enumerate() {
                        let row_offset = match v_align {
                            VAlign::Baseline => n - 1.0 - i as f64,
                            VAlign::Center => (n - 1.0) / 2.0 - i as f64,
                        };
                        let x = match h_align {
                            HAlign::Left => at.x,
                            HAlign::Center => at.x - (text.chars().count() as f64 / 2.0) * cell_w,
                        };
                        let y = at.y + row_offset * cell_h;
                        ctx.print(x, y, Line::from(Span::styled(text.clone(), style)));
                    }
                }
                _ => {}
            }
        }
    }
}

impl<'a> Widget for ScenarioChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.chart.title))
            .title_style(self.theme.title())
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .style(self.theme.surface());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width <= Y_LABEL_WIDTH + 4 || inner.height <= Y_TITLE_HEIGHT + X_LABEL_HEIGHT + 2 {
            return;
        }

        let plot = Rect::new(
            inner.x + Y_LABEL_WIDTH,
            inner.y + Y_TITLE_HEIGHT,
            inner.width - Y_LABEL_WIDTH,
            inner.height - Y_TITLE_HEIGHT - X_LABEL_HEIGHT,
        );

        let [x_lo, x_hi] = self.chart.x_bounds;
        let [y_lo, y_hi] = self.chart.y_bounds;

        Canvas::default()
            .x_bounds(self.chart.x_bounds)
            .y_bounds(self.chart.y_bounds)
            .marker(Marker::Braille)
            .background_color(self.theme.background)
            .paint(|ctx| self.paint(ctx, plot))
            .render(plot, buf);

        let axis = self.theme.axis();

        // Y tick labels, right-aligned against the plot.
        for v in nice_ticks(y_lo, y_hi, Y_TICK_TARGET) {
            let frac = (y_hi - v) / (y_hi - y_lo);
            let row = plot.y + (frac * plot.height.saturating_sub(1) as f64).round() as u16;
            let text = format!("{v:.0}");
            let width = text.chars().count() as u16;
            if row < plot.bottom() && width < Y_LABEL_WIDTH {
                buf.set_string(plot.x - width - 1, row, &text, axis);
            }
        }

        // X tick labels under the plot.
        let tick_row = plot.bottom();
        for v in nice_ticks(x_lo, x_hi, X_TICK_TARGET) {
            let frac = (v - x_lo) / (x_hi - x_lo);
            let col = plot.x + (frac * plot.width.saturating_sub(1) as f64).round() as u16;
            let text = format!("{v:.0}");
            let width = text.chars().count() as u16;
            let col = col.saturating_sub(width / 2).max(plot.x);
            if col + width <= inner.right() {
                buf.set_string(col, tick_row, &text, axis);
            }
        }

        // Axis titles.
        buf.set_string(inner.x, inner.y, &self.chart.y_label, axis);
        let x_title_width = self.chart.x_label.chars().count() as u16;
        let x_title_col = plot.x + plot.width.saturating_sub(x_title_width) / 2;
        buf.set_string(x_title_col, tick_row + 1, &self.chart.x_label, axis);
    }
}

fn draw_dashed(ctx: &mut Context, from: (f64, f64), to: (f64, f64), color: ratatui::style::Color) {
    let segments = DASH_COUNT * 2;
    let dx = (to.0 - from.0) / segments as f64;
    let dy = (to.1 - from.1) / segments as f64;
    for k in (0..segments).step_by(2) {
        let k = k as f64;
        ctx.draw(&CanvasLine {
            x1: from.0 + dx * k,
            y1: from.1 + dy * k,
            x2: from.0 + dx * (k + 1.0),
            y2: from.1 + dy * (k + 1.0),
            color,
        });
    }
}

/// Round tick positions (steps of 1, 2 or 5 × 10ⁿ) covering `[lo, hi]`,
/// roughly `target` of them.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(hi > lo) || !lo.is_finite() || !hi.is_finite() || target == 0 {
        return Vec::new();
    }
    let raw = (hi - lo) / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let step = magnitude
        * if norm <= 1.0 {
            1.0
        } else if norm <= 2.0 {
            2.0
        } else if norm <= 5.0 {
            5.0
        } else {
            10.0
        };
    let first = (lo / step).ceil() * step;
    let eps = step * 1e-9;
    (0..)
        .map(|i| first + step * i as f64)
        .take_while(|v| *v <= hi + eps)
        .collect()
}
