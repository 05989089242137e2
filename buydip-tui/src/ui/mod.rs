//! Top-level UI layout — chart, legend row, status bar.

pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::AppState;
use crate::panels::{LegendBar, ScenarioChartPanel};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let chart = ScenarioChartPanel::new(&app.chart, app.visibility(), &app.theme)
        .labels(app.show_labels)
        .grid(app.show_grid);
    f.render_widget(chart, chunks[0]);

    f.render_widget(
        LegendBar::new(&app.chart.legend, app.visibility(), &app.theme),
        chunks[1],
    );

    status_bar::render(f, chunks[2], app);
}
