//! Application state — single-owner, main-thread only.

use buydip_core::Chart;

use crate::theme::Theme;

/// Everything the draw loop needs: the composed chart plus view toggles.
#[derive(Debug, Clone)]
pub struct AppState {
    pub chart: Chart,
    pub theme: Theme,
    pub running: bool,
    pub show_labels: bool,
    pub show_grid: bool,
    /// Per-scenario visibility, indexed like `chart.legend`.
    visible: Vec<bool>,
}

impl AppState {
    pub fn new(chart: Chart) -> Self {
        let visible = vec![true; chart.scenario_count()];
        Self {
            chart,
            theme: Theme::default(),
            running: true,
            show_labels: true,
            show_grid: true,
            visible,
        }
    }

    pub fn is_visible(&self, scenario: usize) -> bool {
        self.visible.get(scenario).copied().unwrap_or(false)
    }

    /// Flip one scenario's visibility. Out-of-range indices are ignored.
    pub fn toggle_scenario(&mut self, scenario: usize) {
        if let Some(v) = self.visible.get_mut(scenario) {
            *v = !*v;
        }
    }

    pub fn visibility(&self) -> &[bool] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
