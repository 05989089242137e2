//! Chart widgets.

pub mod legend;
pub mod scenario_chart;

pub use legend::LegendBar;
pub use scenario_chart::ScenarioChartPanel;
