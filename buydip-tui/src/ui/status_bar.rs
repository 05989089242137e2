//! Bottom status bar — key hints and view state.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    let spans = vec![
        Span::styled(" q:Quit  l:Labels  g:Grid  1-9:Toggle scenario", theme.hint()),
        Span::raw(" | "),
        Span::styled(
            format!(
                "labels {}  grid {}  showing {}/{}",
                on_off(app.show_labels),
                on_off(app.show_grid),
                app.visible_count(),
                app.chart.scenario_count(),
            ),
            theme.axis(),
        ),
    ];

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
