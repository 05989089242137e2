//! Legend bar - one swatch per scenario with its toggle key.

use buydip_core::chart::LegendEntry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Legend bar widget
pub struct LegendBar<'a> {
    entries: &'a [LegendEntry],
    visible: &'a [bool],
    theme: &'a Theme,
}

impl<'a> LegendBar<'a> {
    pub fn new(entries: &'a [LegendEntry], visible: &'a [bool], theme: &'a Theme) -> Self {
        Self {
            entries,
            visible,
            theme,
        }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![
            Span::styled(" \u{2501}\u{2501} ", Style::default().fg(self.theme.decline)), // ━━
            Span::styled("decline  ", Style::default().fg(self.theme.text_secondary)),
        ];

        for entry in self.entries {
            let shown = self.visible.get(entry.scenario).copied().unwrap_or(true);
            let color = self.theme.series(entry.color);
            let (swatch, label) = if shown {
                (
                    Style::default().fg(color),
                    Style::default().fg(self.theme.text_primary),
                )
            } else {
                (
                    Style::default().fg(self.theme.faint(color)),
                    Style::default()
                        .fg(self.theme.muted)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            };

            // only 1-9 have a toggle key
            if entry.scenario < 9 {
                spans.push(Span::styled(
                    format!("[{}]", entry.scenario + 1),
                    Style::default().fg(self.theme.muted),
                ));
            }
            spans.push(Span::styled("\u{2501}\u{2501} ", swatch));
            spans.push(Span::styled(format!("{}  ", entry.label), label));
        }
        spans
    }
}

impl<'a> Widget for LegendBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(self.spans());
        Paragraph::new(line)
            .style(self.theme.surface())
            .render(area, buf);
    }
}
