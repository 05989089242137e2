//! Parrot/neon theme tokens for the BuyDip chart
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (title, focus)
//! - **Decline**: Steel blue (every decline leg)
//! - **Scenarios**: Neon green, gold, hot red (recovery legs and annotations)
//! - **Grid**: Dim charcoal (reference grid)
//! - **Muted**: Slate (axis ticks, secondary text)

use buydip_core::chart::MarkerShape;
use buydip_core::SeriesColor;
use ratatui::style::{Color, Modifier, Style};

/// Opacity of dashed reference lines, blended toward the background.
const FAINT_ALPHA: f64 = 0.3;

/// Parrot/neon theme for the BuyDip TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (title, highlights)
    pub accent: Color,
    /// Steel blue (decline legs)
    pub decline: Color,
    /// Neon green (first scenario)
    pub green: Color,
    /// Gold (second scenario)
    pub gold: Color,
    /// Hot red (third scenario)
    pub red: Color,
    /// Dim charcoal (grid lines)
    pub grid: Color,
    /// Slate (axis ticks, hints)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    /// Create the default Parrot/neon theme
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            decline: Color::Rgb(100, 149, 237),
            green: Color::Rgb(0, 255, 128),
            gold: Color::Rgb(255, 215, 0),
            red: Color::Rgb(255, 60, 60),
            grid: Color::Rgb(48, 48, 56),
            muted: Color::Rgb(120, 130, 150),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Concrete colour for a logical series colour.
    pub fn series(&self, color: SeriesColor) -> Color {
        match color {
            SeriesColor::Neutral => self.decline,
            SeriesColor::Green => self.green,
            SeriesColor::Gold => self.gold,
            SeriesColor::Red => self.red,
        }
    }

    /// `color` blended toward the background, for reference lines.
    pub fn faint(&self, color: Color) -> Color {
        match (color, self.background) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => Color::Rgb(
                blend(br, r, FAINT_ALPHA),
                blend(bg, g, FAINT_ALPHA),
                blend(bb, b, FAINT_ALPHA),
            ),
            _ => Color::DarkGray,
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn axis(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn surface(&self) -> Style {
        Style::default().bg(self.background)
    }
}

/// Glyph drawn at a marker position.
pub fn marker_glyph(shape: MarkerShape) -> &'static str {
    match shape {
        MarkerShape::Circle => "\u{25CF}",  // ●
        MarkerShape::Cross => "\u{2715}",   // ✕
        MarkerShape::Square => "\u{25A0}",  // ■
        MarkerShape::Diamond => "\u{25C6}", // ◆
    }
}

fn blend(from: u8, to: u8, alpha: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * alpha).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_series_mapping() {
        let theme = Theme::default();
        assert_eq!(theme.series(SeriesColor::Neutral), theme.decline);
        assert_eq!(theme.series(SeriesColor::Green), theme.green);
        assert_eq!(theme.series(SeriesColor::Gold), theme.gold);
        assert_eq!(theme.series(SeriesColor::Red), theme.red);
    }

    #[test]
    fn test_faint_blends_toward_background() {
        let theme = Theme::default();
        // 18 + (118 - 18) * 0.3 = 48
        assert_eq!(theme.faint(Color::Rgb(118, 118, 120)), Color::Rgb(48, 48, 50));
        assert_eq!(theme.faint(theme.background), theme.background);
        assert_eq!(theme.faint(Color::Red), Color::DarkGray);
    }

    #[test]
    fn test_marker_glyphs_distinct() {
        let glyphs = [
            marker_glyph(MarkerShape::Circle),
            marker_glyph(MarkerShape::Cross),
            marker_glyph(MarkerShape::Square),
            marker_glyph(MarkerShape::Diamond),
        ];
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
