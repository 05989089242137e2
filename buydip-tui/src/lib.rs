//! BuyDip TUI - interactive terminal chart of buy-the-dip scenarios
//!
//! Shows the composed chart full screen with:
//! - Decline and recovery legs per pullback depth
//! - Buy, bottom, breakeven and final-value annotations
//! - Legend row with per-scenario toggles
//! - Status bar with key hints

pub mod app;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;
