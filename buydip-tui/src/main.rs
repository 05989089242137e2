//! BuyDip TUI — full-screen terminal chart of buy-the-dip scenarios.
//!
//! With no arguments the default configuration is charted. Everything is
//! computed before the terminal is taken over, so a bad config fails with a
//! plain diagnostic instead of a garbled screen.

use std::io::{self, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use buydip_core::{compose, SimulationConfig};
use buydip_tui::{input, ui, AppState};

#[derive(Parser)]
#[command(
    name = "buydip-tui",
    about = "Interactive chart of buy-the-dip pullback scenarios"
)]
struct Cli {
    /// TOML config file. Defaults are used for any missing key.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let chart = compose(&config).context("composing chart")?;
    let mut app = AppState::new(chart);
    tracing::info!(scenarios = app.chart.scenario_count(), "opening chart");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        // Nothing changes without input, so block until the next event.
        // Resize events fall through and trigger a redraw.
        if let Event::Key(key) = event::read()? {
            input::handle_key(app, key);
        }
    }
    Ok(())
}
