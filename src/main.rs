//! An interactive terminal form to split shared bills among roommates.
//!
//! Launch the binary to open the form.  Both lists live only for the
//! session; only the display preference is persisted.

mod app;
mod clipboard;
mod config;
mod core;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Split shared bills among roommates")]
struct Cli {
    /// Start in light mode for this session.
    #[arg(long, conflicts_with = "dark")]
    light: bool,

    /// Start in dark mode for this session.
    #[arg(long)]
    dark: bool,
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the UI
        .init();

    let cli = Cli::parse();

    // Ambient display preference, with a per-session CLI override.
    let user_config = config::AppConfig::load();
    let dark_mode = if cli.light {
        false
    } else if cli.dark {
        true
    } else {
        user_config.dark_mode
    };
    let mut state = AppState::new(user_config, dark_mode);

    // Install panic hook to restore the terminal.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    state.terminal_area = Rect::new(0, 0, size.width, size.height);

    let result = run_app(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

// ───────────────────────────────────────── event loop ────────

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| ui::render(frame, state))?;

        let Some(event) = events.recv().await else { break };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(w, h) => state.terminal_area = Rect::new(0, 0, w, h),
            // Ticks only age out the transient copy acknowledgement.
            AppEvent::Tick => state.expire_copied(),
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
