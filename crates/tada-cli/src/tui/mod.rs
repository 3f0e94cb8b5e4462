//! tada TUI
//!
//! Terminal user interface for tada - an interactive todo list.
//!
//! ## Layout
//!
//! Single-list layout:
//! - Top: todo list, newest first, completion state shown per item
//! - Bottom: derived counts bar, then a key-hint / compose-input line
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - gg / G: Jump to first / last item
//! - q: Quit
//!
//! ## Commands
//!
//! - a or i: Compose a new todo (Enter submits, Esc cancels)
//! - Space or Enter: Toggle completion of the selected item
//! - d: Delete the selected item
//! - ?: Help overlay

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tada_core::{Config, TodoStore};

use app::{App, InputMode};

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if TADA_LOG is set)
    init_tui_logging(&config);

    let mut store = TodoStore::open_with_config(config)?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&store);

    let result = run_app(&mut terminal, &mut app, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut TodoStore,
) -> Result<()> {
    loop {
        // Check for status message timeout
        app.check_status_timeout();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll with a short timeout so status messages dismiss without input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // If help is showing, any key dismisses it
                if app.show_help {
                    app.show_help = false;
                    continue;
                }

                match app.input_mode {
                    InputMode::Normal => handle_normal_mode(app, store, key.code, key.modifiers),
                    InputMode::Insert => handle_insert_mode(app, store, key.code, key.modifiers),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, store: &mut TodoStore, code: KeyCode, modifiers: KeyModifiers) {
    // Clear pending 'g' if timeout expired (500ms)
    if let Some(time) = app.pending_g {
        if time.elapsed() > Duration::from_millis(500) {
            app.pending_g = None;
        }
    }

    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => {
            app.status_message = None;
            app.move_up();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.status_message = None;
            app.move_down();
        }

        // Compose a new todo
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.enter_insert_mode();
        }

        // Toggle completion
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Err(e) = app.toggle_selected(store) {
                app.set_status(format!("Failed to toggle: {}", e));
            }
        }

        // Delete
        KeyCode::Char('d') => {
            if let Err(e) = app.delete_selected(store) {
                app.set_status(format!("Failed to delete: {}", e));
            }
        }

        // Help
        KeyCode::Char('?') => {
            app.toggle_help();
        }

        // Vim navigation: G (go to last)
        KeyCode::Char('G') => {
            app.pending_g = None;
            app.move_to_last();
        }

        // Vim navigation: g (start of gg sequence)
        KeyCode::Char('g') => {
            if app.pending_g.is_some() {
                // Second 'g' - complete the gg sequence
                app.pending_g = None;
                app.move_to_first();
            } else {
                // First 'g' - start the sequence
                app.pending_g = Some(std::time::Instant::now());
            }
        }

        _ => {
            // Any other key clears pending 'g'
            app.pending_g = None;
        }
    }
}

/// Handle key events while composing a new todo
fn handle_insert_mode(app: &mut App, store: &mut TodoStore, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        // Cancel
        KeyCode::Esc => {
            app.exit_insert_mode();
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.exit_insert_mode();
        }

        // Submit
        KeyCode::Enter => {
            if let Err(e) = app.submit_input(store) {
                app.set_status(format!("Failed to add: {}", e));
            }
        }

        // Text input
        KeyCode::Char(c) => {
            app.insert_char(c);
        }
        KeyCode::Backspace => {
            app.delete_char();
        }
        KeyCode::Left => {
            app.cursor_left();
        }
        KeyCode::Right => {
            app.cursor_right();
        }

        _ => {}
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if TADA_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    // Only log if TADA_LOG is set
    let Ok(log_level) = std::env::var("TADA_LOG") else {
        return;
    };

    // Determine log file path
    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join("debug.log"));

    // Create log file
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("tada_core={},tada_cli={}", log_level, log_level));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
