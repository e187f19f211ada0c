use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Page};
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { pending_gg: false }
    }
}

/// Main terminal event loop: handles input and UI drawing. Returns `Ok(())`
/// when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::new();

    loop {
        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

// Returns true when the app should quit.
fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    if app.filter_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => {
                app.clear_filter();
            }
            KeyCode::Backspace => {
                app.pop_filter_char();
            }
            KeyCode::Enter => {
                app.exit_filter_mode();
            }
            KeyCode::Down => {
                app.next();
            }
            KeyCode::Up => {
                app.prev();
            }
            KeyCode::Char(c) => {
                // Keep it simple: filter on printable characters.
                if !c.is_control() {
                    app.push_filter_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            return true;
        }
        KeyCode::Char('/') => {
            state.pending_gg = false;
            // The filter operates on the table rows.
            app.page = Page::Table;
            app.enter_filter_mode();
        }
        KeyCode::Esc => {
            state.pending_gg = false;
            app.clear_filter();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.pending_gg = false;
            app.prev_page();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            state.pending_gg = false;
            app.next_page();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                let display = app.display_indices();
                if let Some(&first) = display.first() {
                    app.set_selected(first);
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            let display = app.display_indices();
            if let Some(&last) = display.last() {
                app.set_selected(last);
            }
        }
        KeyCode::Char('x') => {
            state.pending_gg = false;
            if app.page == Page::Scatter {
                app.cycle_scatter_axis();
            }
        }
        KeyCode::Char('K') => {
            state.pending_gg = false;
            if app.has_tracks() {
                app.toggle_metadata_window();
            }
        }
        _ => {
            state.pending_gg = false;
        }
    }

    false
}
