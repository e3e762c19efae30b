//! # Full-Screen Interface
//!
//! `gct tui` runs the same API as the CLI behind a crossterm event loop.
//! Key handling lives in [`app`] and drawing in [`render`]; this module only
//! owns the terminal: raw mode and the alternate screen on the way in, and
//! their reversal on the way out, including when the loop fails or panics.

pub mod app;
mod render;

use app::App;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use gctapp::clock::Clock;
use gctapp::config::Config;
use gctapp::error::{GctError, Result};
use gctapp::init::initialize;
use gctapp::store::TodoRepository;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use tracing::debug;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(config: &Config) -> Result<()> {
    let ctx = initialize(config);
    let mut app = App::new(ctx.api);

    let mut terminal = setup_terminal().map_err(terminal_error)?;
    debug!("tui started");

    let result = event_loop(&mut terminal, &mut app);
    let restored = restore_terminal(&mut terminal).map_err(terminal_error);

    result.and(restored)
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Restore the terminal on panic so the message is readable
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn event_loop<R: TodoRepository, C: Clock>(terminal: &mut Term, app: &mut App<R, C>) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| render::draw(frame, app))
            .map_err(terminal_error)?;

        // Resize events just fall through to the next draw
        if let Event::Key(key) = event::read().map_err(terminal_error)? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

fn terminal_error(e: io::Error) -> GctError {
    GctError::file_system("terminal error", e)
}
