//! # gct
//!
//! The binary is intentionally thin: argument parsing, rendering and the
//! full-screen interface live in `cli/` and `tui/`, the todo logic lives in the
//! `gctapp` library. This file only runs the CLI and turns a failure into a
//! message on stderr and exit status 1.

mod cli;
mod logging;
mod tui;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", cli::render::render_error(&e));
        std::process::exit(1);
    }
}
