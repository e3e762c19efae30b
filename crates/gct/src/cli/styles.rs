//! Terminal styles for CLI output.
//!
//! Code asks for styles by what the text *is* (an ID, a timestamp, a done
//! marker), never by color. `console` drops the escape codes on its own when
//! stdout is not a terminal, so piped output stays plain.

use console::Style;
use once_cell::sync::Lazy;

pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static ID: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static DONE: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static PENDING: Lazy<Style> = Lazy::new(Style::new);
pub static DONE_TEXT: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static EMPTY: Lazy<Style> = Lazy::new(|| Style::new().dim());

pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
