//! Output formatting for the CLI.
//!
//! Every function here returns a `String`; the caller decides where it goes.
//! That keeps rendering testable without capturing stdout.

use super::styles;
use chrono::{DateTime, Utc};
use gctapp::commands::{CmdMessage, MessageLevel};
use gctapp::error::{ErrorKind, GctError, Result};
use gctapp::Todo;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DESCRIPTION_MAX_WIDTH: usize = 60;
const COLUMN_GAP: &str = "  ";

/// How an error is shown to a person, prefixed by what kind of failure it is.
pub fn render_error(err: &GctError) -> String {
    let prefix = match err.kind() {
        ErrorKind::NotFound | ErrorKind::InvalidInput => "Error",
        ErrorKind::FileSystem => "File system error",
        ErrorKind::Json => "JSON error",
        ErrorKind::Configuration => "Configuration error",
    };
    match err.cause() {
        Some(cause) => format!("{}: {}: {}", prefix, err.message(), cause),
        None => format!("{}: {}", prefix, err.message()),
    }
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &*styles::INFO,
            MessageLevel::Success => &*styles::SUCCESS,
        };
        out.push_str(&style.apply_to(&message.content).to_string());
        out.push('\n');
    }
    out
}

/// Aligned table: `ID  STATUS  DESCRIPTION  UPDATED`.
pub fn render_table(todos: &[Todo], now: DateTime<Utc>) -> String {
    if todos.is_empty() {
        return format!("{}\n", styles::EMPTY.apply_to("No todos found."));
    }

    let rows: Vec<(String, &str, String, String)> = todos
        .iter()
        .map(|t| {
            (
                t.id.to_string(),
                status_marker(t.done),
                truncate_to_width(&t.description, DESCRIPTION_MAX_WIDTH),
                format_time_ago(t.updated_at, now),
            )
        })
        .collect();

    let id_width = column_width("ID", rows.iter().map(|r| r.0.as_str()));
    let status_width = column_width("STATUS", rows.iter().map(|r| r.1));
    let desc_width = column_width("DESCRIPTION", rows.iter().map(|r| r.2.as_str()));

    let header = [
        pad("ID", id_width),
        pad("STATUS", status_width),
        pad("DESCRIPTION", desc_width),
        "UPDATED".to_string(),
    ]
    .join(COLUMN_GAP);

    let mut out = format!("{}\n", styles::HEADER.apply_to(header));
    for (todo, (id, marker, description, updated)) in todos.iter().zip(&rows) {
        let marker_style = if todo.done {
            &*styles::DONE
        } else {
            &*styles::PENDING
        };
        let text = if todo.done {
            styles::DONE_TEXT.apply_to(pad(description, desc_width)).to_string()
        } else {
            pad(description, desc_width)
        };
        out.push_str(&format!(
            "{}{gap}{}{gap}{}{gap}{}\n",
            styles::ID.apply_to(pad_left(id, id_width)),
            marker_style.apply_to(pad(marker, status_width)),
            text,
            styles::TIME.apply_to(updated),
            gap = COLUMN_GAP,
        ));
    }
    out
}

/// The on-disk schema, pretty printed.
pub fn render_json(todos: &[Todo]) -> Result<String> {
    serde_json::to_string_pretty(todos)
        .map(|json| format!("{}\n", json))
        .map_err(|e| GctError::json("failed to encode todos", e))
}

/// One `<id>. [x] <description>` line per todo, for scripts.
pub fn render_plain(todos: &[Todo]) -> String {
    todos
        .iter()
        .map(|t| format!("{}. {} {}\n", t.id, status_marker(t.done), t.description))
        .collect()
}

fn status_marker(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.width()).fold(header.width(), usize::max)
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(fill), s)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
