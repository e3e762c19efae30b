use super::app::{App, Mode, Status};
use gctapp::clock::Clock;
use gctapp::store::TodoRepository;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const NORMAL_HELP: &str =
    "j/k move  space toggle  a add  e edit  d delete  r refresh  q quit";
const TEXT_HELP: &str = "Enter save  Esc cancel";

pub fn draw<R: TodoRepository, C: Clock>(frame: &mut Frame, app: &App<R, C>) {
    let text_mode = matches!(app.mode, Mode::Input | Mode::Edit);
    let input_height = if text_mode { 3 } else { 0 };

    let [list_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_list(frame, app, list_area);
    if text_mode {
        draw_input(frame, app, input_area);
    }
    draw_status(frame, app, status_area);
}

fn draw_list<R: TodoRepository, C: Clock>(frame: &mut Frame, app: &App<R, C>, area: Rect) {
    let block = Block::bordered().title(format!(" gct ({}) ", app.todos.len()));

    if app.todos.is_empty() {
        let empty = Paragraph::new("No todos yet. Press a to add one.")
            .style(Style::new().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let id_width = app
        .todos
        .last()
        .map(|t| t.id.to_string().len())
        .unwrap_or(1);

    let items: Vec<ListItem> = app
        .todos
        .iter()
        .map(|todo| {
            let (marker, marker_style, text_style) = if todo.done {
                (
                    "[x]",
                    Style::new().fg(Color::Green),
                    Style::new().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ]", Style::new(), Style::new())
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>width$}. ", todo.id, width = id_width),
                    Style::new().fg(Color::Yellow),
                ),
                Span::styled(format!("{} ", marker), marker_style),
                Span::styled(todo.description.as_str(), text_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_input<R: TodoRepository, C: Clock>(frame: &mut Frame, app: &App<R, C>, area: Rect) {
    let title = match app.mode {
        Mode::Edit => " Edit todo ",
        _ => " New todo ",
    };
    let input = Paragraph::new(app.input.as_str()).block(Block::bordered().title(title));
    frame.render_widget(input, area);

    let cursor_x = area.x + 1 + app.input.width() as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    frame.set_cursor_position((cursor_x.min(max_x), area.y + 1));
}

fn draw_status<R: TodoRepository, C: Clock>(frame: &mut Frame, app: &App<R, C>, area: Rect) {
    let line = if let Some(id) = app.pending_delete() {
        Line::from(Span::styled(
            format!("Delete todo {}? (y/n)", id),
            Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        match &app.status {
            Some(Status::Error(message)) => {
                Line::from(Span::styled(message.as_str(), Style::new().fg(Color::Red)))
            }
            Some(Status::Info(message)) => {
                Line::from(Span::styled(message.as_str(), Style::new().fg(Color::Green)))
            }
            None => {
                let help = match app.mode {
                    Mode::Input | Mode::Edit => TEXT_HELP,
                    _ => NORMAL_HELP,
                };
                Line::from(Span::styled(help, Style::new().add_modifier(Modifier::DIM)))
            }
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
