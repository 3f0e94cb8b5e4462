//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_todo_list(frame, app, chunks[0]);
    draw_stats_bar(frame, app, chunks[1]);

    match app.input_mode {
        InputMode::Normal => draw_status_bar(frame, app, chunks[2]),
        InputMode::Insert => draw_compose_input(frame, app, chunks[2]),
    }

    // Draw help overlay if visible
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the todo list, newest first
fn draw_todo_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .todos
        .iter()
        .map(|todo| {
            let marker = if todo.completed { "[x] " } else { "[ ] " };

            let style = if todo.completed {
                Style::default()
                    .add_modifier(Modifier::CROSSED_OUT)
                    .add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };

            // Truncate text if too long
            let max_len = area.width.saturating_sub(8) as usize;
            let text = if todo.text.chars().count() > max_len {
                let truncated: String = todo.text.chars().take(max_len.saturating_sub(1)).collect();
                format!("{}…", truncated)
            } else {
                todo.text.clone()
            };

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(text, style),
            ]))
        })
        .collect();

    let title = format!(" Todos ({}) ", app.todos.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = ListState::default();
    if !app.todos.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the derived counts bar
fn draw_stats_bar(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();

    let line = Line::from(vec![
        Span::styled(
            format!(" {} total", stats.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" · "),
        Span::styled(
            format!("{} active", stats.active),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" · "),
        Span::styled(
            format!("{} completed", stats.completed),
            Style::default().fg(Color::Green),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the key hints / status message bar
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status_message {
        Some(msg) => format!(" {}", msg),
        None => " a: add  Space: toggle  d: delete  q: quit  ?: help".to_string(),
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}

/// Draw the compose input line
fn draw_compose_input(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled("> ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(app.input.as_str()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
    frame.set_cursor_position(Position::new(area.x + 2 + app.cursor as u16, area.y));
}

/// Draw the help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        Line::from(""),
        Line::from("  j/k or ↑/↓   Move selection"),
        Line::from("  gg / G       First / last item"),
        Line::from("  a or i       Add a new todo"),
        Line::from("  Space/Enter  Toggle completion"),
        Line::from("  d            Delete selected"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from("  In compose mode:"),
        Line::from("  Enter        Submit"),
        Line::from("  Esc          Cancel"),
    ];

    let block = Block::default().title(" Help ").borders(Borders::ALL);

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Compute a centered rect using percentages of the available area
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
