//! HTML view rendering
//!
//! Pure functions from store state to markup. Every rendered element
//! carries a stable `data-testid` so automation can locate it
//! deterministically, and item text is entity-escaped here, at render time;
//! the store keeps the raw text.
//!
//! A full re-render replaces the previous markup wholesale, so there is no
//! clear-then-patch step for callers to get wrong.

use crate::models::{Stats, Todo};

/// Escape text for safe embedding in HTML
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a single todo item as a list entry
///
/// The toggle checkbox reflects the completed state, and the text span
/// carries a `completed` class when done.
pub fn render_item(todo: &Todo) -> String {
    let checked = if todo.completed { " checked" } else { "" };
    let class = if todo.completed {
        " class=\"completed\""
    } else {
        ""
    };

    format!(
        "<li data-testid=\"todo-item-{id}\">\
         <input type=\"checkbox\" data-testid=\"todo-toggle-{id}\"{checked}>\
         <span data-testid=\"todo-text-{id}\"{class}>{text}</span>\
         <button data-testid=\"todo-delete-{id}\">Delete</button>\
         </li>",
        id = todo.id,
        checked = checked,
        class = class,
        text = escape(&todo.text),
    )
}

/// Render the whole list in stored (newest-first) order
pub fn render_list(todos: &[Todo]) -> String {
    let mut html = String::from("<ul data-testid=\"todo-list\">");
    for todo in todos {
        html.push_str(&render_item(todo));
    }
    html.push_str("</ul>");
    html
}

/// Render the derived counts summary
pub fn render_stats(stats: Stats) -> String {
    format!(
        "<p data-testid=\"todo-stats\">\
         Total: <span data-testid=\"stats-total\">{}</span> | \
         Active: <span data-testid=\"stats-active\">{}</span> | \
         Completed: <span data-testid=\"stats-completed\">{}</span>\
         </p>",
        stats.total, stats.active, stats.completed
    )
}

/// Render the complete page: compose input, list, and stats summary
pub fn render_page(todos: &[Todo], stats: Stats) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Todo List</title>\n\
         </head>\n\
         <body>\n\
         <h1>Todo List</h1>\n\
         <input type=\"text\" data-testid=\"todo-input\" placeholder=\"What needs to be done?\">\n\
         <button data-testid=\"add-button\">Add</button>\n\
         {}\n\
         {}\n\
         </body>\n\
         </html>\n",
        render_list(todos),
        render_stats(stats)
    )
}
