//! Todo command handlers

use anyhow::{bail, Context, Result};

use tada_core::{Todo, TodoId, TodoStore};

use crate::confirm::confirm;
use crate::output::Output;

/// Add a new todo item
pub fn add(store: &mut TodoStore, text: &str, output: &Output) -> Result<()> {
    match store.add(text).context("Failed to add todo")? {
        Some(todo) => {
            output.success(&format!("Added todo: {}", todo.id));
            output.print_todo(&todo);
        }
        None => {
            output.message("Nothing to add (empty text).");
        }
    }

    Ok(())
}

/// List all todos, newest first
pub fn list(store: &TodoStore, output: &Output) -> Result<()> {
    output.print_todos(store.todos());
    Ok(())
}

/// Toggle completion of a todo
pub fn toggle(store: &mut TodoStore, id: &str, output: &Output) -> Result<()> {
    let id = parse_todo_id(id, store)?;

    store.toggle(id).context("Failed to toggle todo")?;

    if let Some(todo) = store.get(id) {
        let state = if todo.completed { "completed" } else { "active" };
        output.success(&format!("Marked {} as {}", id, state));
    }

    Ok(())
}

/// Delete a todo
pub fn delete(store: &mut TodoStore, id: &str, output: &Output) -> Result<()> {
    let id = parse_todo_id(id, store)?;

    let text = match store.get(id) {
        Some(todo) => todo.text.clone(),
        None => {
            output.message(&format!("No todo found matching: {}", id));
            return Ok(());
        }
    };

    // Confirm deletion
    if output.should_prompt() {
        println!("Delete todo: {} - {}", id, text);
        if !confirm("Are you sure?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    store.delete(id).context("Failed to delete todo")?;

    output.success(&format!("Deleted todo: {}", id));

    Ok(())
}

/// Parse a todo ID (supports full id or prefix)
fn parse_todo_id(input: &str, store: &TodoStore) -> Result<TodoId> {
    // Try exact id first
    if let Ok(id) = input.parse::<TodoId>() {
        if store.get(id).is_some() {
            return Ok(id);
        }
    }

    // Fall back to prefix match against the current list
    let matches: Vec<&Todo> = store
        .todos()
        .iter()
        .filter(|t| t.id.to_string().starts_with(input))
        .collect();

    match matches.len() {
        0 => bail!("No todo found matching: {}", input),
        1 => Ok(matches[0].id),
        _ => {
            eprintln!("Multiple todos match '{}':", input);
            for todo in &matches {
                eprintln!("  {} - {}", todo.id, todo.text);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
