//! Export command handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use tada_core::{render, TodoStore};

use crate::output::Output;

/// Render the current list as an HTML page
///
/// Writes to the given path, or stdout when no path is provided.
pub fn run(store: &TodoStore, out: Option<PathBuf>, output: &Output) -> Result<()> {
    let html = render::render_page(store.todos(), store.stats());

    match out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {:?}", path))?;
            output.success(&format!(
                "Exported {} todo(s) to {}",
                store.stats().total,
                path.display()
            ));
        }
        None => {
            print!("{}", html);
        }
    }

    Ok(())
}
