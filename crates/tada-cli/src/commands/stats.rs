//! Stats command handler

use anyhow::Result;

use tada_core::TodoStore;

use crate::output::{Output, OutputFormat};

/// Show derived counts for the current list
pub fn show(store: &TodoStore, output: &Output) -> Result<()> {
    let stats = store.stats();
    let config = store.config();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "total": stats.total,
                    "active": stats.active,
                    "completed": stats.completed
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", stats.total);
        }
        OutputFormat::Human => {
            println!("Todo List");
            println!("=========");
            println!();
            println!("Counts:");
            println!("  Total:     {}", stats.total);
            println!("  Active:    {}", stats.active);
            println!("  Completed: {}", stats.completed);
            println!();
            println!("Storage:");
            println!("  Location: {}", config.todos_path().display());
        }
    }

    Ok(())
}
