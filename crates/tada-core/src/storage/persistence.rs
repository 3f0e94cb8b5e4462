//! Todo list persistence
//!
//! Handles saving and loading the todo list to/from the single persistence
//! slot: one JSON file holding the whole list, overwritten in full on every
//! mutation. Uses atomic writes (write to temp file, then rename) to prevent
//! corruption.
//!
//! Storage location: `~/.local/share/tada/todos.json` (configurable via
//! `Config`).
//!
//! Loading fails soft: a missing slot yields an empty list, and a slot that
//! can't be parsed is set aside as a backup and likewise treated as empty.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::config::Config;
use crate::models::Todo;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the todo list slot
pub struct JsonPersistence {
    config: Config,
}

impl JsonPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the slot exists on disk
    pub fn exists(&self) -> bool {
        self.config.todos_path().exists()
    }

    /// Save the entire list, overwriting the previous slot contents
    ///
    /// This writes to a temporary file first, then renames it to the target
    /// path, so the slot is never left in a partially-written state.
    pub fn save(&self, todos: &[Todo]) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(todos)?;
        atomic_write(&self.config.todos_path(), &json)
    }

    /// Load the slot
    ///
    /// Returns an empty list if the slot doesn't exist. Malformed content is
    /// moved aside to a `.corrupt.backup` sibling and an empty list is
    /// returned; the application stays usable either way.
    pub fn load(&self) -> StorageResult<Vec<Todo>> {
        let path = self.config.todos_path();

        if !path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&path).map_err(|e| StorageError::from_io(e, path.clone()))?;

        match serde_json::from_slice(&bytes) {
            Ok(todos) => Ok(todos),
            Err(parse_err) => {
                let backup = path.with_extension("json.corrupt.backup");
                match fs::rename(&path, &backup) {
                    Ok(()) => warn!(
                        "Discarding malformed todo data in {:?}: {}. Backup saved to {:?}",
                        path, parse_err, backup
                    ),
                    Err(rename_err) => warn!(
                        "Discarding malformed todo data in {:?}: {}. Backup failed: {}",
                        path, parse_err, rename_err
                    ),
                }
                Ok(Vec::new())
            }
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TodoId;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            log_file: None,
        }
    }

    fn sample_todo(id: i64, text: &str) -> Todo {
        Todo::new(TodoId::from_millis(id), text)
    }

    #[test]
    fn test_load_missing_slot_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        let todos = vec![sample_todo(2, "Second"), sample_todo(1, "First")];
        persistence.save(&todos).unwrap();
        assert!(persistence.exists());

        let loaded = persistence.load().unwrap();
        assert_eq!(loaded, todos);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        persistence
            .save(&[sample_todo(1, "First"), sample_todo(2, "Second")])
            .unwrap();
        persistence.save(&[sample_todo(3, "Only")]).unwrap();

        let loaded = persistence.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "Only");
    }

    #[test]
    fn test_malformed_slot_is_discarded_with_backup() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let persistence = JsonPersistence::new(config.clone());

        fs::write(config.todos_path(), b"{ not valid json").unwrap();

        let loaded = persistence.load().unwrap();
        assert!(loaded.is_empty());

        // Bad content is set aside, not deleted
        assert!(!config.todos_path().exists());
        let backup = config.todos_path().with_extension("json.corrupt.backup");
        assert!(backup.exists());
        assert_eq!(fs::read(backup).unwrap(), b"{ not valid json");
    }

    #[test]
    fn test_slot_with_wrong_shape_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let persistence = JsonPersistence::new(config.clone());

        // Valid JSON, wrong shape
        fs::write(config.todos_path(), b"{\"todos\": 42}").unwrap();

        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_slot_format_field_names() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let persistence = JsonPersistence::new(config.clone());

        persistence.save(&[sample_todo(99, "Check format")]).unwrap();

        let raw = fs::read_to_string(config.todos_path()).unwrap();
        assert!(raw.contains("\"id\""));
        assert!(raw.contains("\"text\""));
        assert!(raw.contains("\"completed\""));
        assert!(raw.contains("\"createdAt\""));
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let persistence = JsonPersistence::new(config.clone());

        persistence.save(&[sample_todo(1, "First")]).unwrap();

        let temp_path = config.todos_path().with_extension("tmp");
        assert!(!temp_path.exists());
    }
}
