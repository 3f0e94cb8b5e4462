//! Todo list store
//!
//! The `TodoStore` is the single owner of todo state. It keeps the list in
//! memory, mutates it in response to the three commands (add, toggle,
//! delete), and writes the whole list through the persistence slot before a
//! mutation is considered done.
//!
//! The store has no presentation dependency. Mutations report whether state
//! changed (`Some`/`true`), and that return value is the re-render signal a
//! view layer acts on.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = TodoStore::open()?;
//!
//! if let Some(todo) = store.add("Buy groceries")? {
//!     println!("added {}", todo.id);
//! }
//!
//! let stats = store.stats();
//! ```

use anyhow::{Context, Result};

use crate::config::Config;
use crate::id::{IdSource, TodoId};
use crate::models::{Stats, Todo};
use crate::storage::JsonPersistence;

/// Authoritative in-memory and persisted todo list state
///
/// Constructed explicitly; multiple independent instances can coexist,
/// each bound to its own slot.
pub struct TodoStore {
    /// The list, newest first
    todos: Vec<Todo>,
    /// Id allocator, seeded past any loaded ids
    ids: IdSource,
    /// Persistence slot handler
    persistence: JsonPersistence,
}

impl TodoStore {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    ///
    /// An absent or unreadable slot yields an empty list; the store is
    /// usable either way.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = JsonPersistence::new(config);
        let todos = persistence.load().context("Failed to load todo list")?;

        let mut ids = IdSource::new();
        for todo in &todos {
            ids.observe(todo.id);
        }

        Ok(Self {
            todos,
            ids,
            persistence,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.persistence.config()
    }

    // ==================== Commands ====================

    /// Add a new todo item
    ///
    /// The text is trimmed; whitespace-only input is a no-op returning
    /// `Ok(None)` with nothing written. Otherwise the new item is prepended
    /// (the list is newest-first), persisted, and returned.
    pub fn add(&mut self, raw_text: &str) -> Result<Option<Todo>> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let todo = Todo::new(self.ids.next(), text);
        self.todos.insert(0, todo.clone());
        self.save()?;

        Ok(Some(todo))
    }

    /// Toggle the completed flag of the item with the given id
    ///
    /// Returns `true` if an item was toggled. An unknown id is a no-op
    /// returning `false`, not an error.
    pub fn toggle(&mut self, id: TodoId) -> Result<bool> {
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };

        todo.toggle();
        self.save()?;

        Ok(true)
    }

    /// Delete the item with the given id
    ///
    /// Returns `true` if an item was removed. An unknown id (including a
    /// second delete of the same id) is a no-op returning `false`.
    pub fn delete(&mut self, id: TodoId) -> Result<bool> {
        let Some(pos) = self.todos.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        self.todos.remove(pos);
        self.save()?;

        Ok(true)
    }

    // ==================== Queries ====================

    /// All todos in stored order (newest first)
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Look up a single todo by id
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Derived counts for the current list
    pub fn stats(&self) -> Stats {
        Stats::of(&self.todos)
    }

    /// Persist the whole list to the slot
    fn save(&self) -> Result<()> {
        self.persistence
            .save(&self.todos)
            .context("Failed to save todo list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            log_file: None,
        }
    }

    fn open_store(temp_dir: &TempDir) -> TodoStore {
        TodoStore::open_with_config(test_config(temp_dir)).unwrap()
    }

    #[test]
    fn test_open_creates_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        assert!(store.todos().is_empty());
        assert_eq!(
            store.stats(),
            Stats {
                total: 0,
                active: 0,
                completed: 0
            }
        );
    }

    #[test]
    fn test_add_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let added = store.add("Buy groceries").unwrap().unwrap();

        assert_eq!(store.todos().len(), 1);
        let first = &store.todos()[0];
        assert_eq!(first.text, "Buy groceries");
        assert!(!first.completed);
        assert_eq!(first.id, added.id);
    }

    #[test]
    fn test_add_trims_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let added = store.add("  Walk the dog  ").unwrap().unwrap();
        assert_eq!(added.text, "Walk the dog");
    }

    #[test]
    fn test_add_whitespace_only_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        assert!(store.add("  ").unwrap().is_none());
        assert!(store.add("").unwrap().is_none());
        assert!(store.add("\t\n").unwrap().is_none());

        assert!(store.todos().is_empty());
        // No persistence write happened either
        assert!(!store.config().todos_path().exists());
    }

    #[test]
    fn test_add_prepends_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.add("First task").unwrap();
        store.add("Second task").unwrap();
        store.add("Third task").unwrap();

        let texts: Vec<_> = store.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Third task", "Second task", "First task"]);
    }

    #[test]
    fn test_rapid_adds_get_unique_ids() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        for i in 0..20 {
            store.add(&format!("task {}", i)).unwrap();
        }

        let mut ids: Vec<_> = store.todos().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_toggle() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let id = store.add("Buy groceries").unwrap().unwrap().id;

        assert!(store.toggle(id).unwrap());
        assert!(store.get(id).unwrap().completed);

        assert!(store.toggle(id).unwrap());
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.add("Buy groceries").unwrap();
        let before = store.todos().to_vec();

        assert!(!store.toggle(TodoId::from_millis(123)).unwrap());
        assert_eq!(store.todos(), &before[..]);
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let id = store.add("Buy groceries").unwrap().unwrap().id;

        assert!(store.delete(id).unwrap());
        assert!(store.todos().is_empty());
        assert_eq!(
            store.stats(),
            Stats {
                total: 0,
                active: 0,
                completed: 0
            }
        );
    }

    #[test]
    fn test_double_delete_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let id = store.add("Buy groceries").unwrap().unwrap().id;

        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.todos().is_empty());
    }

    #[test]
    fn test_stats_always_consistent() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let a = store.add("a").unwrap().unwrap().id;
        let b = store.add("b").unwrap().unwrap().id;
        store.add("c").unwrap();

        store.toggle(a).unwrap();
        store.toggle(b).unwrap();
        store.toggle(b).unwrap();
        store.delete(b).unwrap();
        store.toggle(TodoId::from_millis(1)).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, store.todos().len());
        assert_eq!(stats.total, stats.active + stats.completed);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn test_lifecycle_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let first = store.add("First task").unwrap().unwrap().id;
        let second = store.add("Second task").unwrap().unwrap().id;
        store.add("Third task").unwrap();

        store.toggle(second).unwrap();
        store.delete(first).unwrap();

        let todos = store.todos();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].text, "Third task");
        assert!(!todos[0].completed);
        assert_eq!(todos[1].text, "Second task");
        assert!(todos[1].completed);

        assert_eq!(
            store.stats(),
            Stats {
                total: 2,
                active: 1,
                completed: 1
            }
        );
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let expected;
        {
            let mut store = TodoStore::open_with_config(config.clone()).unwrap();
            store.add("First task").unwrap();
            let second = store.add("Second task").unwrap().unwrap().id;
            store.toggle(second).unwrap();
            expected = store.todos().to_vec();
        }

        // Reopen - same items, same order, same field values
        let store = TodoStore::open_with_config(config).unwrap();
        assert_eq!(store.todos(), &expected[..]);
    }

    #[test]
    fn test_every_mutation_persists_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = TodoStore::open_with_config(config.clone()).unwrap();

        let id = store.add("Buy groceries").unwrap().unwrap().id;
        let on_disk = TodoStore::open_with_config(config.clone()).unwrap();
        assert_eq!(on_disk.todos().len(), 1);

        store.toggle(id).unwrap();
        let on_disk = TodoStore::open_with_config(config.clone()).unwrap();
        assert!(on_disk.todos()[0].completed);

        store.delete(id).unwrap();
        let on_disk = TodoStore::open_with_config(config).unwrap();
        assert!(on_disk.todos().is_empty());
    }

    #[test]
    fn test_ids_stay_unique_after_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let existing;
        {
            let mut store = TodoStore::open_with_config(config.clone()).unwrap();
            existing = store.add("First task").unwrap().unwrap().id;
        }

        let mut store = TodoStore::open_with_config(config).unwrap();
        let fresh = store.add("Second task").unwrap().unwrap().id;
        assert_ne!(fresh, existing);
        assert!(fresh > existing);
    }

    #[test]
    fn test_corrupt_slot_yields_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        std::fs::write(config.todos_path(), b"definitely not json").unwrap();

        let store = TodoStore::open_with_config(config).unwrap();
        assert!(store.todos().is_empty());
    }
}
