//! Application state and logic

use std::time::{Duration, Instant};

use anyhow::Result;

use tada_core::{Stats, Todo, TodoStore};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Composing a new todo item
    Insert,
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Compose input buffer
    pub input: String,
    /// Cursor position in the compose input (in characters)
    pub cursor: usize,
    /// Snapshot of the store's list (newest first)
    pub todos: Vec<Todo>,
    /// Currently selected row
    pub selected: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Pending 'g' keypress for gg sequence (with timestamp)
    pub pending_g: Option<Instant>,
}

impl App {
    /// Create a new app with data from the store
    pub fn new(store: &TodoStore) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            input: String::new(),
            cursor: 0,
            todos: store.todos().to_vec(),
            selected: 0,
            status_message: None,
            status_message_time: None,
            show_help: false,
            pending_g: None,
        }
    }

    /// Refresh the snapshot from the store after a mutation
    pub fn refresh(&mut self, store: &TodoStore) {
        self.todos = store.todos().to_vec();
        if self.selected >= self.todos.len() {
            self.selected = self.todos.len().saturating_sub(1);
        }
    }

    /// Derived counts for the stats bar
    pub fn stats(&self) -> Stats {
        Stats::of(&self.todos)
    }

    /// The todo under the cursor, if any
    pub fn selected_todo(&self) -> Option<&Todo> {
        self.todos.get(self.selected)
    }

    // ==================== Navigation ====================

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.todos.len() {
            self.selected += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_last(&mut self) {
        self.selected = self.todos.len().saturating_sub(1);
    }

    // ==================== Compose input ====================

    pub fn enter_insert_mode(&mut self) {
        self.input_mode = InputMode::Insert;
        self.input.clear();
        self.cursor = 0;
    }

    pub fn exit_insert_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_cursor();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_cursor();
            self.input.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_cursor(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    // ==================== Status ====================

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    /// Auto-dismiss the status message after a few seconds
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(4) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ==================== Commands ====================

    /// Submit the compose input as a new todo
    ///
    /// Empty or whitespace-only input is rejected by the store; a status
    /// message notes it. On success the new item becomes the selection.
    pub fn submit_input(&mut self, store: &mut TodoStore) -> Result<()> {
        let text = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.input_mode = InputMode::Normal;

        match store.add(&text)? {
            Some(_) => {
                self.refresh(store);
                self.selected = 0;
            }
            None => {
                self.set_status("Nothing to add (empty text)".to_string());
            }
        }

        Ok(())
    }

    /// Toggle the selected todo's completed flag
    pub fn toggle_selected(&mut self, store: &mut TodoStore) -> Result<()> {
        let Some(todo) = self.selected_todo() else {
            return Ok(());
        };
        let id = todo.id;

        if store.toggle(id)? {
            self.refresh(store);
        }

        Ok(())
    }

    /// Delete the selected todo
    pub fn delete_selected(&mut self, store: &mut TodoStore) -> Result<()> {
        let Some(todo) = self.selected_todo() else {
            return Ok(());
        };
        let id = todo.id;
        let text = todo.text.clone();

        if store.delete(id)? {
            self.refresh(store);
            self.set_status(format!("Deleted: {}", text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tada_core::Config;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> TodoStore {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            log_file: None,
        };
        TodoStore::open_with_config(config).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        app.enter_insert_mode();
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_submit_adds_and_selects_new_item() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        let mut app = App::new(&store);

        type_text(&mut app, "Buy groceries");
        app.submit_input(&mut store).unwrap();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_todo().unwrap().text, "Buy groceries");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_submit_empty_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        let mut app = App::new(&store);

        type_text(&mut app, "   ");
        app.submit_input(&mut store).unwrap();

        assert!(app.todos.is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_toggle_selected() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        store.add("Buy groceries").unwrap();
        let mut app = App::new(&store);

        app.toggle_selected(&mut store).unwrap();
        assert!(app.selected_todo().unwrap().completed);

        app.toggle_selected(&mut store).unwrap();
        assert!(!app.selected_todo().unwrap().completed);
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        store.add("First task").unwrap();
        store.add("Second task").unwrap();
        let mut app = App::new(&store);

        app.move_to_last();
        app.delete_selected(&mut store).unwrap();

        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.selected, 0);

        app.delete_selected(&mut store).unwrap();
        assert!(app.todos.is_empty());

        // Deleting with nothing selected is a no-op
        app.delete_selected(&mut store).unwrap();
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        store.add("First task").unwrap();
        store.add("Second task").unwrap();
        let mut app = App::new(&store);

        app.move_up();
        assert_eq!(app.selected, 0);

        app.move_down();
        app.move_down();
        assert_eq!(app.selected, 1);

        app.move_to_first();
        assert_eq!(app.selected, 0);
        app.move_to_last();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_compose_input_editing() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let mut app = App::new(&store);

        type_text(&mut app, "abc");
        app.cursor_left();
        app.insert_char('x');
        assert_eq!(app.input, "abxc");

        app.delete_char();
        assert_eq!(app.input, "abc");

        app.cursor_right();
        app.insert_char('!');
        assert_eq!(app.input, "abc!");
    }
}
