use crate::error::StoreError;
use crate::model::{Priority, Task};
use crate::storage::json_store::{self, StoreState};
use log::warn;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Result of an edit. Missing ids and no-change edits are neutral outcomes,
/// not errors; only a failed save surfaces as `StoreError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(Task),
    Unchanged,
    NotFound,
}

/// Single source of truth for the task collection and its durable blob.
///
/// The collection is held in memory newest-first and rewritten to the backing
/// file as a whole on every mutation. When a save fails the in-memory change
/// is kept and the error is returned; the last successfully written blob
/// stays intact on disk.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// Opens the store at `path`. A missing file starts an empty collection;
    /// unreadable or corrupt data also starts empty, with a warning logged,
    /// so a broken store file never takes the caller down.
    pub fn open(path: &Path) -> TaskStore {
        let load = json_store::load_state_with_fallback(path);
        if let Some(err) = load.error {
            warn!(
                "store at {} is unreadable, starting empty: {err}",
                path.display()
            );
        }

        TaskStore {
            path: path.to_path_buf(),
            tasks: load.state.tasks,
            next_id: load.state.next_id,
        }
    }

    /// Opens the store at the default location (`TODO_STORE_PATH` override,
    /// else the per-user config directory).
    pub fn open_default() -> Result<TaskStore, StoreError> {
        let path = json_store::store_path()?;
        Ok(Self::open(&path))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Adds a task with the trimmed `text` at the front of the collection.
    pub fn add(&mut self, text: &str) -> Result<Task, StoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyText);
        }

        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| StoreError::invalid_data(err.to_string()))?;
        let task = Task {
            id: self.next_id,
            text: trimmed.to_string(),
            completed: false,
            created_at,
            priority: Priority::Medium,
        };
        self.next_id += 1;

        self.tasks.insert(0, task.clone());
        self.persist()?;

        Ok(task)
    }

    /// Removes the task with `id` if present and reports whether it did.
    /// Re-persists either way.
    pub fn remove(&mut self, id: u64) -> Result<bool, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;

        self.persist()?;
        Ok(removed)
    }

    /// Flips `completed` on the matching task and returns the updated copy,
    /// or `None` without touching the file when the id is gone.
    pub fn toggle_completion(&mut self, id: u64) -> Result<Option<Task>, StoreError> {
        let mut updated = None;
        for task in &mut self.tasks {
            if task.id == id {
                task.completed = !task.completed;
                updated = Some(task.clone());
                break;
            }
        }

        if updated.is_some() {
            self.persist()?;
        }
        Ok(updated)
    }

    /// Replaces the task's text with the trimmed `new_text`. An empty
    /// replacement or one identical to the current text is discarded as
    /// `Unchanged` with no write.
    pub fn edit(&mut self, id: u64, new_text: &str) -> Result<EditOutcome, StoreError> {
        let trimmed = new_text.trim();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        if trimmed.is_empty() || trimmed == task.text {
            return Ok(EditOutcome::Unchanged);
        }

        task.text = trimmed.to_string();
        let updated = task.clone();
        self.persist()?;

        Ok(EditOutcome::Updated(updated))
    }

    /// Drops every completed task and returns how many were dropped.
    /// Re-persists even when the count is zero; callers use the count to
    /// tell "cleared n" apart from "nothing to clear".
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let cleared = before - self.tasks.len();

        self.persist()?;
        Ok(cleared)
    }

    /// Writes the full collection and id counter as one blob.
    pub fn persist(&self) -> Result<(), StoreError> {
        let state = StoreState {
            tasks: self.tasks.clone(),
            next_id: self.next_id,
        };
        json_store::save_state(&self.path, &state)
    }
}
