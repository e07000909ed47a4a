//! Optimistic task-list and row state machines.
//!
//! Server responses are applied to the in-memory list copy; a mutation is
//! only applied after a successful response, so a failed request needs no
//! rollback. Kept free of any UI framework so the state transitions are
//! unit-testable.

use chrono::{DateTime, Utc};

use crate::Task;

/// The in-memory task list as the UI renders it.
#[derive(Debug, Clone, Default)]
pub struct TaskListState {
    tasks: Vec<Task>,
    /// True while the initial fetch is in flight.
    pub loading: bool,
}

impl TaskListState {
    /// An empty list in the loading state (pre initial fetch).
    pub fn loading() -> Self {
        Self {
            tasks: Vec::new(),
            loading: true,
        }
    }

    /// The currently rendered tasks.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the list with a successful fetch result.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.loading = false;
    }

    /// A fetch failure leaves the previously rendered list unchanged.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Append the server-returned task after a successful create.
    pub fn apply_created(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the matching task after a successful update.
    pub fn apply_updated(&mut self, task: Task) {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        }
    }

    /// Remove the task after a successful delete.
    pub fn apply_deleted(&mut self, task_id: &str) {
        self.tasks.retain(|t| t.id != task_id);
    }

    /// Mutate completion state in place after a successful toggle.
    ///
    /// `completed_at` is stamped locally, matching the original UI which
    /// does not re-fetch after toggling.
    pub fn apply_completion(&mut self, task_id: &str, completed: bool, now: DateTime<Utc>) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.completed = completed;
            task.completed_at = completed.then_some(now);
        }
    }

    /// Look up a task by id.
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Display mode of a single task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowMode {
    #[default]
    Display,
    Editing,
}

/// Per-row UI state: display/editing mode plus a submitting flag that
/// disables the row's controls while a request is pending.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowState {
    pub mode: RowMode,
    pub submitting: bool,
}

impl RowState {
    /// Edit button: display -> editing. No-op while submitting.
    pub fn edit(&mut self) {
        if !self.submitting {
            self.mode = RowMode::Editing;
        }
    }

    /// Cancel button: editing -> display without saving.
    pub fn cancel(&mut self) {
        if !self.submitting {
            self.mode = RowMode::Display;
        }
    }

    /// A save/create request went out; controls are disabled.
    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    /// The request finished. On success an editing row returns to display;
    /// on failure it stays in editing so the user can retry.
    pub fn finish_submit(&mut self, success: bool) {
        self.submitting = false;
        if success {
            self.mode = RowMode::Display;
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == RowMode::Editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskPriority;

    fn task(id: &str, title: &str) -> Task {
        let now: DateTime<Utc> = "2026-08-30T12:00:00Z".parse().unwrap();
        Task {
            id: id.to_string(),
            user_id: "u-1".to_string(),
            title: title.to_string(),
            description: None,
            completed: false,
            priority: TaskPriority::Medium,
            tags: None,
            due_date: None,
            notification_time_before: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_appends() {
        let mut state = TaskListState::default();
        state.set_tasks(vec![task("1", "a")]);
        state.apply_created(task("2", "b"));

        assert_eq!(state.len(), 2);
        assert_eq!(state.tasks()[1].id, "2");
    }

    #[test]
    fn test_update_replaces_by_id() {
        let mut state = TaskListState::default();
        state.set_tasks(vec![task("1", "a"), task("2", "b")]);

        state.apply_updated(task("2", "b renamed"));

        assert_eq!(state.len(), 2);
        assert_eq!(state.get("2").unwrap().title, "b renamed");
        assert_eq!(state.get("1").unwrap().title, "a");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut state = TaskListState::default();
        state.set_tasks(vec![task("1", "a")]);

        state.apply_updated(task("missing", "x"));

        assert_eq!(state.len(), 1);
        assert_eq!(state.get("1").unwrap().title, "a");
    }

    #[test]
    fn test_delete_filters_by_id() {
        let mut state = TaskListState::default();
        state.set_tasks(vec![task("1", "a"), task("2", "b")]);

        state.apply_deleted("1");

        assert_eq!(state.len(), 1);
        assert!(state.get("1").is_none());
    }

    #[test]
    fn test_toggle_twice_restores_original_state() {
        let now: DateTime<Utc> = "2026-08-30T12:00:00Z".parse().unwrap();
        let mut state = TaskListState::default();
        state.set_tasks(vec![task("1", "a")]);

        state.apply_completion("1", true, now);
        assert!(state.get("1").unwrap().completed);
        assert_eq!(state.get("1").unwrap().completed_at, Some(now));

        state.apply_completion("1", false, now);
        assert!(!state.get("1").unwrap().completed);
        assert!(state.get("1").unwrap().completed_at.is_none());
    }

    #[test]
    fn test_fetch_failure_leaves_list_unchanged() {
        let mut state = TaskListState::default();
        state.set_tasks(vec![task("1", "a"), task("2", "b")]);

        state.loading = true;
        state.fetch_failed();

        assert!(!state.loading);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_row_edit_cancel() {
        let mut row = RowState::default();
        assert_eq!(row.mode, RowMode::Display);

        row.edit();
        assert!(row.is_editing());

        row.cancel();
        assert_eq!(row.mode, RowMode::Display);
    }

    #[test]
    fn test_row_submit_disables_until_finished() {
        let mut row = RowState::default();
        row.edit();
        row.begin_submit();
        assert!(row.submitting);

        // Edit/cancel are ignored while a request is pending.
        row.cancel();
        assert!(row.is_editing());

        row.finish_submit(true);
        assert!(!row.submitting);
        assert_eq!(row.mode, RowMode::Display);
    }

    #[test]
    fn test_row_failed_save_stays_editing() {
        let mut row = RowState::default();
        row.edit();
        row.begin_submit();
        row.finish_submit(false);

        assert!(row.is_editing());
        assert!(!row.submitting);
    }
}
