//! The task board controller
//!
//! A [`TaskBoard`] is the state behind one view: the last-fetched task collection,
//! the calendar window, the selected date, and the pending new-task form. It issues
//! mutations through its [`TaskSource`] and re-fetches the whole collection after
//! each successful one. There is no optimistic update and no rollback: the board
//! only ever displays the last server state it managed to fetch.
//!
//! Each view (today, weekly, monthly, and every special day) owns its own board;
//! boards share nothing and each one re-fetches independently.

use chrono::NaiveDate;

use crate::feedback::{Feedback, Notice};
use crate::task::{NewTask, Task, TaskId, TaskStatus};
use crate::traits::TaskSource;
use crate::window::{self, DateWindow, ViewMode};

/// The current calendar date, in the user's timezone
fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The view state of one task board
pub struct TaskBoard<S: TaskSource> {
    source: S,

    window: DateWindow,
    selected_date: NaiveDate,

    /// The task collection as last fetched. Replaced wholesale on every successful
    /// load, left untouched on failure (stale but available)
    tasks: Vec<Task>,
    loading: bool,

    draft_title: String,
    draft_description: String,

    feedback: Feedback,
}

impl<S: TaskSource> TaskBoard<S> {
    /// Create a board of the given mode, anchored at the current date.
    /// No task is fetched yet, see [`Self::load`]
    pub fn new(source: S, mode: ViewMode) -> Self {
        Self::anchored_at(source, mode, today_local())
    }

    /// Create a board anchored at an explicit date instead of the wall clock.
    /// This is what makes window math and selection defaults testable
    pub fn anchored_at(source: S, mode: ViewMode, today: NaiveDate) -> Self {
        let window = DateWindow::new(mode, today);
        let selected_date = window::default_selection(window.dates(), today);
        Self {
            source,
            window,
            selected_date,
            tasks: Vec::new(),
            loading: false,
            draft_title: String::new(),
            draft_description: String::new(),
            feedback: Feedback::new(),
        }
    }

    /// Create a board pinned to a single arbitrary date (a special day).
    ///
    /// The window contains only that date, so the selection can never move
    pub fn pinned(source: S, date: NaiveDate) -> Self {
        Self::anchored_at(source, ViewMode::Day, date)
    }

    /// Fetch the task collection and replace the local snapshot with it.
    ///
    /// Without a credential this fails silently: a diagnostic is logged but the user
    /// sees nothing. A network or API failure becomes a transient notice and leaves
    /// the previous snapshot in place
    pub async fn load(&mut self) {
        if self.source.is_authenticated() == false {
            log::error!("Access token not found, not fetching tasks");
            return;
        }

        self.loading = true;
        match self.source.fetch_tasks().await {
            Ok(tasks) => {
                self.tasks = tasks;
            },
            Err(err) => {
                self.feedback.error(&format!("Error fetching tasks: {}", err));
            },
        }
        self.loading = false;
    }

    /// Select a date of the current window.
    ///
    /// Dates outside the computed range are ignored, which also keeps pinned boards
    /// pinned. Selecting clears the pending form, so a half-typed task cannot be
    /// accidentally submitted against another date
    pub fn select_date(&mut self, day: NaiveDate) {
        if self.window.contains(day) == false {
            log::debug!("Ignoring selection of {}: not in the current window", day);
            return;
        }
        self.selected_date = day;
        self.draft_title.clear();
        self.draft_description.clear();
    }

    pub fn set_draft_title(&mut self, text: &str) {
        self.draft_title = text.to_string();
    }
    pub fn set_draft_description(&mut self, text: &str) {
        self.draft_description = text.to_string();
    }
    pub fn draft_title(&self) -> &str       { &self.draft_title }
    pub fn draft_description(&self) -> &str { &self.draft_description }

    /// Submit the pending form as a new task due on the selected date.
    ///
    /// A blank title or description makes this a silent no-op: no request is sent,
    /// no notice is shown. On success the form is cleared and the collection is
    /// re-fetched; on failure the form is kept so the user can retry
    pub async fn submit_new_task(&mut self) {
        if self.draft_title.trim().is_empty() || self.draft_description.trim().is_empty() {
            return;
        }
        if self.source.is_authenticated() == false {
            log::error!("Access token not found, not creating the task");
            return;
        }

        let new_task = NewTask::new(
            self.draft_title.clone(),
            self.draft_description.clone(),
            self.selected_date,
        );
        match self.source.create_task(&new_task).await {
            Ok(()) => {
                self.draft_title.clear();
                self.draft_description.clear();
                self.feedback.success("Task added.");
                self.load().await;
            },
            Err(err) => {
                self.feedback.error(&format!("Error adding task: {}", err));
            },
        }
    }

    /// Mark an in-progress task as done
    pub async fn mark_completed(&mut self, id: TaskId) {
        self.set_status(id, TaskStatus::Done, "Task marked as completed.").await;
    }

    /// Mark a done task as in-progress again
    pub async fn reactivate(&mut self, id: TaskId) {
        self.set_status(id, TaskStatus::InProgress, "Task reactivated.").await;
    }

    async fn set_status(&mut self, id: TaskId, status: TaskStatus, success_text: &str) {
        if self.source.is_authenticated() == false {
            log::error!("Access token not found, not updating task {}", id);
            return;
        }

        match self.source.set_status(id, status).await {
            Ok(()) => {
                self.feedback.success(success_text);
                self.load().await;
            },
            Err(err) => {
                self.feedback.error(&format!("Error updating task status: {}", err));
            },
        }
    }

    /// Delete a task
    pub async fn delete_task(&mut self, id: TaskId) {
        if self.source.is_authenticated() == false {
            log::error!("Access token not found, not deleting task {}", id);
            return;
        }

        match self.source.delete_task(id).await {
            Ok(()) => {
                self.feedback.success("Task deleted.");
                self.load().await;
            },
            Err(err) => {
                self.feedback.error(&format!("Error deleting task: {}", err));
            },
        }
    }

    // Window navigation. The selection deliberately persists across week
    // navigation instead of resetting to a default

    pub fn next_week(&mut self) {
        self.window.next_week();
    }
    pub fn previous_week(&mut self) {
        self.window.previous_week();
    }
    pub fn scroll_back(&mut self) {
        self.window.scroll_back();
    }
    pub fn scroll_forward(&mut self) {
        self.window.scroll_forward();
    }

    pub fn window(&self) -> &DateWindow     { &self.window }
    pub fn selected_date(&self) -> NaiveDate { self.selected_date }
    pub fn is_loading(&self) -> bool        { self.loading }
    pub fn tasks(&self) -> &[Task]          { &self.tasks }

    /// Hand over the pending notices for display
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.feedback.take()
    }

    /// The tasks due on the selected date, in the order the API returned them
    pub fn tasks_for_selected_date(&self) -> Vec<&Task> {
        self.tasks.iter()
            .filter(|task| task.is_due_on(self.selected_date))
            .collect()
    }

    /// The in-progress partition of [`Self::tasks_for_selected_date`]
    pub fn in_progress(&self) -> Vec<&Task> {
        self.tasks_for_selected_date().into_iter()
            .filter(|task| task.status().is_done() == false)
            .collect()
    }

    /// The done partition of [`Self::tasks_for_selected_date`]
    pub fn done(&self) -> Vec<&Task> {
        self.tasks_for_selected_date().into_iter()
            .filter(|task| task.status().is_done())
            .collect()
    }
}
