#[cfg(test)]
#[path = "tasks_test.rs"]
mod tests;

use tokio::sync::watch;

use crate::api::ArcTaskApi;
use crate::models::{ArcNotifier, NoticeMessage, Status, Task};

/// Owns the authoritative in-memory copy of the remote collection and the
/// active priority filter, and publishes both as watch channels so any
/// reader always sees the latest full snapshot.
///
/// The controller never edits its snapshot speculatively. Every mutation
/// calls the API and then re-fetches the whole list; `refresh` is the only
/// writer of the snapshot, and it replaces the vector in a single
/// `send_replace`. If two operations overlap, whichever trailing refresh
/// lands last wins.
///
/// Transport errors are logged and swallowed at each operation boundary;
/// the snapshot stays at its pre-call value. Validation errors surface as
/// error notices before any network call is made.
pub struct TaskController {
    api: ArcTaskApi,
    notifier: ArcNotifier,
    tasks: watch::Sender<Vec<Task>>,
    filter: watch::Sender<Option<String>>,
}

impl TaskController {
    pub fn new(api: ArcTaskApi, notifier: ArcNotifier) -> TaskController {
        TaskController {
            api,
            notifier,
            tasks: watch::Sender::new(Vec::new()),
            filter: watch::Sender::new(None),
        }
    }

    /// Re-fetch the whole collection and atomically replace the snapshot.
    /// On failure the snapshot is left unchanged.
    pub async fn refresh(&self) {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                self.tasks.send_replace(tasks);
            }
            Err(err) => log::error!("Failed to refresh tasks: {}", err),
        }
    }

    /// Create a draft task, persist it, then resynchronize. Blank fields
    /// are rejected before any network call.
    pub async fn add(&self, name: &str, priority: &str) {
        if name.trim().is_empty() || priority.trim().is_empty() {
            self.send_notice(NoticeMessage::error("All fields are required"))
                .await;
            return;
        }

        match self.api.create_task(Task::new(name, priority)).await {
            Ok(_) => {
                self.refresh().await;
                self.send_notice(NoticeMessage::info(format!("Task added: {}", name)))
                    .await;
            }
            Err(err) => log::error!("Failed to add task: {}", err),
        }
    }

    pub async fn remove(&self, id: u64) {
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.refresh().await;
                self.send_notice(NoticeMessage::info("Task deleted")).await;
            }
            Err(err) => log::error!("Failed to delete task {}: {}", id, err),
        }
    }

    /// Replace the task with its status advanced one step in the cycle,
    /// then resynchronize. Intentionally emits no notice.
    pub async fn toggle_status(&self, task: &Task) {
        let updated = task.clone().with_status(task.status().next());
        match self.api.replace_task(task.id(), updated).await {
            Ok(_) => self.refresh().await,
            Err(err) => log::error!("Failed to toggle task {}: {}", task.id(), err),
        }
    }

    /// Full replacement of an existing task. Same validation as `add`.
    pub async fn update(&self, id: u64, name: &str, priority: &str, status: Status) {
        if name.trim().is_empty() || priority.trim().is_empty() {
            self.send_notice(NoticeMessage::error("All fields are required"))
                .await;
            return;
        }

        let updated = Task::new(name, priority).with_id(id).with_status(status);
        match self.api.replace_task(id, updated).await {
            Ok(_) => {
                self.refresh().await;
                self.send_notice(NoticeMessage::info(format!("Task updated: {}", name)))
                    .await;
            }
            Err(err) => log::error!("Failed to update task {}: {}", id, err),
        }
    }

    /// Pure state assignment, no network call.
    pub fn set_filter(&self, priority: Option<String>) {
        self.filter.send_replace(priority);
    }

    pub fn filter(&self) -> Option<String> {
        self.filter.borrow().clone()
    }

    /// Latest full snapshot, in server order.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Snapshot restricted to the active filter. Priorities are compared
    /// case-insensitively; no filter (or an empty one) returns everything.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        let filter = self.filter.borrow().clone();
        let tasks = self.tasks.borrow().clone();
        match filter.as_deref() {
            Some(priority) if !priority.is_empty() => tasks
                .into_iter()
                .filter(|t| t.priority().eq_ignore_ascii_case(priority))
                .collect(),
            _ => tasks,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks.subscribe()
    }

    pub fn subscribe_filter(&self) -> watch::Receiver<Option<String>> {
        self.filter.subscribe()
    }

    async fn send_notice(&self, notice: NoticeMessage) {
        self.notifier.notify(notice).await.unwrap_or_else(|err| {
            log::error!("Failed to send notice: {}", err);
        });
    }
}
