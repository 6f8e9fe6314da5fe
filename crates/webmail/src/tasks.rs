//! Tasks.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::calendar::{Attendee, EventAccess, RecurrenceRule, Reminder};
use crate::items::Items;
use crate::types::{
    BatchResult, CreateResult, ItemError, KId, Page, PriorityType, SearchQuery, SetResult,
    UtcDateTime, Watermark,
};

/// Progress of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    #[serde(rename = "tsNotStarted")]
    NotStarted,
    /// Completed.
    #[serde(rename = "tsCompleted")]
    Completed,
    /// In progress.
    #[serde(rename = "tsInProgress")]
    InProgress,
    /// Waiting on someone else.
    #[serde(rename = "tsWaiting")]
    Waiting,
    /// Deferred.
    #[serde(rename = "tsDeferred")]
    Deferred,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Task details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    /// Read-only.
    pub id: KId,
    /// Required for create. Write-once.
    pub folder_id: KId,
    /// Item version.
    pub watermark: Watermark,
    /// Read-only.
    pub access: EventAccess,
    /// Title.
    pub summary: String,
    /// Location.
    pub location: String,
    /// Description.
    pub description: String,
    /// Progress.
    pub status: TaskStatus,
    /// Start time.
    pub start: UtcDateTime,
    /// Deadline.
    pub due: UtcDateTime,
    /// Completion date, valid for [`TaskStatus::Completed`]. Read-only.
    pub end: UtcDateTime,
    /// Percent done. Always 100 once completed.
    pub done: i32,
    /// Priority.
    pub priority: PriorityType,
    /// Recurrence rule.
    pub rule: RecurrenceRule,
    /// Attendees.
    pub attendees: Vec<Attendee>,
    /// Reminder.
    pub reminder: Reminder,
    /// Zero sorts newest first.
    pub sort_order: i32,
    /// Hidden from users the folder is shared with.
    pub is_private: bool,
    /// Read-only.
    pub is_cancelled: bool,
}

impl Task {
    /// Creates a task in `folder_id`.
    #[must_use]
    pub fn new(folder_id: KId, summary: impl Into<String>) -> Self {
        Self {
            folder_id,
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Returns true once the task is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// `Tasks.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Tasks<'a> {
    items: Items<'a>,
}

impl<'a> Tasks<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            items: Items::new(conn, "Tasks", "tasks"),
        }
    }

    /// Lists tasks of the given folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, folder_ids: &[KId], query: &SearchQuery) -> Result<Page<Task>> {
        self.items.get(folder_ids, query).await
    }

    /// Fetches tasks by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id(&self, ids: &[KId]) -> Result<BatchResult<Task>> {
        self.items.get_by_id(ids).await
    }

    /// Removes tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        self.items.remove(ids).await
    }

    /// Copies tasks to `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn copy(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.items.copy(ids, folder).await
    }

    /// Creates tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(&self, tasks: &[Task]) -> Result<BatchResult<CreateResult>> {
        self.items.create(tasks).await
    }

    /// Updates tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, tasks: &[Task]) -> Result<BatchResult<SetResult>> {
        self.items.set(tasks).await
    }

    /// Moves tasks to `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn move_to(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.items.move_to(ids, folder).await
    }
}
