//! Single instances of (possibly recurring) events.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use super::{
    Attendee, EventAccess, EventLabel, FreeBusyStatus, PartStatusResponse, RecurrenceRule,
    Reminder,
};
use crate::params::{FolderQuery, Single};
use crate::types::{
    BatchResult, ErrorsResult, ItemError, KId, Page, PriorityType, SearchQuery, SetResult,
    UtcDateTime, Watermark,
};

/// Scope of a change made through an occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModificationType {
    /// Every occurrence.
    #[default]
    #[serde(rename = "modifyAll")]
    All,
    /// This occurrence only.
    #[serde(rename = "modifyThis")]
    This,
    /// This and all later occurrences.
    #[serde(rename = "modifyAllFollowing")]
    AllFollowing,
    /// The series master.
    #[serde(rename = "modifyMasterEvent")]
    MasterEvent,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// One instance of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Occurrence {
    /// Read-only.
    pub id: KId,
    /// Event this occurrence belongs to. Read-only.
    pub event_id: KId,
    /// Folder holding the item.
    pub folder_id: KId,
    /// Item version.
    pub watermark: Watermark,
    /// Right of the current user.
    pub access: EventAccess,
    /// Title.
    pub summary: String,
    /// Location.
    pub location: String,
    /// Description.
    pub description: String,
    /// Label.
    pub label: EventLabel,
    /// Category names.
    pub categories: Vec<String>,
    /// Start time.
    pub start: UtcDateTime,
    /// End time.
    pub end: UtcDateTime,
    /// Travel time before the start, in minutes.
    pub travel_minutes: i32,
    /// Free/busy status.
    pub free_busy: FreeBusyStatus,
    /// Hidden from users the folder is shared with.
    pub is_private: bool,
    /// Whole-day item without a time of day.
    pub is_all_day: bool,
    /// Priority.
    pub priority: PriorityType,
    /// Not filled in listings.
    pub rule: RecurrenceRule,
    /// Attendees.
    pub attendees: Vec<Attendee>,
    /// Not filled in listings.
    pub reminder: Reminder,
    /// Concerns a single occurrence of a recurring event.
    pub is_exception: bool,
    /// A reminder is set.
    pub has_reminder: bool,
    /// Part of a recurring series.
    pub is_recurrent: bool,
    /// Cancelled by the organizer.
    pub is_cancelled: bool,
    /// Sequence number of the update.
    pub seq_number: i32,
    /// Write-only.
    pub modification: ModificationType,
}

/// `Occurrences.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Occurrences<'a> {
    conn: &'a Connection,
}

impl<'a> Occurrences<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Lists occurrences of the given calendar folders.
    ///
    /// The query usually bounds `start` and `end`; recurring events
    /// expand to one entry per instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, folder_ids: &[KId], query: &SearchQuery) -> Result<Page<Occurrence>> {
        self.conn
            .call("Occurrences.get", &FolderQuery { folder_ids, query })
            .await
    }

    /// Fetches occurrences by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id(&self, ids: &[KId]) -> Result<BatchResult<Occurrence>> {
        self.conn
            .call("Occurrences.getById", &crate::params::ids(ids))
            .await
    }

    /// Parses an occurrence from an iCalendar attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_from_attachment(&self, attachment_id: &KId) -> Result<Occurrence> {
        #[derive(Deserialize)]
        struct Reply {
            result: Occurrence,
        }

        let reply: Reply = self
            .conn
            .call(
                "Occurrences.getFromAttachment",
                &Single::new("attachmentId", attachment_id),
            )
            .await?;
        Ok(reply.result)
    }

    /// Removes occurrences, each scoped by its `modification`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, occurrences: &[Occurrence]) -> Result<Vec<ItemError>> {
        let reply: ErrorsResult = self
            .conn
            .call(
                "Occurrences.remove",
                &Single::new("occurrences", occurrences),
            )
            .await?;
        Ok(reply.errors)
    }

    /// Updates occurrences, each scoped by its `modification`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, occurrences: &[Occurrence]) -> Result<BatchResult<SetResult>> {
        self.conn
            .call("Occurrences.set", &Single::new("occurrences", occurrences))
            .await
    }

    /// Answers an invitation.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_part_status(&self, id: &KId, response: &PartStatusResponse) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'p> {
            id: &'p KId,
            response: &'p PartStatusResponse,
        }

        self.conn
            .call_unit("Occurrences.setPartStatus", &Params { id, response })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_modification_wire_format() {
        let occurrence = Occurrence {
            id: KId::new("o1"),
            modification: ModificationType::AllFollowing,
            ..Occurrence::default()
        };
        let value = serde_json::to_value(&occurrence).unwrap();
        assert_eq!(value["modification"], "modifyAllFollowing");
        assert_eq!(value["eventId"], "");
    }
}
