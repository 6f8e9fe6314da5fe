//! Calendar events and the invitations in Calendar INBOX.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use super::{Attendee, EventAccess, EventLabel, FreeBusyStatus, RecurrenceRule, Reminder};
use crate::items::Items;
use crate::params::{self, Single};
use crate::types::{
    BatchResult, CreateResult, ErrorsResult, ItemError, KId, Page, PriorityType, SearchQuery,
    SetResult, UtcDateTime, Watermark,
};

/// Calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
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
    /// Time transparency.
    pub free_busy: FreeBusyStatus,
    /// Hidden from users the folder is shared with.
    pub is_private: bool,
    /// Whole-day item without a time of day.
    pub is_all_day: bool,
    /// Priority.
    pub priority: PriorityType,
    /// Recurrence rule.
    pub rule: RecurrenceRule,
    /// Attendees.
    pub attendees: Vec<Attendee>,
    /// Reminder.
    pub reminder: Reminder,
    /// Cancelled by the organizer. Read-only.
    pub is_cancelled: bool,
}

impl Event {
    /// Creates an event in `folder_id`.
    #[must_use]
    pub fn new(
        folder_id: KId,
        summary: impl Into<String>,
        start: UtcDateTime,
        end: UtcDateTime,
    ) -> Self {
        Self {
            folder_id,
            summary: summary.into(),
            start,
            end,
            ..Self::default()
        }
    }
}

/// Kind of message in Calendar INBOX.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventUpdateType {
    /// Invitation.
    #[default]
    #[serde(rename = "EUpdateRequest")]
    Request,
    /// Attendee response.
    #[serde(rename = "EUpdateReply")]
    Reply,
    /// The organizer cancelled.
    #[serde(rename = "EUpdateCancel")]
    Cancel,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// What an update changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventActionType {
    /// The event was created.
    #[default]
    #[serde(rename = "EActionCreate")]
    Create,
    /// Time changed.
    #[serde(rename = "EActionChangedTime")]
    ChangedTime,
    /// Title changed.
    #[serde(rename = "EActionChangedSummary")]
    ChangedSummary,
    /// Location changed.
    #[serde(rename = "EActionChangedLocation")]
    ChangedLocation,
    /// Description changed.
    #[serde(rename = "EActionChangedDescription")]
    ChangedDescription,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Invitation or update stored in Calendar INBOX. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventUpdate {
    /// Mail carrying the update.
    pub id: KId,
    /// Event the update refers to.
    pub event_id: KId,
    /// Folder of that event.
    pub event_folder_id: KId,
    /// First occurrence when the whole series changed.
    pub occurrence_id: KId,
    /// Concerns a single occurrence of a recurring event.
    pub is_exception: bool,
    /// Sequence number of the update.
    pub seq_number: i32,
    /// Superseded by a later update.
    pub is_obsolete: bool,
    /// When the update arrived.
    pub delivery_time: UtcDateTime,
    /// Kind of update.
    #[serde(rename = "type")]
    pub kind: EventUpdateType,
    /// Title.
    pub summary: String,
    /// Location.
    pub location: String,
    /// Start time.
    pub start: UtcDateTime,
    /// End time.
    pub end: UtcDateTime,
    /// End of the last occurrence.
    pub total_end: UtcDateTime,
    /// Description.
    pub description: String,
    /// Attendee who sent the update.
    pub attendee: Attendee,
    /// What the update changes.
    pub actions: Vec<EventActionType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatesReply {
    #[serde(default)]
    errors: Vec<ItemError>,
    #[serde(default)]
    event_updates: Vec<EventUpdate>,
}

/// `Events.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    conn: &'a Connection,
    items: Items<'a>,
}

impl<'a> Events<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            items: Items::new(conn, "Events", "events"),
        }
    }

    /// Lists events of the given calendar folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, ids: &[KId], query: &SearchQuery) -> Result<Page<Event>> {
        #[derive(Serialize)]
        struct Params<'p> {
            ids: &'p [KId],
            query: &'p SearchQuery,
        }

        self.conn.call("Events.get", &Params { ids, query }).await
    }

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id(&self, id: &KId) -> Result<Event> {
        #[derive(Deserialize)]
        struct Reply {
            result: Event,
        }

        let reply: Reply = self
            .conn
            .call("Events.getById", &Single::new("id", id))
            .await?;
        Ok(reply.result)
    }

    /// Fetches updates from Calendar INBOX by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_event_updates(
        &self,
        ids: &[KId],
    ) -> Result<(Vec<ItemError>, Vec<EventUpdate>)> {
        let reply: UpdatesReply = self
            .conn
            .call("Events.getEventUpdates", &params::ids(ids))
            .await?;
        Ok((reply.errors, reply.event_updates))
    }

    /// Returns every update in Calendar INBOX.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_event_update_list(&self) -> Result<Vec<EventUpdate>> {
        let reply: UpdatesReply = self
            .conn
            .call_without_params("Events.getEventUpdateList")
            .await?;
        Ok(reply.event_updates)
    }

    /// Returns updates from the Calendar INBOX of shared mailboxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_shared_event_update_list(
        &self,
        mailbox_ids: &[KId],
    ) -> Result<(Vec<ItemError>, Vec<EventUpdate>)> {
        let reply: UpdatesReply = self
            .conn
            .call(
                "Events.getSharedEventUpdateList",
                &Single::new("mailboxIds", mailbox_ids),
            )
            .await?;
        Ok((reply.errors, reply.event_updates))
    }

    /// Removes events.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        self.items.remove(ids).await
    }

    /// Removes updates from Calendar INBOX.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove_event_updates(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        let reply: ErrorsResult = self
            .conn
            .call("Events.removeEventUpdates", &params::ids(ids))
            .await?;
        Ok(reply.errors)
    }

    /// Copies events to `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn copy(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.items.copy(ids, folder).await
    }

    /// Creates events.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(&self, events: &[Event]) -> Result<BatchResult<CreateResult>> {
        self.items.create(events).await
    }

    /// Imports an event from an iCalendar attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create_from_attachment(&self, attachment_id: &KId) -> Result<CreateResult> {
        #[derive(Deserialize)]
        struct Reply {
            result: CreateResult,
        }

        let reply: Reply = self
            .conn
            .call(
                "Events.createFromAttachment",
                &Single::new("attachmentId", attachment_id),
            )
            .await?;
        Ok(reply.result)
    }

    /// Updates events.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, events: &[Event]) -> Result<BatchResult<SetResult>> {
        self.items.set(events).await
    }

    /// Moves events to `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn move_to(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.items.move_to(ids, folder).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_update_wire_format() {
        let update: EventUpdate = serde_json::from_value(json!({
            "id": "m1",
            "eventId": "e1",
            "type": "EUpdateReply",
            "attendee": {"emailAddress": "b@example.com", "partStatus": "PartAccepted"},
            "actions": ["EActionChangedTime", "EActionChangedLocation"]
        }))
        .unwrap();
        assert_eq!(update.kind, EventUpdateType::Reply);
        assert_eq!(
            update.actions,
            vec![EventActionType::ChangedTime, EventActionType::ChangedLocation]
        );
        assert_eq!(update.attendee.part_status, crate::calendar::PartStatus::Accepted);
    }

    #[test]
    fn test_event_new() {
        let event = Event::new(
            KId::new("cal"),
            "Standup",
            UtcDateTime::new("20250101T090000+0000"),
            UtcDateTime::new("20250101T091500+0000"),
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["folderId"], "cal");
        assert_eq!(value["freeBusy"], "Busy");
        assert_eq!(value["access"], "EAccessCreator");
        assert_eq!(value["label"], "None");
    }
}
