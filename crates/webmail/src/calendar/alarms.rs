//! Pending reminders of events and tasks.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::changes::ItemType;
use crate::params::Single;
use crate::types::{ErrorsResult, ItemError, KId, ListResult, UtcDateTime, UtcTime};

/// Reminder due for an occurrence or task. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alarm {
    /// [`ItemType::Calendar`] or [`ItemType::Task`].
    #[serde(rename = "type")]
    pub kind: ItemType,
    /// Occurrence id.
    pub item_id: KId,
    /// Event or task id.
    pub base_id: KId,
    /// Title.
    pub summary: String,
    /// Location.
    pub location: String,
    /// May be empty for tasks.
    pub start: UtcDateTime,
    /// May be empty for tasks. Start of the next day for all-day events.
    pub end: UtcDateTime,
    /// Tasks only.
    pub due: UtcDateTime,
    /// Whole-day item without a time of day.
    pub is_all_day: bool,
    /// When the reminder fires.
    pub reminder_time: UtcDateTime,
}

/// `Alarms.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Alarms<'a> {
    conn: &'a Connection,
}

impl<'a> Alarms<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Dismisses alarms.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn dismiss(&self, item_ids: &[KId]) -> Result<Vec<ItemError>> {
        let reply: ErrorsResult = self
            .conn
            .call("Alarms.dismiss", &Single::new("itemIds", item_ids))
            .await?;
        Ok(reply.errors)
    }

    /// Returns alarms with a reminder time in `since..until`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, since: &UtcTime, until: &UtcTime) -> Result<Vec<Alarm>> {
        #[derive(Serialize)]
        struct Params<'p> {
            since: &'p UtcTime,
            until: &'p UtcTime,
        }

        let reply: ListResult<Alarm> = self
            .conn
            .call("Alarms.get", &Params { since, until })
            .await?;
        Ok(reply.list)
    }

    /// Snoozes alarms until `next_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, next_time: &UtcTime, item_ids: &[KId]) -> Result<Vec<ItemError>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            next_time: &'p UtcTime,
            item_ids: &'p [KId],
        }

        let reply: ErrorsResult = self
            .conn
            .call("Alarms.set", &Params { next_time, item_ids })
            .await?;
        Ok(reply.errors)
    }
}
