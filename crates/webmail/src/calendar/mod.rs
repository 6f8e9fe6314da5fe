//! Calendar: events, their occurrences, free/busy lookup and alarms.
//!
//! The types here are shared by events, occurrences and tasks.

mod alarms;
mod events;
mod free_busy;
mod occurrences;

pub use alarms::{Alarm, Alarms};
pub use events::{Event, EventActionType, EventUpdate, EventUpdateType, Events};
pub use free_busy::{FreeBusy, FreeBusyInterval};
pub use occurrences::{ModificationType, Occurrence, Occurrences};

use serde::{Deserialize, Serialize};

use crate::types::UtcDateTime;

/// Time transparency of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreeBusyStatus {
    /// Opaque.
    #[default]
    Busy,
    /// Tentatively busy.
    Tentative,
    /// Transparent.
    Free,
    /// Out of office.
    OutOfOffice,
    /// Not available.
    NotAvailable,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Color label of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLabel {
    /// No label.
    #[default]
    None,
    /// Important.
    Important,
    /// Business.
    Business,
    /// Personal.
    Personal,
    /// Vacation.
    Vacation,
    /// Must attend.
    MustAttend,
    /// Travel required.
    TravelRequired,
    /// Needs preparation.
    NeedsPreparation,
    /// Birthday.
    BirthDay,
    /// Anniversary.
    Anniversary,
    /// Phone call.
    PhoneCall,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Role of an attendee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendeeRole {
    /// Organizer.
    #[serde(rename = "RoleOrganizer")]
    Organizer,
    /// Required attendee.
    #[default]
    #[serde(rename = "RoleRequiredAttendee")]
    RequiredAttendee,
    /// Optional attendee.
    #[serde(rename = "RoleOptionalAttendee")]
    OptionalAttendee,
    /// Room.
    #[serde(rename = "RoleRoom")]
    Room,
    /// Equipment.
    #[serde(rename = "RoleEquipment")]
    Equipment,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Participation status of an attendee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartStatus {
    /// Needs action.
    #[default]
    #[serde(rename = "PartNotResponded")]
    NotResponded,
    /// Accepted.
    #[serde(rename = "PartAccepted")]
    Accepted,
    /// Declined.
    #[serde(rename = "PartDeclined")]
    Declined,
    /// Delegated.
    #[serde(rename = "PartDelegated")]
    Delegated,
    /// Tentatively accepted.
    #[serde(rename = "PartTentative")]
    Tentative,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Reply to an invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartStatusResponse {
    /// Reply.
    pub status: PartStatus,
    /// Note to the organizer.
    pub message: String,
}

/// Event attendee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attendee {
    /// Display name.
    pub display_name: String,
    /// Required.
    pub email_address: String,
    /// Required.
    pub role: AttendeeRole,
    /// Notified of updates by email (RSVP). Read-only.
    pub is_notified: bool,
    /// Read-only.
    pub part_status: PartStatus,
}

impl Attendee {
    /// Creates an attendee with the given role.
    #[must_use]
    pub fn new(email_address: impl Into<String>, role: AttendeeRole) -> Self {
        Self {
            email_address: email_address.into(),
            role,
            ..Self::default()
        }
    }
}

/// How a reminder time is specified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderType {
    /// Relative to the start.
    #[default]
    #[serde(rename = "ReminderRelative")]
    Relative,
    /// At a fixed time.
    #[serde(rename = "ReminderAbsolute")]
    Absolute,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Reminder of an event or task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reminder {
    /// A reminder is set.
    pub is_set: bool,
    /// Absolute or relative.
    #[serde(rename = "type")]
    pub kind: ReminderType,
    /// Used by relative reminders.
    pub minutes_before_start: i32,
    /// Used by absolute reminders.
    pub date: UtcDateTime,
}

impl Reminder {
    /// A reminder `minutes` before start.
    #[must_use]
    pub fn before_start(minutes: i32) -> Self {
        Self {
            is_set: true,
            kind: ReminderType::Relative,
            minutes_before_start: minutes,
            date: UtcDateTime::default(),
        }
    }
}

/// Recurrence period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyType {
    /// Daily.
    #[default]
    Daily,
    /// Weekly.
    Weekly,
    /// Monthly.
    Monthly,
    /// Yearly.
    Yearly,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// How a recurrence ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndByType {
    /// Never ends.
    #[default]
    #[serde(rename = "ByRecurrenceNever")]
    Never,
    /// Ends at a date.
    #[serde(rename = "ByRecurrenceDate")]
    Date,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// End of a recurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndBy {
    /// End condition.
    #[serde(rename = "type")]
    pub kind: EndByType,
    /// Until date, for [`EndByType::Date`].
    pub date: UtcDateTime,
}

/// Recurrence refinement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreciseBy {
    /// Days of the week.
    pub by_day: Vec<i64>,
    /// Days of the month.
    pub by_month_day: Vec<i64>,
    /// Months.
    pub by_month: Vec<i64>,
    /// 2 for the 2nd day, 3 for the 3rd.
    pub by_position: Vec<i64>,
    /// 2 for every 2nd period.
    pub by_interval: i32,
}

/// Recurrence rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurrenceRule {
    /// The item repeats.
    pub is_set: bool,
    /// Repetition frequency.
    pub frequency: FrequencyType,
    /// When the recurrence ends.
    pub end_by: EndBy,
    /// Precise repetition days.
    pub precise_by: PreciseBy,
}

/// Access of the user to an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventAccess {
    /// Created by the user.
    #[default]
    #[serde(rename = "EAccessCreator")]
    Creator,
    /// The user is invited.
    #[serde(rename = "EAccessInvitee")]
    Invitee,
    /// Read only.
    #[serde(rename = "EAccessReadOnly")]
    ReadOnly,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_wire_format() {
        let rule = RecurrenceRule {
            is_set: true,
            frequency: FrequencyType::Weekly,
            end_by: EndBy {
                kind: EndByType::Date,
                date: UtcDateTime::new("20250101T000000+0000"),
            },
            precise_by: PreciseBy {
                by_day: vec![1, 3],
                by_interval: 2,
                ..PreciseBy::default()
            },
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["frequency"], "Weekly");
        assert_eq!(value["endBy"]["type"], "ByRecurrenceDate");
        assert_eq!(value["preciseBy"]["byDay"], json!([1, 3]));
        assert_eq!(value["preciseBy"]["byInterval"], 2);
    }

    #[test]
    fn test_attendee_wire_format() {
        let attendee: Attendee = serde_json::from_value(json!({
            "emailAddress": "room@example.com",
            "role": "RoleRoom",
            "partStatus": "PartTentative"
        }))
        .unwrap();
        assert_eq!(attendee.role, AttendeeRole::Room);
        assert_eq!(attendee.part_status, PartStatus::Tentative);

        let value = serde_json::to_value(Attendee::new("a@example.com", AttendeeRole::Organizer))
            .unwrap();
        assert_eq!(value["role"], "RoleOrganizer");
        assert_eq!(value["partStatus"], "PartNotResponded");
    }

    #[test]
    fn test_reminder() {
        let value = serde_json::to_value(Reminder::before_start(15)).unwrap();
        assert_eq!(
            value,
            json!({"isSet": true, "type": "ReminderRelative", "minutesBeforeStart": 15, "date": ""})
        );
    }
}
