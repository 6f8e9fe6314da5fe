//! Mobile device synchronization types.

use serde::{Deserialize, Serialize};

use crate::types::{DateTimeStamp, UtcDateTime};

/// Remote wipe and connection status of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    /// No wipe pending.
    #[default]
    #[serde(rename = "OK")]
    Ok,
    /// Not fully provisioned yet.
    DeviceNotProvisioned,
    /// Wipe submitted.
    DeviceWipeInitiated,
    /// Wipe in progress.
    DeviceWipeInProgress,
    /// Wipe finished.
    DeviceWipeFinished,
    /// Connected.
    DeviceConnected,
    /// Disconnected.
    DeviceDisconnected,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Icon class of a synchronized folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FolderIcon {
    /// Mail.
    #[default]
    #[serde(rename = "FIMail")]
    Mail,
    /// Contact.
    #[serde(rename = "FIContact")]
    Contact,
    /// Calendar.
    #[serde(rename = "FICalendar")]
    Calendar,
    /// Tasks.
    #[serde(rename = "FITodo")]
    Todo,
    /// Journal.
    #[serde(rename = "FIJournal")]
    Journal,
    /// Note.
    #[serde(rename = "FINote")]
    Note,
    /// Inbox.
    #[serde(rename = "FIInbox")]
    Inbox,
    /// Deleted items.
    #[serde(rename = "FIDeleted")]
    Deleted,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// A folder synchronized to a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobileSyncFolder {
    /// Folder name.
    pub folder_name: String,
    /// Folder icon.
    pub folder_type_icon: FolderIcon,
    /// Last sync.
    pub last_sync_date: DateTimeStamp,
    /// Last sync.
    pub last_sync_date_iso: UtcDateTime,
}

/// Conflict resolution of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncMethod {
    /// Server wins conflicts.
    #[default]
    ServerWins,
    /// Client wins conflicts.
    ClientWins,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Synchronization protocol of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolType {
    /// ActiveSync.
    #[default]
    #[serde(rename = "protocolASync")]
    ActiveSync,
    /// Kerio BlackBerry Connector.
    #[serde(rename = "protocolKBC")]
    Kbc,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// A registered mobile device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobileDevice {
    /// Sync protocol.
    pub protocol_type: ProtocolType,
    /// Device id.
    pub device_id: String,
    /// ActiveSync protocol version.
    pub protocol_version: String,
    /// First registration.
    pub registration_date: DateTimeStamp,
    /// First registration.
    pub registration_date_iso: UtcDateTime,
    /// Last sync.
    pub last_sync_date: DateTimeStamp,
    /// Last sync.
    pub last_sync_date_iso: UtcDateTime,
    /// Synchronized folders.
    pub folder_list: Vec<MobileSyncFolder>,
    /// Device state.
    pub status: DeviceStatus,
    /// Conflict resolution method.
    pub method: SyncMethod,
    /// Typically the device IP address.
    pub remote_host: String,
    /// Operating system.
    pub os: String,
    /// Device platform.
    pub platform: String,
    /// Device icon name.
    pub device_icon: String,
}
