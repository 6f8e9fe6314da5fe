//! Change journal and the long-poll notification channel.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::Single;
use crate::types::{KId, Watermark};

/// Kind of change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// Created.
    #[default]
    #[serde(rename = "chtCreated")]
    Created,
    /// Copied.
    #[serde(rename = "chtCopied")]
    Copied,
    /// Deleted.
    #[serde(rename = "chtDeleted")]
    Deleted,
    /// Modified.
    #[serde(rename = "chtModified")]
    Modified,
    /// Moved.
    #[serde(rename = "chtMoved")]
    Moved,
    /// Mail items only, never folders. Not folder-filtered.
    #[serde(rename = "chtNewMail")]
    NewMail,
    /// Status changed.
    #[serde(rename = "chtStatus")]
    Status,
    /// Mail items only.
    #[serde(rename = "chtReadFlagChanged")]
    ReadFlagChanged,
    /// Mail flags changed, content did not.
    #[serde(rename = "chtModifiedMetadata")]
    ModifiedMetadata,
    /// Folders only: messages inside the folder changed.
    #[serde(rename = "chtModifiedContent")]
    ModifiedContent,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Kind of item a change or alarm refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Mail.
    #[default]
    #[serde(rename = "itMail")]
    Mail,
    /// Calendar.
    #[serde(rename = "itCalendar")]
    Calendar,
    /// Contact.
    #[serde(rename = "itContact")]
    Contact,
    /// Task.
    #[serde(rename = "itTask")]
    Task,
    /// Note.
    #[serde(rename = "itNote")]
    Note,
    /// Calendar inbox.
    #[serde(rename = "itCalendarInbox")]
    CalendarInbox,
    /// Delegation.
    #[serde(rename = "itDelegation")]
    Delegation,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Sync position of one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSyncKey {
    /// Account GUID.
    pub guid: String,
    /// Position in the account journal.
    pub watermark: Watermark,
}

/// Sync position across the user's own, public and shared folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncKey {
    /// Key id.
    pub id: i32,
    /// Key format version.
    pub version: i32,
    /// Position in the journal.
    pub watermark: Watermark,
    /// Watermark of public folders.
    pub public_folder: Watermark,
    /// Per-account keys of shared mailboxes.
    pub account_sync_key: Vec<AccountSyncKey>,
}

/// One journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Change {
    /// The change concerns a folder.
    pub is_folder: bool,
    /// Kind of change.
    #[serde(rename = "type")]
    pub kind: ChangeType,
    /// Kind of item changed.
    pub item_type: ItemType,
    /// Changed item.
    pub item_id: KId,
    /// Parent folder.
    pub parent_id: KId,
    /// Item id before a move or copy.
    pub orig_id: KId,
    /// Parent folder before a move or copy.
    pub orig_parent_id: KId,
    /// Item version after the change.
    pub watermark: Watermark,
    /// Unread count for [`ChangeType::ModifiedContent`], `1` for an unread
    /// message on [`ChangeType::ReadFlagChanged`].
    pub message_unread: i32,
}

/// Changes found since a sync key, with the key to continue from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeSet<K> {
    /// Changes in journal order.
    pub list: Vec<Change>,
    /// Key to continue from.
    pub sync_key: K,
}

/// `Changes.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Changes<'a> {
    conn: &'a Connection,
}

impl<'a> Changes<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Waits up to `timeout` seconds for changes after `last_sync_key`.
    ///
    /// A zero timeout returns immediately. Only one poll per sync key may
    /// be outstanding; [`Changes::kill_request`] ends it early. The HTTP
    /// timeout of this request is extended by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, last_sync_key: &SyncKey, timeout: u32) -> Result<ChangeSet<SyncKey>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            last_sync_key: &'p SyncKey,
            timeout: u32,
        }

        tracing::debug!(timeout, "Polling for changes");
        self.conn
            .call_with_timeout(
                "Changes.get",
                &Params {
                    last_sync_key,
                    timeout,
                },
                Duration::from_secs(u64::from(timeout)),
            )
            .await
    }

    /// Returns changes of one account, optionally limited to folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_account(
        &self,
        last_async_key: &AccountSyncKey,
        folder_ids: &[KId],
    ) -> Result<(Vec<Change>, AccountSyncKey)> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            last_async_key: &'p AccountSyncKey,
            folder_ids: &'p [KId],
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            list: Vec<Change>,
            #[serde(default)]
            async_key: AccountSyncKey,
        }

        let reply: Reply = self
            .conn
            .call(
                "Changes.getAccount",
                &Params {
                    last_async_key,
                    folder_ids,
                },
            )
            .await?;
        Ok((reply.list, reply.async_key))
    }

    /// Ends a pending [`Changes::get`] for the same sync key.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn kill_request(&self, last_sync_key: &SyncKey) -> Result<()> {
        self.conn
            .call_unit(
                "Changes.killRequest",
                &Single::new("lastSyncKey", last_sync_key),
            )
            .await
    }

    /// Returns changes of a single folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_folder(
        &self,
        folder_id: &KId,
        last_sync_key: Watermark,
    ) -> Result<ChangeSet<Watermark>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            folder_id: &'p KId,
            last_sync_key: Watermark,
        }

        self.conn
            .call(
                "Changes.getFolder",
                &Params {
                    folder_id,
                    last_sync_key,
                },
            )
            .await
    }

    /// Returns the current sync key.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_sync_key(&self) -> Result<SyncKey> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            sync_key: SyncKey,
        }

        let reply: Reply = self.conn.call_without_params("Changes.getSyncKey").await?;
        Ok(reply.sync_key)
    }

    /// Returns the current sync key of a mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_account_sync_key(&self, mailbox_id: &KId) -> Result<AccountSyncKey> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            async_key: AccountSyncKey,
        }

        let reply: Reply = self
            .conn
            .call(
                "Changes.getAccountSyncKey",
                &Single::new("mailboxId", mailbox_id),
            )
            .await?;
        Ok(reply.async_key)
    }

    /// Returns the current watermark of a folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_folder_sync_key(&self, folder_id: &KId) -> Result<Watermark> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            sync_key: Watermark,
        }

        let reply: Reply = self
            .conn
            .call(
                "Changes.getFolderSyncKey",
                &Single::new("folderId", folder_id),
            )
            .await?;
        Ok(reply.sync_key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_wire_format() {
        let change: Change = serde_json::from_value(json!({
            "isFolder": true,
            "type": "chtModifiedContent",
            "itemType": "itMail",
            "itemId": "f1",
            "watermark": 42,
            "messageUnread": 3
        }))
        .unwrap();
        assert!(change.is_folder);
        assert_eq!(change.kind, ChangeType::ModifiedContent);
        assert_eq!(change.item_type, ItemType::Mail);
        assert_eq!(change.watermark, Watermark(42));
        assert_eq!(change.message_unread, 3);
    }

    #[test]
    fn test_unknown_change_kinds_pass_through() {
        let set: ChangeSet<SyncKey> = serde_json::from_value(json!({
            "list": [
                {"type": "chtSomethingNew", "itemType": "itHologram", "itemId": "x1"},
                {"type": "chtDeleted", "itemType": "itNote", "itemId": "n1"}
            ],
            "syncKey": {"watermark": 9}
        }))
        .unwrap();
        assert_eq!(set.list[0].kind, ChangeType::Unknown);
        assert_eq!(set.list[0].item_type, ItemType::Unknown);
        assert_eq!(set.list[0].item_id.as_str(), "x1");
        assert_eq!(set.list[1].kind, ChangeType::Deleted);
        assert_eq!(set.sync_key.watermark, Watermark(9));
    }

    #[test]
    fn test_sync_key_wire_format() {
        let key = SyncKey {
            id: 1,
            version: 2,
            watermark: Watermark(10),
            public_folder: Watermark(5),
            account_sync_key: vec![AccountSyncKey {
                guid: "g".to_string(),
                watermark: Watermark(7),
            }],
        };
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({
                "id": 1,
                "version": 2,
                "watermark": 10,
                "publicFolder": 5,
                "accountSyncKey": [{"guid": "g", "watermark": 7}]
            })
        );
    }
}
