//! Folder tree, sharing and subscriptions.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::{self, Single};
use crate::principals::Principal;
use crate::types::{BatchResult, CreateResult, ErrorsResult, ItemError, KId, ListResult};

/// Special folder roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderSubType {
    /// Ordinary folder.
    #[default]
    #[serde(rename = "FSubNone")]
    None,
    /// Inbox.
    #[serde(rename = "FSubInbox")]
    Inbox,
    /// Drafts.
    #[serde(rename = "FSubDrafts")]
    Drafts,
    /// Sent items.
    #[serde(rename = "FSubSentItems")]
    SentItems,
    /// Deleted items.
    #[serde(rename = "FSubDeletedItems")]
    DeletedItems,
    /// Junk email.
    #[serde(rename = "FSubJunkEmail")]
    JunkEmail,
    /// Default folder of its type, cannot be removed.
    #[serde(rename = "FSubDefault")]
    Default,
    /// Global address list resources.
    #[serde(rename = "FSubGalResources")]
    GalResources,
    /// Global address list contacts.
    #[serde(rename = "FSubGalContacts")]
    GalContacts,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Content type of a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderType {
    /// Root of a mailbox.
    #[serde(rename = "FRoot")]
    Root,
    /// Mail.
    #[default]
    #[serde(rename = "FMail")]
    Mail,
    /// Contact.
    #[serde(rename = "FContact")]
    Contact,
    /// Calendar.
    #[serde(rename = "FCalendar")]
    Calendar,
    /// Task.
    #[serde(rename = "FTask")]
    Task,
    /// Note.
    #[serde(rename = "FNote")]
    Note,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Where a folder lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderPlaceType {
    /// Mailbox of the logged-in user.
    #[default]
    #[serde(rename = "FPlaceMailbox")]
    Mailbox,
    /// Equipment resource.
    #[serde(rename = "FPlaceResources")]
    Resources,
    /// Room resource.
    #[serde(rename = "FPlaceLocations")]
    Locations,
    /// Folder shared by another user.
    #[serde(rename = "FPlacePeople")]
    People,
    /// Public folders.
    #[serde(rename = "FPlacePublic")]
    Public,
    /// Archive.
    #[serde(rename = "FPlaceArchive")]
    Archive,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Access right to a folder, ordered from least to most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderAccess {
    /// May list the folder only.
    #[serde(rename = "FAccessListingOnly")]
    ListingOnly,
    /// Read only.
    #[default]
    #[serde(rename = "FAccessReadOnly")]
    ReadOnly,
    /// Read and write.
    #[serde(rename = "FAccessReadWrite")]
    ReadWrite,
    /// Full access, including subfolder creation.
    #[serde(rename = "FAccessAdmin")]
    Admin,
    /// Value not known to this client. Ranks below every known access.
    #[serde(other)]
    Unknown,
}

impl FolderAccess {
    const fn rank(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::ListingOnly => 1,
            Self::ReadOnly => 2,
            Self::ReadWrite => 3,
            Self::Admin => 4,
        }
    }
}

impl PartialOrd for FolderAccess {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FolderAccess {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Access granted to one principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolderPermission {
    /// Granted right.
    pub access: FolderAccess,
    /// Grantee.
    pub principal: Principal,
    /// Inherited from a public root folder, read-only.
    pub inherited: bool,
    /// The principal is a delegate of the owner.
    pub is_delegatee: bool,
}

/// A folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Folder {
    /// Folder id.
    pub id: KId,
    /// Parent folder.
    pub parent_id: KId,
    /// Folder name.
    pub name: String,
    /// Owner display name.
    pub owner_name: String,
    /// Owner email address.
    pub email_address: String,
    /// Content type.
    #[serde(rename = "type")]
    pub kind: FolderType,
    /// Special-purpose role.
    pub sub_type: FolderSubType,
    /// Storage place.
    pub place_type: FolderPlaceType,
    /// Right of the current user.
    pub access: FolderAccess,
    /// Shared with other users.
    pub is_shared: bool,
    /// Accessible to delegates.
    pub is_delegated: bool,
    /// 0 for the root folder.
    pub nesting_level: i32,
    /// Number of messages.
    pub message_count: i64,
    /// Number of unread messages.
    pub message_unread: i64,
    /// Bytes, without subfolders.
    pub message_size: i64,
    /// Selected for display.
    pub checked: bool,
    /// Empty for no color.
    pub color: String,
    /// Published over the web.
    pub published: bool,
}

impl Folder {
    /// Creates a folder description for [`Folders::create`].
    #[must_use]
    pub fn new(parent_id: KId, name: impl Into<String>, kind: FolderType) -> Self {
        Self {
            parent_id,
            name: name.into(),
            kind,
            ..Self::default()
        }
    }
}

/// Mailbox of another user with the folders shared to the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedMailbox {
    /// Mailbox owner.
    pub principal: Principal,
    /// Root folder id.
    pub mailbox_id: KId,
    /// Folders are on the same home server.
    pub is_loaded: bool,
    /// Folders.
    pub folders: Vec<Folder>,
    /// Folders the user subscribed to.
    pub subscribed_folder_ids: Vec<KId>,
}

/// `Folders.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Folders<'a> {
    conn: &'a Connection,
}

impl<'a> Folders<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Removes all items of a folder up to and including `item_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn clear_to_item_id(&self, item_id: &KId) -> Result<()> {
        self.conn
            .call_unit("Folders.clearToItemId", &Single::new("itemId", item_id))
            .await
    }

    /// Creates folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails. Per-folder failures are in the
    /// returned [`BatchResult`].
    pub async fn create(&self, folders: &[Folder]) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call("Folders.create", &Single::new("folders", folders))
            .await
    }

    /// Lists folders of the user's own mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self) -> Result<Vec<Folder>> {
        let result: ListResult<Folder> = self.conn.call_without_params("Folders.get").await?;
        Ok(result.list)
    }

    /// Lists folders shared from another mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_shared(&self, mailbox_id: &KId) -> Result<Vec<Folder>> {
        let result: ListResult<Folder> = self
            .conn
            .call("Folders.getShared", &Single::new("mailboxId", mailbox_id))
            .await?;
        Ok(result.list)
    }

    /// Lists public folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_public(&self) -> Result<Vec<Folder>> {
        let result: ListResult<Folder> =
            self.conn.call_without_params("Folders.getPublic").await?;
        Ok(result.list)
    }

    /// Lists subscribed shared mailboxes with their folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_subscribed(&self) -> Result<Vec<SharedMailbox>> {
        let result: ListResult<SharedMailbox> =
            self.conn.call_without_params("Folders.getSubscribed").await?;
        Ok(result.list)
    }

    /// Returns the id of the contacts folder used for address completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_auto_complete_contacts_folder_id(&self) -> Result<KId> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            folder_id: KId,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Folders.getAutoCompleteContactsFolderId")
            .await?;
        Ok(reply.folder_id)
    }

    /// Lists all mailboxes sharing folders with the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_shared_mailbox_list(&self) -> Result<Vec<SharedMailbox>> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            mailboxes: Vec<SharedMailbox>,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Folders.getSharedMailboxList")
            .await?;
        Ok(reply.mailboxes)
    }

    /// Moves folders under `target_id`; only folders of the target's type
    /// are moved.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn move_by_type(&self, target_id: &KId, ids: &[KId]) -> Result<Vec<ItemError>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            target_id: &'p KId,
            ids: &'p [KId],
        }

        let result: ErrorsResult = self
            .conn
            .call("Folders.moveByType", &Params { target_id, ids })
            .await?;
        Ok(result.errors)
    }

    /// Updates folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, folders: &[Folder]) -> Result<Vec<ItemError>> {
        let result: ErrorsResult = self
            .conn
            .call("Folders.set", &Single::new("folders", folders))
            .await?;
        Ok(result.errors)
    }

    /// Removes folders, with subfolders if `recursive`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, ids: &[KId], recursive: bool) -> Result<Vec<ItemError>> {
        #[derive(Serialize)]
        struct Params<'p> {
            ids: &'p [KId],
            recursive: bool,
        }

        let result: ErrorsResult = self
            .conn
            .call("Folders.remove", &Params { ids, recursive })
            .await?;
        Ok(result.errors)
    }

    /// Removes folders, only those of the expected type.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove_by_type(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        let result: ErrorsResult = self
            .conn
            .call("Folders.removeByType", &params::ids(ids))
            .await?;
        Ok(result.errors)
    }

    /// Returns the permissions of a folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_permissions(&self, folder_id: &KId) -> Result<Vec<FolderPermission>> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            permissions: Vec<FolderPermission>,
        }

        let reply: Reply = self
            .conn
            .call("Folders.getPermissions", &Single::new("folderId", folder_id))
            .await?;
        Ok(reply.permissions)
    }

    /// Replaces the permissions of a folder, and of its subfolders if
    /// `recursive`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_permissions(
        &self,
        permissions: &[FolderPermission],
        folder_id: &KId,
        recursive: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            permissions: &'p [FolderPermission],
            folder_id: &'p KId,
            recursive: bool,
        }

        self.conn
            .call_unit(
                "Folders.setPermissions",
                &Params {
                    permissions,
                    folder_id,
                    recursive,
                },
            )
            .await
    }

    /// Returns the ids of subscribed shared folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_subscription_list(&self) -> Result<Vec<KId>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            folder_ids: Vec<KId>,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Folders.getSubscriptionList")
            .await?;
        Ok(reply.folder_ids)
    }

    /// Replaces the set of subscribed shared folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_subscription_list(&self, folder_ids: &[KId]) -> Result<()> {
        self.conn
            .call_unit(
                "Folders.setSubscriptionList",
                &Single::new("folderIds", folder_ids),
            )
            .await
    }

    /// Copies, or moves if `do_move`, every message of one folder into
    /// another.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn copy_all_messages(
        &self,
        source_id: &KId,
        dest_id: &KId,
        do_move: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            source_id: &'p KId,
            dest_id: &'p KId,
            do_move: bool,
        }

        self.conn
            .call_unit(
                "Folders.copyAllMessages",
                &Params {
                    source_id,
                    dest_id,
                    do_move,
                },
            )
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_folder_decode() {
        let folder: Folder = serde_json::from_value(json!({
            "id": "f1",
            "parentId": "root",
            "name": "Inbox",
            "type": "FMail",
            "subType": "FSubInbox",
            "placeType": "FPlaceMailbox",
            "access": "FAccessAdmin",
            "messageUnread": 4
        }))
        .unwrap();
        assert_eq!(folder.kind, FolderType::Mail);
        assert_eq!(folder.sub_type, FolderSubType::Inbox);
        assert_eq!(folder.access, FolderAccess::Admin);
        assert_eq!(folder.message_unread, 4);
    }

    #[test]
    fn test_new_folder_wire_names() {
        let folder = Folder::new(KId::new("root"), "Projects", FolderType::Calendar);
        let value = serde_json::to_value(&folder).unwrap();
        assert_eq!(value["type"], "FCalendar");
        assert_eq!(value["subType"], "FSubNone");
        assert_eq!(value["parentId"], "root");
    }

    #[test]
    fn test_access_ordering() {
        assert!(FolderAccess::Admin > FolderAccess::ReadWrite);
        assert!(FolderAccess::ListingOnly < FolderAccess::ReadOnly);
        assert!(FolderAccess::Unknown < FolderAccess::ListingOnly);
    }

    #[test]
    fn test_unknown_folder_values() {
        let folder: Folder = serde_json::from_value(json!({
            "id": "f2",
            "type": "FHologram",
            "subType": "FSubSomething",
            "access": "FAccessOwner"
        }))
        .unwrap();
        assert_eq!(folder.kind, FolderType::Unknown);
        assert_eq!(folder.sub_type, FolderSubType::Unknown);
        assert_eq!(folder.access, FolderAccess::Unknown);
        assert_eq!(folder.id.as_str(), "f2");
    }
}
