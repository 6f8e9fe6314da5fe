//! Folder selection for ActiveSync and iPhone synchronization.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::folders::{FolderPlaceType, FolderSubType, FolderType};
use crate::params::Single;
use crate::types::{ErrorsResult, ItemError, KId, ListResult};

/// Folder as offered for synchronization. Only `synchronize` is writable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncFolder {
    /// Folder id.
    pub id: KId,
    /// Parent folder.
    pub parent_id: KId,
    /// Folder name.
    pub name: String,
    /// Content type.
    #[serde(rename = "type")]
    pub kind: FolderType,
    /// Special-purpose role.
    pub sub_type: FolderSubType,
    /// Storage place.
    pub place_type: FolderPlaceType,
    /// 0 for a root folder, 1 for its children and so on.
    pub nesting_level: i32,
    /// Set for people, resource and location folders.
    pub owner_name: String,
    /// Set for people, resource and location folders.
    pub email_address: String,
    /// False if the setting cannot be changed.
    pub is_selectable: bool,
    /// Synchronized to devices.
    pub synchronize: bool,
}

/// `Integration.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Integration<'a> {
    conn: &'a Connection,
}

impl<'a> Integration<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    async fn get_list(&self, method: &str) -> Result<Vec<SyncFolder>> {
        let reply: ListResult<SyncFolder> = self.conn.call_without_params(method).await?;
        Ok(reply.list)
    }

    async fn set_list(&self, method: &str, folders: &[SyncFolder]) -> Result<Vec<ItemError>> {
        let reply: ErrorsResult = self
            .conn
            .call(method, &Single::new("folders", folders))
            .await?;
        Ok(reply.errors)
    }

    /// Lists folders with their ActiveSync flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_async_folder_list(&self) -> Result<Vec<SyncFolder>> {
        self.get_list("Integration.getASyncFolderList").await
    }

    /// Updates ActiveSync flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_async_folder_list(&self, folders: &[SyncFolder]) -> Result<Vec<ItemError>> {
        self.set_list("Integration.setASyncFolderList", folders)
            .await
    }

    /// Lists folders with their iPhone sync flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_iphone_sync_folder_list(&self) -> Result<Vec<SyncFolder>> {
        self.get_list("Integration.getIPhoneSyncFolderList").await
    }

    /// Updates iPhone sync flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_iphone_sync_folder_list(
        &self,
        folders: &[SyncFolder],
    ) -> Result<Vec<ItemError>> {
        self.set_list("Integration.setIPhoneSyncFolderList", folders)
            .await
    }
}
