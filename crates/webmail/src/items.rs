//! Operations common to folder-stored item interfaces.
//!
//! Events, tasks and notes expose the same list and bulk methods under
//! their own interface name and params key.

use serde::Serialize;
use serde::de::DeserializeOwned;
use webmail_rpc::{Connection, Result};

use crate::params::{self, FolderQuery, IdsToFolder, Single};
use crate::types::{
    BatchResult, CreateResult, ErrorsResult, ItemError, KId, Page, SearchQuery, SetResult,
};

#[derive(Debug, Clone, Copy)]
pub struct Items<'a> {
    conn: &'a Connection,
    interface: &'static str,
    key: &'static str,
}

impl<'a> Items<'a> {
    pub const fn new(conn: &'a Connection, interface: &'static str, key: &'static str) -> Self {
        Self {
            conn,
            interface,
            key,
        }
    }

    fn method(&self, name: &str) -> String {
        format!("{}.{name}", self.interface)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        folder_ids: &[KId],
        query: &SearchQuery,
    ) -> Result<Page<T>> {
        self.conn
            .call(&self.method("get"), &FolderQuery { folder_ids, query })
            .await
    }

    pub async fn get_by_id<T: DeserializeOwned>(&self, ids: &[KId]) -> Result<BatchResult<T>> {
        self.conn
            .call(&self.method("getById"), &params::ids(ids))
            .await
    }

    pub async fn create<T: Serialize>(&self, items: &[T]) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call(&self.method("create"), &Single::new(self.key, items))
            .await
    }

    pub async fn set<T: Serialize>(&self, items: &[T]) -> Result<BatchResult<SetResult>> {
        self.conn
            .call(&self.method("set"), &Single::new(self.key, items))
            .await
    }

    pub async fn remove(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        let result: ErrorsResult = self
            .conn
            .call(&self.method("remove"), &params::ids(ids))
            .await?;
        Ok(result.errors)
    }

    pub async fn copy(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call(&self.method("copy"), &IdsToFolder { ids, folder })
            .await
    }

    pub async fn move_to(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call(&self.method("move"), &IdsToFolder { ids, folder })
            .await
    }
}
