//! Cross-server operations in a distributed deployment.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::mails::EMail;
use crate::params::Single;
use crate::types::{BatchResult, CreateResult, KId, UtcDateTime};

/// Message held on another server, addressed by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteItem {
    /// Message source on the remote server.
    pub url: String,
    /// Message flags.
    pub flags: u64,
    /// Time the message arrived.
    pub receive_date: UtcDateTime,
    /// Remove the source after appending.
    pub is_move: bool,
}

/// Certificate published for an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailCertificate {
    /// Address the certificate is for.
    pub email: EMail,
    /// PEM encoded.
    pub certificate: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendParams<'p, T: ?Sized> {
    items: &'p T,
    folder_id: &'p KId,
}

/// `MultiServer.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct MultiServer<'a> {
    conn: &'a Connection,
}

impl<'a> MultiServer<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Appends one remote message to a local folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn append_remote_item(
        &self,
        item: &RemoteItem,
        folder_id: &KId,
    ) -> Result<CreateResult> {
        #[derive(Deserialize)]
        struct Reply {
            result: CreateResult,
        }

        let reply: Reply = self
            .conn
            .call(
                "MultiServer.appendRemoteItem",
                &AppendParams {
                    items: item,
                    folder_id,
                },
            )
            .await?;
        Ok(reply.result)
    }

    /// Appends remote messages to a local folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn append_remote_items(
        &self,
        items: &[RemoteItem],
        folder_id: &KId,
    ) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call(
                "MultiServer.appendRemoteItems",
                &AppendParams { items, folder_id },
            )
            .await
    }

    /// Looks up certificates of the given addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_certificates(&self, emails: &[EMail]) -> Result<BatchResult<EmailCertificate>> {
        self.conn
            .call("MultiServer.getCertificates", &Single::new("emails", emails))
            .await
    }
}
