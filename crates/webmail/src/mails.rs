//! Mail messages.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::certificates::Certificate;
use crate::params::{self, FolderQuery, IdsToFolder, Single};
use crate::types::{
    BatchResult, CreateResult, Download, ErrorsResult, ItemError, KId, LocalizableMessage, Page,
    PriorityType, SearchQuery, SetResult, UtcDateTime, Watermark,
};

/// Mail address with display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EMail {
    /// Display name.
    pub name: String,
    /// Address.
    pub address: String,
    /// Contact the address was taken from. Write-once.
    pub contact_id: String,
}

impl EMail {
    /// Creates an address with a display name.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            contact_id: String::new(),
        }
    }
}

/// Mail attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    /// Original attachment id, or the id from an upload response.
    pub id: String,
    /// Download URL relative to the web root. Read-only.
    pub url: String,
    /// File name, empty for inline attachments.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Referenced as `cid:<contentId>` from HTML parts.
    pub content_id: String,
    /// Read-only.
    pub size: i64,
}

/// Content type of a displayable body part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayableContentType {
    /// Plain text.
    #[default]
    #[serde(rename = "ctTextPlain")]
    TextPlain,
    /// HTML.
    #[serde(rename = "ctTextHtml")]
    TextHtml,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Body part as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayableMimePart {
    /// Position in the MIME tree, `0` for the root part.
    pub id: KId,
    /// MIME type.
    pub content_type: DisplayableContentType,
    /// Part body.
    pub content: String,
}

/// Headers exposed for reading and composing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeHeaderType {
    /// Read-only.
    #[default]
    #[serde(rename = "mhMessageID")]
    MessageId,
    /// Message-ID of the message being answered.
    #[serde(rename = "mhInReplayTo")]
    InReplyTo,
    /// Message-ID of the message being forwarded.
    #[serde(rename = "mhResentMessageID")]
    ResentMessageId,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// A single header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeHeader {
    /// Header name.
    #[serde(rename = "type")]
    pub kind: MimeHeaderType,
    /// Header value.
    pub value: String,
}

/// S/MIME signature state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInfo {
    /// The message is signed.
    pub is_signed: bool,
    /// The signature verified.
    pub is_valid: bool,
    /// Reason verification failed.
    pub error: LocalizableMessage,
    /// Signer certificate.
    pub cert: Certificate,
}

/// Outcome of decrypting a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecryptResult {
    /// Decrypted.
    #[default]
    #[serde(rename = "DecryptSuccesful")]
    Successful,
    /// No private key for the message.
    #[serde(rename = "DecryptNoKey")]
    NoKey,
    /// Decryption failed.
    #[serde(rename = "DecryptError")]
    Error,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// S/MIME encryption state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncryptInfo {
    /// The message is encrypted.
    pub is_encrypted: bool,
    /// Decryption outcome.
    pub result: DecryptResult,
    /// Reason decryption failed.
    pub error: LocalizableMessage,
}

/// A mail message.
///
/// `send`, `sign` and `encrypt` are write-only instructions honored by
/// [`Mails::create`] and [`Mails::set`]. Sending invalidates the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mail {
    /// Message id.
    pub id: KId,
    /// Folder holding the item.
    pub folder_id: KId,
    /// Item version.
    pub watermark: Watermark,
    /// Sender.
    pub from: EMail,
    /// Sender header, for delegated sending.
    pub sender: EMail,
    /// Recipients.
    pub to: Vec<EMail>,
    /// Copy recipients.
    pub cc: Vec<EMail>,
    /// Blind copy recipients.
    pub bcc: Vec<EMail>,
    /// Date header; not set for drafts.
    pub send_date: UtcDateTime,
    /// Delivery time; not set for drafts.
    pub receive_date: UtcDateTime,
    pub modified_date: UtcDateTime,
    /// Reply-To addresses.
    pub reply_to: Vec<EMail>,
    /// Disposition-Notification-To header.
    pub notification_to: EMail,
    /// Subject.
    pub subject: String,
    /// Priority.
    pub priority: PriorityType,
    /// Bytes.
    pub size: i64,
    /// Read.
    pub is_seen: bool,
    /// Answered.
    pub is_answered: bool,
    /// Flagged.
    pub is_flagged: bool,
    /// Forwarded.
    pub is_forwarded: bool,
    /// Marked as junk.
    pub is_junk: bool,
    /// Read receipt sent.
    #[serde(rename = "isMDNSent")]
    pub is_mdn_sent: bool,
    /// User agreed to load external content.
    pub show_external: bool,
    /// Request DSN even for successful delivery.
    #[serde(rename = "requestDSN")]
    pub request_dsn: bool,
    /// Has attachments.
    pub has_attachment: bool,
    /// Draft.
    pub is_draft: bool,
    /// Cannot be modified.
    pub is_read_only: bool,
    /// Signature state.
    pub sign_info: SignInfo,
    /// Encryption state.
    pub encrypt_info: EncryptInfo,
    /// Parts to render, in order.
    pub displayable_parts: Vec<DisplayableMimePart>,
    /// Attachments.
    pub attachments: Vec<Attachment>,
    /// Requested MIME headers.
    pub headers: Vec<MimeHeader>,
    /// Send on create instead of storing.
    pub send: bool,
    /// Sign when sending.
    pub sign: bool,
    /// Encrypt when sending.
    pub encrypt: bool,
}

/// Page of mails positioned around a given mail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MailPage {
    /// Messages of this page.
    pub list: Vec<Mail>,
    /// Offset of the page within the full listing.
    pub start: i64,
    /// Total matching items.
    pub total_items: i64,
}

/// `Mails.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Mails<'a> {
    conn: &'a Connection,
}

impl<'a> Mails<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Lists mails of the given folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, folder_ids: &[KId], query: &SearchQuery) -> Result<Page<Mail>> {
        self.conn
            .call("Mails.get", &FolderQuery { folder_ids, query })
            .await
    }

    /// Returns the page of the listing that contains mail `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_page_with_id(
        &self,
        folder_ids: &[KId],
        query: &SearchQuery,
        id: &KId,
    ) -> Result<MailPage> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            folder_ids: &'p [KId],
            query: &'p SearchQuery,
            id: &'p KId,
        }

        self.conn
            .call(
                "Mails.getPageWithId",
                &Params {
                    folder_ids,
                    query,
                    id,
                },
            )
            .await
    }

    /// Fetches mails by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id(&self, ids: &[KId]) -> Result<BatchResult<Mail>> {
        self.conn.call("Mails.getById", &params::ids(ids)).await
    }

    /// Creates mails, e.g. drafts, or sends them when `send` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(&self, mails: &[Mail]) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call("Mails.create", &Single::new("mails", mails))
            .await
    }

    /// Removes mails.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        let result: ErrorsResult = self.conn.call("Mails.remove", &params::ids(ids)).await?;
        Ok(result.errors)
    }

    /// Updates mails.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, mails: &[Mail]) -> Result<BatchResult<SetResult>> {
        self.conn
            .call("Mails.set", &Single::new("mails", mails))
            .await
    }

    /// Marks every mail of a folder as seen.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_all_seen(&self, folder_id: &KId) -> Result<()> {
        self.conn
            .call_unit("Mails.setAllSeen", &Single::new("folderId", folder_id))
            .await
    }

    /// Copies mails into a folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn copy(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call("Mails.copy", &IdsToFolder { ids, folder })
            .await
    }

    /// Moves mails into a folder. Moved mails get new ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn move_to(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call("Mails.move", &IdsToFolder { ids, folder })
            .await
    }

    /// Packs attachments into one archive for download.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn export_attachments(&self, attachment_ids: &[KId]) -> Result<Download> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            file_download: Download,
        }

        let reply: Reply = self
            .conn
            .call(
                "Mails.exportAttachments",
                &Single::new("attachmentIds", attachment_ids),
            )
            .await?;
        Ok(reply.file_download)
    }
}
