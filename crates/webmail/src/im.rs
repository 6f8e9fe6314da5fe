//! Instant messaging: presence, conversations and messages.
//!
//! The interface is registered in lower case on the server (`im.*`).

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::Single;
use crate::types::{ListResult, UtcDateTime};

/// Message sequence number within a conversation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub i64);

/// Conversation number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub i64);

/// IM contact, usually a mail address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Presence status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Available.
    Available,
    /// Offline.
    #[default]
    Offline,
    /// Do not disturb.
    Dnd,
    /// Away.
    Away,
    /// Online but shown offline.
    Invisible,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Presence of one contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Presence {
    /// Contact.
    pub contact_id: ContactId,
    /// Availability.
    pub status: Status,
    /// Status message.
    pub text: String,
    /// Time of the last change.
    pub date: UtcDateTime,
}

/// Conversation activity pushed to other sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationEvent {
    /// Conversation started.
    #[default]
    Created,
    /// A message arrived.
    Updated,
    /// A message was delivered.
    Delivered,
    /// Messages were read.
    Read,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// One-to-one or group conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conversation {
    /// Conversation.
    pub conversation_id: ConversationId,
    /// Time of the last message.
    pub last_activity: UtcDateTime,
    /// Own messages above this id are undelivered.
    pub sent_last_delivered_id: MessageId,
    /// Own messages above this id are unread.
    pub sent_last_read_id: MessageId,
    /// Last message the user read.
    pub received_last_read_id: MessageId,
    /// Unread received messages.
    pub received_unread_count: i32,
    /// Participants.
    pub contacts: Vec<ContactId>,
    /// Last conversation event.
    pub event: ConversationEvent,
    /// Notifications are muted.
    pub muted: bool,
}

/// Typing notification carried by a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageEvent {
    /// Typing.
    Active,
    /// Stopped typing.
    #[default]
    Inactive,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    /// Message.
    pub message_id: MessageId,
    /// Message text.
    pub text: String,
    /// Message event.
    pub event: MessageEvent,
    /// Target conversation.
    pub to: ConversationId,
    /// Sender.
    pub from: ContactId,
    /// Filled by the server.
    pub time: UtcDateTime,
}

impl Message {
    /// Creates a text message for a conversation.
    #[must_use]
    pub fn text(to: ConversationId, text: impl Into<String>) -> Self {
        Self {
            to,
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageWindow {
    conversation_id: ConversationId,
    current_message_id: MessageId,
    count: i32,
}

/// `im.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Im<'a> {
    conn: &'a Connection,
}

impl<'a> Im<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the presence of contacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_presence(&self, contacts: &[ContactId]) -> Result<Vec<Presence>> {
        let reply: ListResult<Presence> = self
            .conn
            .call("im.getPresence", &Single::new("contacts", contacts))
            .await?;
        Ok(reply.list)
    }

    /// Subscribes to presence changes and returns the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn subscribe_presence(&self) -> Result<Vec<Presence>> {
        let reply: ListResult<Presence> =
            self.conn.call_without_params("im.subscribePresence").await?;
        Ok(reply.list)
    }

    /// Sets the user's own presence.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_presence(&self, status: Status, text: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'p> {
            status: Status,
            text: &'p str,
        }

        self.conn
            .call_unit("im.setPresence", &Params { status, text })
            .await
    }

    /// Starts a conversation with contacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create_conversation(&self, contacts: &[ContactId]) -> Result<Conversation> {
        #[derive(Deserialize)]
        struct Reply {
            conversation: Conversation,
        }

        let reply: Reply = self
            .conn
            .call("im.createConversation", &Single::new("contacts", contacts))
            .await?;
        Ok(reply.conversation)
    }

    /// Subscribes to conversation activity and returns recent conversations.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn subscribe_conversations(&self) -> Result<Vec<Conversation>> {
        let reply: ListResult<Conversation> = self
            .conn
            .call_without_params("im.subscribeConversations")
            .await?;
        Ok(reply.list)
    }

    /// Mutes or unmutes a conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn mute_conversation(
        &self,
        conversation_id: ConversationId,
        mute: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params {
            conversation_id: ConversationId,
            mute: bool,
        }

        self.conn
            .call_unit(
                "im.muteConversation",
                &Params {
                    conversation_id,
                    mute,
                },
            )
            .await
    }

    /// Marks messages up to `last_read_id` as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn read_conversation(
        &self,
        conversation_id: ConversationId,
        last_read_id: MessageId,
    ) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params {
            conversation_id: ConversationId,
            last_read_id: MessageId,
        }

        self.conn
            .call_unit(
                "im.readConversation",
                &Params {
                    conversation_id,
                    last_read_id,
                },
            )
            .await
    }

    /// Returns up to `count` messages around `current_message_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_messages(
        &self,
        conversation_id: ConversationId,
        current_message_id: MessageId,
        count: i32,
    ) -> Result<Vec<Message>> {
        let reply: ListResult<Message> = self
            .conn
            .call(
                "im.getMessages",
                &MessageWindow {
                    conversation_id,
                    current_message_id,
                    count,
                },
            )
            .await?;
        Ok(reply.list)
    }

    /// Subscribes to new messages and returns the latest window.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn subscribe_messages(
        &self,
        conversation_id: ConversationId,
        current_message_id: MessageId,
        count: i32,
    ) -> Result<Vec<Message>> {
        let reply: ListResult<Message> = self
            .conn
            .call(
                "im.subscribeMessages",
                &MessageWindow {
                    conversation_id,
                    current_message_id,
                    count,
                },
            )
            .await?;
        Ok(reply.list)
    }

    /// Stops message notifications for a conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn unsubscribe_messages(&self, conversation_id: ConversationId) -> Result<()> {
        self.conn
            .call_unit(
                "im.unsubscribeMessages",
                &Single::new("conversationId", &conversation_id),
            )
            .await
    }

    /// Sends a message. Returns its id and the server timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn send_message(
        &self,
        message: &Message,
        mark_as_read: bool,
    ) -> Result<(MessageId, UtcDateTime)> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            message: &'p Message,
            mark_as_read: bool,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            message_id: MessageId,
            #[serde(default)]
            time: UtcDateTime,
        }

        let reply: Reply = self
            .conn
            .call(
                "im.sendMessage",
                &Params {
                    message,
                    mark_as_read,
                },
            )
            .await?;
        Ok((reply.message_id, reply.time))
    }
}
