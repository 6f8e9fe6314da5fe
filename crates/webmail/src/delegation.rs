//! Mailbox delegation.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::Single;
use crate::principals::Principal;
use crate::types::{KId, ListResult};

/// A mailbox delegated to the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundDelegation {
    /// Owner of the mailbox. Read-only.
    pub principal: Principal,
    /// Root folder of the mailbox. Read-only.
    pub mailbox_id: KId,
    /// The delegate accepted.
    pub accepted: bool,
}

/// A delegate of the current user's mailbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutboundDelegation {
    /// Delegate.
    pub principal: Principal,
    /// Delegate may also read and write the INBOX.
    #[serde(rename = "isInboxRW")]
    pub is_inbox_rw: bool,
}

/// `Delegation.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Delegation<'a> {
    conn: &'a Connection,
}

impl<'a> Delegation<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Lists the delegates of the user's mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self) -> Result<Vec<OutboundDelegation>> {
        let reply: ListResult<OutboundDelegation> =
            self.conn.call_without_params("Delegation.get").await?;
        Ok(reply.list)
    }

    /// Replaces the delegates of the user's mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, list: &[OutboundDelegation]) -> Result<()> {
        self.conn
            .call_unit("Delegation.set", &Single::new("list", list))
            .await
    }

    /// Lists mailboxes delegated to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_inbound(&self) -> Result<Vec<InboundDelegation>> {
        let reply: ListResult<InboundDelegation> =
            self.conn.call_without_params("Delegation.getInbound").await?;
        Ok(reply.list)
    }

    /// Accepts or declines delegated mailboxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_inbound(&self, list: &[InboundDelegation]) -> Result<()> {
        self.conn
            .call_unit("Delegation.setInbound", &Single::new("list", list))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_wire_format() {
        let delegate = OutboundDelegation {
            principal: Principal {
                id: KId::new("u1"),
                ..Principal::default()
            },
            is_inbox_rw: true,
        };
        let value = serde_json::to_value(&delegate).unwrap();
        assert_eq!(value["isInboxRW"], true);
        assert_eq!(value["principal"]["type"], "ptUser");
    }

    #[test]
    fn test_inbound_wire_format() {
        let inbound: InboundDelegation = serde_json::from_value(json!({
            "principal": {"id": "u2", "type": "ptUser", "displayName": "Boss"},
            "mailboxId": "root-u2",
            "accepted": false
        }))
        .unwrap();
        assert_eq!(inbound.principal.display_name, "Boss");
        assert_eq!(inbound.mailbox_id.as_str(), "root-u2");
    }
}
