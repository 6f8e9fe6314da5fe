//! Principals: users, resources, groups and domains that can be granted
//! access or delegation.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::Single;
use crate::types::{KId, ListResult};

/// Kind of principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalType {
    /// User.
    #[default]
    #[serde(rename = "ptUser")]
    User,
    /// Resource.
    #[serde(rename = "ptResource")]
    Resource,
    /// Group.
    #[serde(rename = "ptGroup")]
    Group,
    /// Domain.
    #[serde(rename = "ptDomain")]
    Domain,
    /// Anyone; carries no id.
    #[serde(rename = "ptAnonymous")]
    Anonymous,
    /// Every authenticated user; carries no id.
    #[serde(rename = "ptAuthUser")]
    AuthUser,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// A user, resource, group or domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Principal {
    /// Principal id.
    pub id: KId,
    /// Kind of principal.
    #[serde(rename = "type")]
    pub kind: PrincipalType,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub mail_address: String,
}

/// `Principals.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Principals<'a> {
    conn: &'a Connection,
}

impl<'a> Principals<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Lists principals of the selected kinds.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, users: bool, groups: bool, domains: bool) -> Result<Vec<Principal>> {
        #[derive(Serialize)]
        struct Params {
            users: bool,
            groups: bool,
            domains: bool,
        }

        let result: ListResult<Principal> = self
            .conn
            .call("Principals.get", &Params { users, groups, domains })
            .await?;
        Ok(result.list)
    }

    /// Finds a principal by primary email address (login name).
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Principal> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            principal: Principal,
        }

        let reply: Reply = self
            .conn
            .call("Principals.getByEmail", &Single::new("email", email))
            .await?;
        Ok(reply.principal)
    }
}
