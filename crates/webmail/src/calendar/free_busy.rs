//! Free/busy lookup for other users.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use super::FreeBusyStatus;
use crate::types::{ListResult, UtcDateTime};

/// A span of time with one status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeBusyInterval {
    /// Availability in the interval.
    pub status: FreeBusyStatus,
    /// Start time.
    pub start: UtcDateTime,
    /// End time.
    pub end: UtcDateTime,
}

/// `FreeBusy.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct FreeBusy<'a> {
    conn: &'a Connection,
}

impl<'a> FreeBusy<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns one interval list per address, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(
        &self,
        user_addresses: &[String],
        start: &UtcDateTime,
        end: &UtcDateTime,
    ) -> Result<Vec<Vec<FreeBusyInterval>>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            user_addresses: &'p [String],
            start: &'p UtcDateTime,
            end: &'p UtcDateTime,
        }

        let reply: ListResult<Vec<FreeBusyInterval>> = self
            .conn
            .call(
                "FreeBusy.get",
                &Params {
                    user_addresses,
                    start,
                    end,
                },
            )
            .await?;
        Ok(reply.list)
    }
}
