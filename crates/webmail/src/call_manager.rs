//! Click-to-dial through the PBX integration.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::Single;
use crate::types::KId;

/// Phone extension the user may dial from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatorExtension {
    /// Extension id.
    pub extension_id: KId,
    /// Telephone number.
    pub tel_num: String,
    /// Description.
    pub description: String,
    /// Registered with the PBX.
    pub is_registered: bool,
}

/// State of a dialed call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorCallStatus {
    /// Picked up.
    #[serde(rename = "OcsPickUp")]
    PickUp,
    /// Ringing.
    #[serde(rename = "OcsRinging")]
    Ringing,
    /// Connected.
    #[serde(rename = "OcsConnected")]
    Connected,
    /// Disconnected, unknown call id or another error. Also catches
    /// values not known to this client.
    #[default]
    #[serde(rename = "OcsUnknown", other)]
    Unknown,
}

/// `CallManager.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct CallManager<'a> {
    conn: &'a Connection,
}

impl<'a> CallManager<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Lists the user's extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_extensions(&self) -> Result<Vec<OperatorExtension>> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            extensions: Vec<OperatorExtension>,
        }

        let reply: Reply = self
            .conn
            .call_without_params("CallManager.getExtensions")
            .await?;
        Ok(reply.extensions)
    }

    /// Dials `phone_number` from an extension. Returns the call id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn dial(&self, extension_id: &KId, phone_number: &str) -> Result<KId> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            extension_id: &'p KId,
            phone_number: &'p str,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            call_id: KId,
        }

        let reply: Reply = self
            .conn
            .call(
                "CallManager.dial",
                &Params {
                    extension_id,
                    phone_number,
                },
            )
            .await?;
        Ok(reply.call_id)
    }

    /// Logs in to the PBX.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            user_name: &'p str,
            password: &'p str,
        }

        self.conn
            .call_unit(
                "CallManager.login",
                &Params {
                    user_name,
                    password,
                },
            )
            .await
    }

    /// Ends a call.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn hangup(&self, call_id: &KId) -> Result<()> {
        self.conn
            .call_unit("CallManager.hangup", &Single::new("callId", call_id))
            .await
    }

    /// Returns the call status once it differs from `last_status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_call_status(
        &self,
        last_status: OperatorCallStatus,
        call_id: &KId,
    ) -> Result<OperatorCallStatus> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            last_status: OperatorCallStatus,
            call_id: &'p KId,
        }

        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            status: OperatorCallStatus,
        }

        let reply: Reply = self
            .conn
            .call(
                "CallManager.getCallStatus",
                &Params {
                    last_status,
                    call_id,
                },
            )
            .await?;
        Ok(reply.status)
    }
}
