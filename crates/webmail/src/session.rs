//! Session of the logged-in user: login, profile, settings and devices.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use webmail_rpc::{Connection, Error, Result};

use crate::mobile::MobileDevice;
use crate::params::{self, Single};
use crate::types::{
    Application, BatchResult, ErrorsResult, Image, ItemError, KId, LangDescription, ListResult,
    Page, SearchQuery, UtcDateTime,
};

/// Path into the settings tree, e.g. `["calendar", "workDays"]`.
pub type SettingPath = Vec<String>;

/// Profile of the logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    /// Global user id.
    pub id: KId,
    /// Login name, also the primary address.
    pub login_name: String,
    /// Full name.
    pub full_name: String,
    /// All addresses of the user.
    pub emails: Vec<String>,
    /// Default sender address.
    pub preferred_address: String,
    /// Reply-To address.
    pub reply_to_address: String,
}

/// Automatic reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutOfOfficeSettings {
    /// Auto-reply is on.
    pub is_enabled: bool,
    /// Auto-reply text.
    pub text: String,
    /// The reply is limited to a time range.
    pub is_time_range_enabled: bool,
    /// Start of the range.
    pub time_range_start: UtcDateTime,
    /// End of the range.
    pub time_range_end: UtcDateTime,
}

/// Spam filter of the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpamSettings {
    /// Move spam to the Junk folder.
    pub is_enabled: bool,
    /// Trust senders found in contacts.
    pub white_list_contacts: bool,
    /// Add recipients of replies to the white list.
    pub autoupdate_white_list: bool,
    /// Senders never treated as spam.
    pub white_list: Vec<String>,
}

/// Storage quota. Limits of 0 mean unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotaInfo {
    /// Maximum number of messages.
    pub messages_limit: i64,
    /// Number of stored messages.
    pub messages_used: i64,
    /// Bytes.
    pub space_limit: u64,
    /// Bytes.
    pub space_used: u64,
    /// Usage percentage that triggers a warning.
    pub percent_limit_for_warning: i32,
}

impl QuotaInfo {
    /// Returns the used share of the space limit in percent, `None` if
    /// unlimited.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn space_used_percent(&self) -> Option<f64> {
        (self.space_limit > 0).then(|| self.space_used as f64 * 100.0 / self.space_limit as f64)
    }
}

/// Password complexity policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordPolicy {
    /// Policy is enforced.
    pub is_enabled: bool,
    /// Minimum password length.
    pub min_length: i32,
}

/// `Session.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    conn: &'a Connection,
}

impl<'a> Session<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Logs in and stores the session token on the connection.
    ///
    /// Without an application descriptor a placeholder one is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the server returns no token.
    pub async fn login(
        &self,
        user_name: &str,
        password: &str,
        application: Option<&Application>,
    ) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            user_name: &'p str,
            password: &'p str,
            application: &'p Application,
        }

        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            token: String,
        }

        let fallback = Application::default();
        let params = Params {
            user_name,
            password,
            application: application.unwrap_or(&fallback),
        };

        let reply: Reply = self.conn.call("Session.login", &params).await?;
        if reply.token.is_empty() {
            return Err(Error::invalid_response("login returned an empty token"));
        }

        self.conn.set_token(reply.token);
        tracing::info!(user = user_name, "logged in");
        Ok(())
    }

    /// Ends the session on the server.
    ///
    /// The cached token stays on the connection; use
    /// [`Connection::clear_token`] to drop it.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn logout(&self) -> Result<()> {
        self.conn.call_unit_without_params("Session.logout").await?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Returns the profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn who_am_i(&self) -> Result<UserInfo> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            user_details: UserInfo,
        }

        let reply: Reply = self.conn.call_without_params("Session.whoAmI").await?;
        Ok(reply.user_details)
    }

    /// Updates the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_user_info(&self, user_details: &UserInfo) -> Result<()> {
        self.conn
            .call_unit("Session.setUserInfo", &Single::new("userDetails", user_details))
            .await
    }

    /// Returns true if the user may change their password.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn can_user_change_password(&self) -> Result<bool> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            is_eligible: bool,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Session.canUserChangePassword")
            .await?;
        Ok(reply.is_eligible)
    }

    /// Changes the password.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, e.g. with code 4002 when the new
    /// password is rejected.
    pub async fn set_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            current_password: &'p str,
            new_password: &'p str,
        }

        self.conn
            .call_unit(
                "Session.setPassword",
                &Params {
                    current_password,
                    new_password,
                },
            )
            .await
    }

    /// Lists time zone names.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_available_time_zones(&self) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            zones: Vec<String>,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Session.getAvailableTimeZones")
            .await?;
        Ok(reply.zones)
    }

    /// Lists user interface languages.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_available_languages(&self) -> Result<Vec<LangDescription>> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            languages: Vec<LangDescription>,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Session.getAvailableLanguages")
            .await?;
        Ok(reply.languages)
    }

    /// Returns the automatic reply settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_out_of_office(&self) -> Result<OutOfOfficeSettings> {
        self.get_settings_member("Session.getOutOfOffice").await
    }

    /// Replaces the automatic reply settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_out_of_office(&self, settings: &OutOfOfficeSettings) -> Result<()> {
        self.conn
            .call_unit("Session.setOutOfOffice", &Single::new("settings", settings))
            .await
    }

    /// Returns quota usage.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_quota_information(&self) -> Result<QuotaInfo> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            quota_info: QuotaInfo,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Session.getQuotaInformation")
            .await?;
        Ok(reply.quota_info)
    }

    /// Returns the parts of the settings tree selected by `query`.
    ///
    /// Settings are free-form JSON owned by the web client.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_settings(&self, query: &[SettingPath]) -> Result<Value> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            settings: Value,
        }

        let reply: Reply = self
            .conn
            .call("Session.getSettings", &params::Single::new("query", query))
            .await?;
        Ok(reply.settings)
    }

    /// Merges `settings` into the settings tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_settings(&self, settings: &Value) -> Result<()> {
        self.conn
            .call_unit("Session.setSettings", &Single::new("settings", settings))
            .await
    }

    /// Returns the spam filter settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_spam_settings(&self) -> Result<SpamSettings> {
        self.get_settings_member("Session.getSpamSettings").await
    }

    /// Replaces the spam filter settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_spam_settings(&self, settings: &SpamSettings) -> Result<()> {
        self.conn
            .call_unit("Session.setSpamSettings", &Single::new("settings", settings))
            .await
    }

    /// Returns the feedback portal URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_user_voice_url(&self) -> Result<String> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            access_url: String,
        }

        let reply: Reply = self.conn.call_without_params("Session.getUserVoiceUrl").await?;
        Ok(reply.access_url)
    }

    /// Lists mobile devices of the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_mobile_device_list(&self, query: &SearchQuery) -> Result<Page<MobileDevice>> {
        self.conn
            .call("Session.getMobileDeviceList", &params::query(query))
            .await
    }

    /// Removes a device registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove_mobile_device(&self, device_id: &str) -> Result<()> {
        self.conn
            .call_unit("Session.removeMobileDevice", &Single::new("deviceId", device_id))
            .await
    }

    /// Requests a remote wipe of a device.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn wipe_mobile_device(&self, device_id: &str, password: &str) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            device_id: &'p str,
            password: &'p str,
        }

        self.conn
            .call_unit("Session.wipeMobileDevice", &Params { device_id, password })
            .await
    }

    /// Cancels a pending wipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn cancel_wipe_mobile_device(&self, device_id: &str) -> Result<()> {
        self.conn
            .call_unit(
                "Session.cancelWipeMobileDevice",
                &Single::new("deviceId", device_id),
            )
            .await
    }

    /// Lists images usable in signatures.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_signature_image_list(&self) -> Result<Vec<Image>> {
        let result: ListResult<Image> = self
            .conn
            .call_without_params("Session.getSignatureImageList")
            .await?;
        Ok(result.list)
    }

    /// Turns uploaded files into signature images.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn add_signature_image(&self, ids: &[KId]) -> Result<BatchResult<Image>> {
        self.conn
            .call("Session.addSignatureImage", &params::ids(ids))
            .await
    }

    /// Removes signature images.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove_signature_image(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        let result: ErrorsResult = self
            .conn
            .call("Session.removeSignatureImage", &params::ids(ids))
            .await?;
        Ok(result.errors)
    }

    async fn get_settings_member<T>(&self, method: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        #[derive(Deserialize)]
        struct Reply<T> {
            settings: Option<T>,
        }

        let reply: Reply<T> = self.conn.call_without_params(method).await?;
        Ok(reply.settings.unwrap_or_default())
    }
}
