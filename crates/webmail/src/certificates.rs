//! Personal S/MIME certificate store.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::Single;
use crate::types::{Download, KId, LocalizableMessage, UtcDateTime};

/// Validation outcome of a certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Validity {
    /// The certificate is valid.
    pub is_valid: bool,
    /// Reason the check failed.
    pub error: LocalizableMessage,
}

/// Distinguished name parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameEntry {
    /// CN
    pub common_name: String,
    /// O
    pub organization_name: String,
    /// OU
    pub organizational_unit_name: String,
    /// L
    pub locality_name: String,
    /// C
    pub country_name: String,
    /// ST
    pub state_or_province_name: String,
    /// From `emailAddress` or the subject alternative name.
    pub email_addresses: Vec<String>,
}

/// An X.509 certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    /// Certificate id.
    pub id: KId,
    /// Subject name.
    pub subject: NameEntry,
    /// Issuer.
    pub issuer: NameEntry,
    /// Start of validity.
    pub valid_from: UtcDateTime,
    /// End of validity.
    pub valid_to: UtcDateTime,
    /// Serial number.
    pub serial: String,
    /// Validation result.
    pub validity: Validity,
}

/// State of the personal certificate store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertStoreStatus {
    /// No store yet.
    #[default]
    Uninitialized,
    /// Mails are decrypted automatically; signing and encryption work.
    Opened,
    /// Store is closed.
    Closed,
    /// Opening with the login password failed at login.
    FailedToOpen,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// `Certificates.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Certificates<'a> {
    conn: &'a Connection,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordParams<'p> {
    password: &'p str,
    is_login_password: bool,
}

impl<'a> Certificates<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Creates the store, protected by `password`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn init(&self, password: &str, is_login_password: bool) -> Result<()> {
        self.conn
            .call_unit(
                "Certificates.init",
                &PasswordParams {
                    password,
                    is_login_password,
                },
            )
            .await
    }

    /// Opens the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn open(&self, password: &str) -> Result<()> {
        self.conn
            .call_unit("Certificates.open", &Single::new("password", password))
            .await
    }

    /// Closes the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn close(&self) -> Result<()> {
        self.conn.call_unit_without_params("Certificates.close").await
    }

    /// Lists certificates in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self) -> Result<Vec<Certificate>> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            certificates: Vec<Certificate>,
        }

        let reply: Reply = self.conn.call_without_params("Certificates.get").await?;
        Ok(reply.certificates)
    }

    /// Returns one certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id(&self, id: &KId) -> Result<Certificate> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            certificate: Certificate,
        }

        let reply: Reply = self
            .conn
            .call("Certificates.getById", &Single::new("id", id))
            .await?;
        Ok(reply.certificate)
    }

    /// Returns the store state.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_status(&self) -> Result<CertStoreStatus> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            status: CertStoreStatus,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Certificates.getStatus")
            .await?;
        Ok(reply.status)
    }

    /// Returns the PEM source of a certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn to_source(&self, id: &KId) -> Result<String> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            source: String,
        }

        let reply: Reply = self
            .conn
            .call("Certificates.toSource", &Single::new("id", id))
            .await?;
        Ok(reply.source)
    }

    /// Opens a store still protected by the previous login password.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn open_with_old_login_password(&self, old_password: &str) -> Result<()> {
        self.conn
            .call_unit(
                "Certificates.openWithOldLoginPassword",
                &Single::new("oldPassword", old_password),
            )
            .await
    }

    /// Unlocks editing of a store still protected by the previous login
    /// password.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn open_edit_with_old_login_password(&self, old_password: &str) -> Result<()> {
        self.conn
            .call_unit(
                "Certificates.openEditWithOldLoginPassword",
                &Single::new("oldPassword", old_password),
            )
            .await
    }

    /// Deletes the store and its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn reset(&self, login_password: &str) -> Result<()> {
        self.conn
            .call_unit(
                "Certificates.reset",
                &Single::new("loginPassword", login_password),
            )
            .await
    }

    /// Unlocks editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn open_edit(&self, password: &str) -> Result<()> {
        self.conn
            .call_unit("Certificates.openEdit", &Single::new("password", password))
            .await
    }

    /// Locks editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn close_edit(&self) -> Result<()> {
        self.conn
            .call_unit_without_params("Certificates.closeEdit")
            .await
    }

    /// Marks a certificate as preferred for signing.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_preferred(&self, id: &KId) -> Result<()> {
        self.conn
            .call_unit("Certificates.setPreferred", &Single::new("id", id))
            .await
    }

    /// Changes the store password.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        is_login_password: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            old_password: &'p str,
            new_password: &'p str,
            is_login_password: bool,
        }

        self.conn
            .call_unit(
                "Certificates.changePassword",
                &Params {
                    old_password,
                    new_password,
                    is_login_password,
                },
            )
            .await
    }

    /// Imports an uploaded PKCS#12 file.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn import_pkcs12(&self, file_id: &KId, password: &str) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            file_id: &'p KId,
            password: &'p str,
        }

        self.conn
            .call_unit("Certificates.importPKCS12", &Params { file_id, password })
            .await
    }

    /// Exports a certificate with its key as PKCS#12, protected by
    /// `new_password`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn export_pkcs12(&self, new_password: &str, id: &KId) -> Result<Download> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            new_password: &'p str,
            id: &'p KId,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Reply {
            #[serde(default)]
            file_download: Download,
        }

        let reply: Reply = self
            .conn
            .call("Certificates.exportPKCS12", &Params { new_password, id })
            .await?;
        Ok(reply.file_download)
    }

    /// Removes a certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, id: &KId) -> Result<()> {
        self.conn
            .call_unit("Certificates.remove", &Single::new("id", id))
            .await
    }
}
