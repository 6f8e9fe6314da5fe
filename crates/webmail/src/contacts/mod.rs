//! Contacts, distribution lists and resources.

mod model;

pub use model::{
    ABExtension, Contact, ContactType, EmailAddress, EmailAddressType, PersonalContact,
    PhoneNumber, PhoneNumberType, PhotoAttachment, PostalAddress, PostalAddressType, Resource,
    ResourceType, Url, UrlType,
};

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::certificates::Certificate;
use crate::params::{self, FolderQuery, IdsToFolder, Single};
use crate::types::{
    BatchResult, CreateResult, ErrorsResult, ItemError, KId, Page, SearchQuery, SetResult,
};

/// `Contacts.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a> {
    conn: &'a Connection,
}

impl<'a> Contacts<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Copies contacts into a folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn copy(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call("Contacts.copy", &IdsToFolder { ids, folder })
            .await
    }

    /// Creates contacts.
    ///
    /// Items the server rejects are reported in
    /// [`BatchResult::errors`] by input index; the others are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the call as a whole fails.
    pub async fn create(&self, contacts: &[Contact]) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call("Contacts.create", &Single::new("contacts", contacts))
            .await
    }

    /// Lists contacts of the given folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, folder_ids: &[KId], query: &SearchQuery) -> Result<Page<Contact>> {
        self.conn
            .call("Contacts.get", &FolderQuery { folder_ids, query })
            .await
    }

    /// Lists contacts from the server-side cache.
    ///
    /// Only summary fields are filled: ids, names, email addresses, phone
    /// numbers and photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_from_cache(
        &self,
        folder_ids: &[KId],
        query: &SearchQuery,
    ) -> Result<Page<Contact>> {
        self.conn
            .call("Contacts.getFromCache", &FolderQuery { folder_ids, query })
            .await
    }

    /// Fetches contacts by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id(&self, ids: &[KId]) -> Result<BatchResult<Contact>> {
        self.conn.call("Contacts.getById", &params::ids(ids)).await
    }

    /// Fetches contact summaries by id from the server-side cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id_from_cache(&self, ids: &[KId]) -> Result<BatchResult<Contact>> {
        self.conn
            .call("Contacts.getByIdFromCache", &params::ids(ids))
            .await
    }

    /// Parses a vCard attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_from_attachment(&self, id: &KId) -> Result<Contact> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            result: Contact,
        }

        let reply: Reply = self
            .conn
            .call("Contacts.getFromAttachment", &Single::new("id", id))
            .await?;
        Ok(reply.result)
    }

    /// Lists bookable resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_resources(&self, query: &SearchQuery) -> Result<Page<Resource>> {
        self.conn
            .call("Contacts.getResources", &params::query(query))
            .await
    }

    /// Returns the certificate stored for `email` in contact `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_certificate(&self, email: &str, id: &KId) -> Result<Certificate> {
        #[derive(Serialize)]
        struct Params<'p> {
            email: &'p str,
            id: &'p KId,
        }

        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            cert: Certificate,
        }

        let reply: Reply = self
            .conn
            .call("Contacts.getCertificate", &Params { email, id })
            .await?;
        Ok(reply.cert)
    }

    /// Removes contacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        let result: ErrorsResult = self
            .conn
            .call("Contacts.remove", &params::ids(ids))
            .await?;
        Ok(result.errors)
    }

    /// Updates contacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, contacts: &[Contact]) -> Result<BatchResult<SetResult>> {
        self.conn
            .call("Contacts.set", &Single::new("contacts", contacts))
            .await
    }

    /// Moves contacts into a folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn move_to(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.conn
            .call("Contacts.move", &IdsToFolder { ids, folder })
            .await
    }

    /// Returns the card of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_personal(&self) -> Result<PersonalContact> {
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            contact: PersonalContact,
        }

        let reply: Reply = self
            .conn
            .call_without_params("Contacts.getPersonal")
            .await?;
        Ok(reply.contact)
    }

    /// Replaces the card of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set_personal(&self, contact: &PersonalContact) -> Result<()> {
        self.conn
            .call_unit("Contacts.setPersonal", &Single::new("contact", contact))
            .await
    }
}
