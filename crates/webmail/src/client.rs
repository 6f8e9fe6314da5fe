//! Entry point bundling a connection with its services.

use webmail_rpc::{Config, Connection, Result};

use crate::calendar::{Alarms, Events, FreeBusy, Occurrences};
use crate::call_manager::CallManager;
use crate::certificates::Certificates;
use crate::changes::Changes;
use crate::contacts::Contacts;
use crate::delegation::Delegation;
use crate::filters::Filters;
use crate::folders::Folders;
use crate::im::Im;
use crate::integration::Integration;
use crate::mails::Mails;
use crate::multi_server::MultiServer;
use crate::notes::Notes;
use crate::principals::Principals;
use crate::session::Session;
use crate::tasks::Tasks;

/// Webmail API client.
///
/// Owns one [`Connection`]; each accessor returns a lightweight view for
/// one remote interface. Views borrow the client, so any number can be used
/// concurrently.
#[derive(Debug)]
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Creates a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            conn: Connection::new(config)?,
        })
    }

    /// Wraps an existing connection.
    #[must_use]
    pub const fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the client, returning the connection.
    #[must_use]
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Login, user settings and mobile devices.
    #[must_use]
    pub const fn session(&self) -> Session<'_> {
        Session::new(&self.conn)
    }

    /// Folder tree, sharing and subscriptions.
    #[must_use]
    pub const fn folders(&self) -> Folders<'_> {
        Folders::new(&self.conn)
    }

    /// Mail messages.
    #[must_use]
    pub const fn mails(&self) -> Mails<'_> {
        Mails::new(&self.conn)
    }

    /// Contacts and resources.
    #[must_use]
    pub const fn contacts(&self) -> Contacts<'_> {
        Contacts::new(&self.conn)
    }

    /// Calendar events and invitations.
    #[must_use]
    pub const fn events(&self) -> Events<'_> {
        Events::new(&self.conn)
    }

    /// Calendar occurrences.
    #[must_use]
    pub const fn occurrences(&self) -> Occurrences<'_> {
        Occurrences::new(&self.conn)
    }

    /// Free/busy lookup.
    #[must_use]
    pub const fn free_busy(&self) -> FreeBusy<'_> {
        FreeBusy::new(&self.conn)
    }

    /// Reminders.
    #[must_use]
    pub const fn alarms(&self) -> Alarms<'_> {
        Alarms::new(&self.conn)
    }

    /// Tasks.
    #[must_use]
    pub const fn tasks(&self) -> Tasks<'_> {
        Tasks::new(&self.conn)
    }

    /// Notes.
    #[must_use]
    pub const fn notes(&self) -> Notes<'_> {
        Notes::new(&self.conn)
    }

    /// Change journal and long poll.
    #[must_use]
    pub const fn changes(&self) -> Changes<'_> {
        Changes::new(&self.conn)
    }

    /// S/MIME certificate store.
    #[must_use]
    pub const fn certificates(&self) -> Certificates<'_> {
        Certificates::new(&self.conn)
    }

    /// Mailbox delegation.
    #[must_use]
    pub const fn delegation(&self) -> Delegation<'_> {
        Delegation::new(&self.conn)
    }

    /// Mail filter rules.
    #[must_use]
    pub const fn filters(&self) -> Filters<'_> {
        Filters::new(&self.conn)
    }

    /// Users, groups and domains.
    #[must_use]
    pub const fn principals(&self) -> Principals<'_> {
        Principals::new(&self.conn)
    }

    /// Sync folder selection.
    #[must_use]
    pub const fn integration(&self) -> Integration<'_> {
        Integration::new(&self.conn)
    }

    /// Cross-server operations.
    #[must_use]
    pub const fn multi_server(&self) -> MultiServer<'_> {
        MultiServer::new(&self.conn)
    }

    /// Click-to-dial.
    #[must_use]
    pub const fn call_manager(&self) -> CallManager<'_> {
        CallManager::new(&self.conn)
    }

    /// Instant messaging.
    #[must_use]
    pub const fn im(&self) -> Im<'_> {
        Im::new(&self.conn)
    }
}
