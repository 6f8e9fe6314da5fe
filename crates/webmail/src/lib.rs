//! # webmail
//!
//! Typed client for the webmail JSON-RPC API.
//!
//! Every remote interface (`Session`, `Folders`, `Mails`, `Contacts`,
//! `Events`, `Tasks`, ...) is a small service struct borrowing one shared
//! [`Connection`]. Methods take typed parameters and return typed results;
//! bulk operations return a [`BatchResult`] where per-item failures carry
//! the index of the input they belong to.
//!
//! ## Quick Start
//!
//! ```ignore
//! use webmail::folders::FolderSubType;
//! use webmail::{Client, Config, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> webmail::Result<()> {
//!     let client = Client::new(Config::new("mail.example.com"))?;
//!     client.session().login("jdoe", "secret", None).await?;
//!
//!     let folders = client.folders().get().await?;
//!     let inbox: Vec<_> = folders
//!         .iter()
//!         .filter(|f| f.sub_type == FolderSubType::Inbox)
//!         .map(|f| f.id.clone())
//!         .collect();
//!
//!     let page = client
//!         .mails()
//!         .get(&inbox, &SearchQuery::new().fields(["subject", "from"]).page(0, 20))
//!         .await?;
//!     for mail in &page.list {
//!         println!("{}", mail.subject);
//!     }
//!
//!     client.session().logout().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod calendar;
pub mod call_manager;
pub mod certificates;
pub mod changes;
mod client;
pub mod contacts;
pub mod delegation;
pub mod filters;
pub mod folders;
pub mod im;
pub mod integration;
mod items;
pub mod mails;
pub mod mobile;
pub mod multi_server;
pub mod notes;
mod params;
pub mod principals;
pub mod session;
pub mod tasks;
pub mod types;

pub use client::Client;
pub use types::{
    BatchResult, CreateResult, ItemError, KId, Page, SearchQuery, SetResult, UtcDateTime,
    Watermark,
};
pub use webmail_rpc::{Config, Connection, Error, ErrorCode, Result, Security};
