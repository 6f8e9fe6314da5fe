//! # webmail-rpc
//!
//! JSON-RPC 2.0 over HTTP transport for the webmail client API.
//!
//! ## Features
//!
//! - **Envelope**: `{"jsonrpc":"2.0","method",...,"id",...}` with optional
//!   `token` and `params` members left out when absent
//! - **Session**: token cached on the connection and sent as `X-Token`,
//!   cookie jar for server affinity
//! - **Errors**: embedded error objects surface as [`Error::Remote`] with
//!   the numeric [`ErrorCode`] preserved
//! - **Concurrency**: request ids come from an atomic counter, the token is
//!   behind a lock, so a [`Connection`] can be shared between tasks
//!
//! ## Quick Start
//!
//! ```ignore
//! use serde_json::{Value, json};
//! use webmail_rpc::{Config, Connection};
//!
//! #[tokio::main]
//! async fn main() -> webmail_rpc::Result<()> {
//!     let conn = Connection::new(Config::new("mail.example.com"))?;
//!
//!     let login: Value = conn
//!         .call("Session.login", &json!({
//!             "userName": "jdoe",
//!             "password": "secret",
//!             "application": {"name": "demo", "vendor": "acme", "version": "1"}
//!         }))
//!         .await?;
//!     if let Some(token) = login["token"].as_str() {
//!         conn.set_token(token);
//!     }
//!
//!     let me: Value = conn.call_without_params("Session.whoAmI").await?;
//!     println!("{me}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod codes;
pub mod config;
pub mod connection;
pub mod envelope;
mod error;
pub mod id;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use codes::{ErrorCode, ErrorKind};
pub use config::{Config, ConfigBuilder, Security};
pub use connection::{Connection, SessionState};
pub use envelope::Request;
pub use error::{Error, RemoteError, Result, render_placeholders};
