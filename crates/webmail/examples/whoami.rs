#![allow(clippy::doc_markdown)]
//! Example: log in, print the user profile and quota, log out.
//!
//! ## Running
//!
//! ```bash
//! WEBMAIL_SERVER=mail.example.com WEBMAIL_USER=jdoe WEBMAIL_PASSWORD=secret \
//!     RUST_LOG=webmail=debug cargo run --package webmail --example whoami
//! ```
//!
//! `WEBMAIL_SERVER` accepts `host` or `host:port`. Set `WEBMAIL_PLAIN=1` to
//! connect over plain HTTP.

use std::env;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use webmail::folders::FolderType;
use webmail::types::Application;
use webmail::{Client, Config, SearchQuery, Security};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let server = env::var("WEBMAIL_SERVER").context("WEBMAIL_SERVER is not set")?;
    let user = env::var("WEBMAIL_USER").context("WEBMAIL_USER is not set")?;
    let password = env::var("WEBMAIL_PASSWORD").context("WEBMAIL_PASSWORD is not set")?;

    let mut builder = Config::builder(&server);
    if env::var_os("WEBMAIL_PLAIN").is_some() {
        builder = builder.security(Security::None);
    }
    let client = Client::new(builder.build())?;

    let app = Application::new("whoami", "webmail-rs", env!("CARGO_PKG_VERSION"));
    client
        .session()
        .login(&user, &password, Some(&app))
        .await
        .context("login failed")?;

    let me = client.session().who_am_i().await?;
    println!("{} <{}>", me.full_name, me.login_name);

    let quota = client.session().get_quota_information().await?;
    if let Some(percent) = quota.space_used_percent() {
        println!("Quota: {percent:.1}% used");
    }

    let folders = client.folders().get().await?;
    println!("{} folders", folders.len());

    let ids: Vec<_> = folders
        .iter()
        .filter(|f| f.kind == FolderType::Task)
        .map(|f| f.id.clone())
        .collect();
    let tasks = client
        .tasks()
        .get(&ids, &SearchQuery::new().fields(["summary"]).page(0, 5))
        .await?;
    println!("{} tasks", tasks.total_items);

    client.session().logout().await?;
    client.connection().clear_token();
    Ok(())
}
