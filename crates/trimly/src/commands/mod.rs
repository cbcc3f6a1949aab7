//! Command handlers.
//!
//! `dispatch` builds a connected session for the command, routes it to
//! the topic handler, and shuts the session down afterwards. Handlers
//! receive the session plus the resolved locale and global flags.

pub mod account;
pub mod admin;
pub mod barbers;
pub mod book;
pub mod config_cmd;
pub mod slots;
pub mod util;

use trimly_core::{Locale, ShopSession};

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Everything a handler needs besides its own arguments.
pub struct Ctx<'a> {
    pub session: &'a ShopSession,
    pub locale: Locale,
    pub global: &'a GlobalOpts,
    pub profile: trimly_config::Profile,
    pub profile_name: String,
}

pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let profile = config::active_profile(global, &cfg)?;
    let locale = config::resolve_locale(&profile, global, &cfg);
    let session_config = config::resolve_session_config(&profile, global)?;

    let session = ShopSession::new(session_config)?;
    session.connect().await?;

    let ctx = Ctx {
        session: &session,
        locale,
        global,
        profile,
        profile_name,
    };

    let result = match command {
        Command::Book(args) => book::handle(&ctx, args).await,
        Command::Barbers(args) => barbers::handle(&ctx, args),
        Command::Slots(args) => slots::handle(&ctx, args).await,
        Command::Account(args) => account::handle(&ctx, args).await,
        Command::Admin(args) => admin::handle(&ctx, args).await,
        // Handled before a session is built.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    };

    session.shutdown().await;
    result
}
