//! CLI configuration — thin wrapper around `trimly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --profile, --locale).

use std::time::Duration;

use trimly_core::{Locale, SessionConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use trimly_config::{
    Config, Profile, config_path, load_config_or_default, profile_to_session_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The profile in effect, synthesizing a default one when the config file
/// names none (the backend has a conventional local address, so the CLI
/// works out of the box).
pub fn active_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);
    match config.profiles.get(&name) {
        Some(profile) => Ok(profile.clone()),
        // An explicitly requested profile must exist; the implicit
        // default falls back to defaults + flags.
        None if global.profile.is_some() => Err(CliError::ProfileNotFound { name }),
        None => Ok(Profile::default()),
    }
}

/// Translate a `Profile` + global flags into a `SessionConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_session_config(
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<SessionConfig, CliError> {
    // 1. Server URL (flag > env > profile)
    let url_str = global.server.as_deref().unwrap_or(&profile.server);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Timeout (flag default matches the profile default)
    let timeout = Duration::from_secs(global.timeout);

    let mut config = SessionConfig::new(url);
    config.timeout = timeout;
    if let Some(poll) = profile.poll_interval {
        config.poll_interval = Duration::from_secs(poll);
    }
    Ok(config)
}

/// Resolve the output locale: flag > profile > config default.
pub fn resolve_locale(profile: &Profile, global: &GlobalOpts, config: &Config) -> Locale {
    if let Some(arg) = global.locale {
        return arg.into();
    }
    profile
        .locale
        .as_deref()
        .or(Some(config.defaults.locale.as_str()))
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}
