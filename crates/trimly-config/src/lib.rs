//! Shared configuration for the trimly CLI and TUI.
//!
//! TOML profiles, admin credential resolution (env + keyring + plaintext),
//! the persisted admin session marker, and translation to
//! `trimly_core::SessionConfig`. Both binaries depend on this crate -- the
//! CLI adds flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trimly_core::SessionConfig;

/// API root used when nothing is configured -- the backend's conventional
/// local development address.
pub const DEFAULT_SERVER: &str = "http://localhost:8081/api";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no admin credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            locale: default_locale(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_locale() -> String {
    "it".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g. `http://localhost:8081/api`).
    #[serde(default = "default_server")]
    pub server: String,

    /// Output language ("it" or "en").
    pub locale: Option<String>,

    /// Override request timeout (seconds).
    pub timeout: Option<u64>,

    /// Dashboard poll interval (seconds).
    pub poll_interval: Option<u64>,

    /// Admin account email.
    pub admin_email: Option<String>,

    /// Admin password (plaintext -- prefer keyring or env var).
    pub admin_password: Option<String>,

    /// Environment variable name containing the admin password.
    pub admin_password_env: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server: default_server(),
            locale: None,
            timeout: None,
            poll_interval: None,
            admin_email: None,
            admin_password: None,
            admin_password_env: None,
        }
    }
}

fn default_server() -> String {
    DEFAULT_SERVER.into()
}

// ── Config file paths ───────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("sh", "trimly", "trimly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Path of the persisted admin session marker.
///
/// The marker is set only after the backend confirmed the credentials and
/// gates the admin CLI/TUI surfaces locally. It is a convenience gate, not
/// a security boundary -- the backend authorizes every mutating call on
/// its own.
pub fn admin_marker_path() -> PathBuf {
    ProjectDirs::from("sh", "trimly", "trimly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("admin-session");
            p
        },
        |dirs| dirs.data_local_dir().join("admin-session"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("trimly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit path (file + environment).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TRIMLY_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write to an explicit path.
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Admin credential resolution ─────────────────────────────────────

/// Resolve the admin email for a profile (profile value, then env).
pub fn resolve_admin_email(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .admin_email
        .clone()
        .or_else(|| std::env::var("TRIMLY_ADMIN_EMAIL").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the admin password from the credential chain.
pub fn resolve_admin_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's admin_password_env → env var lookup
    if let Some(ref env_name) = profile.admin_password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Well-known env var
    if let Ok(val) = std::env::var("TRIMLY_ADMIN_PASSWORD") {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("trimly", &format!("{profile_name}/admin-password")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.admin_password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store the admin password in the system keyring.
pub fn store_admin_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new("trimly", &format!("{profile_name}/admin-password"))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })?;
    entry.set_password(password).map_err(|e| ConfigError::Validation {
        field: "keyring".into(),
        reason: e.to_string(),
    })
}

// ── Admin session marker ────────────────────────────────────────────

/// Persist the admin session marker after a successful credential check.
/// The marker body records the admin email for `admin status`.
pub fn store_admin_marker(email: &str) -> Result<(), ConfigError> {
    let path = admin_marker_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, format!("{email}\n"))?;
    Ok(())
}

/// The email in the admin session marker, if present.
pub fn admin_marker() -> Option<String> {
    std::fs::read_to_string(admin_marker_path())
        .ok()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Remove the admin session marker (logout).
pub fn clear_admin_marker() -> Result<(), ConfigError> {
    match std::fs::remove_file(admin_marker_path()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ── Translation to SessionConfig ────────────────────────────────────

/// Build a `SessionConfig` from a profile -- no CLI flag overrides.
///
/// Suitable for the TUI and other non-CLI consumers.
pub fn profile_to_session_config(profile: &Profile) -> Result<SessionConfig, ConfigError> {
    let url: url::Url = profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })?;

    let mut config = SessionConfig::new(url);
    if let Some(timeout) = profile.timeout {
        config.timeout = Duration::from_secs(timeout);
    }
    if let Some(poll) = profile.poll_interval {
        config.poll_interval = Duration::from_secs(poll);
    }
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config = Config::default();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.defaults.locale, "it");
        assert_eq!(config.defaults.timeout, 30);
    }

    #[test]
    fn config_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "shop".into(),
            Profile {
                server: "http://192.168.1.12:8081/api".into(),
                locale: Some("en".into()),
                poll_interval: Some(10),
                ..Profile::default()
            },
        );
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let profile = loaded.profiles.get("shop").unwrap();
        assert_eq!(profile.server, "http://192.168.1.12:8081/api");
        assert_eq!(profile.locale.as_deref(), Some("en"));
        assert_eq!(profile.poll_interval, Some(10));
    }

    #[test]
    fn profile_translates_to_session_config() {
        let profile = Profile {
            server: "http://localhost:8081/api".into(),
            timeout: Some(10),
            poll_interval: Some(7),
            ..Profile::default()
        };

        let config = profile_to_session_config(&profile).unwrap();
        assert_eq!(config.url.as_str(), "http://localhost:8081/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.poll_interval, Duration::from_secs(7));

        let bad = Profile {
            server: "not a url".into(),
            ..Profile::default()
        };
        assert!(profile_to_session_config(&bad).is_err());
    }

    #[test]
    fn plaintext_password_is_the_last_resort() {
        let profile = Profile {
            admin_email: Some("admin@example.com".into()),
            admin_password: Some("hunter2".into()),
            ..Profile::default()
        };

        let email = resolve_admin_email(&profile, "default").unwrap();
        assert_eq!(email, "admin@example.com");

        use secrecy::ExposeSecret;
        let password = resolve_admin_password(&profile, "default").unwrap();
        assert_eq!(password.expose_secret(), "hunter2");
    }
}
