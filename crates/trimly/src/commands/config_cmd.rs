//! Configuration commands: profile init, path, show, keyring password.

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;

use super::util;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        ConfigCommand::Show => show(global),
        ConfigCommand::SetPassword => set_password(global),
    }
}

/// Interactively create or update the active profile.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    util::require_terminal("config init")?;

    let mut cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let existing = cfg.profiles.get(&profile_name).cloned().unwrap_or_default();

    let server: String = Input::new()
        .with_prompt("API base URL")
        .default(existing.server.clone())
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .parse::<url::Url>()
                .map(|_| ())
                .map_err(|e| format!("invalid URL: {e}"))
        })
        .interact_text()?;

    let locales = ["it", "en"];
    let locale_idx = Select::new()
        .with_prompt("Output language")
        .items(&locales)
        .default(
            existing
                .locale
                .as_deref()
                .and_then(|l| locales.iter().position(|c| *c == l))
                .unwrap_or(0),
        )
        .interact()?;

    let admin_email: String = Input::new()
        .with_prompt("Admin email (empty to skip)")
        .default(existing.admin_email.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let mut profile = existing;
    profile.server = server;
    profile.locale = Some(locales[locale_idx].to_owned());
    profile.admin_email = if admin_email.is_empty() {
        None
    } else {
        Some(admin_email)
    };

    cfg.profiles.insert(profile_name.clone(), profile);
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!(
            "Profile '{profile_name}' saved to {}",
            config::config_path().display()
        );
        eprintln!("Store the admin password with: trimly config set-password");
    }
    Ok(())
}

/// Print the effective configuration as TOML, with secrets redacted.
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    for profile in cfg.profiles.values_mut() {
        if profile.admin_password.is_some() {
            profile.admin_password = Some("***".into());
        }
    }
    let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: e.to_string(),
    })?;
    crate::output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Store the admin password in the system keyring for the active profile.
fn set_password(global: &GlobalOpts) -> Result<(), CliError> {
    util::require_terminal("config set-password")?;

    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    let password = Password::new()
        .with_prompt(format!("Admin password for profile '{profile_name}'"))
        .with_confirmation("Repeat password", "Passwords don't match")
        .interact()?;

    trimly_config::store_admin_password(&profile_name, &password)?;
    if !global.quiet {
        eprintln!("Password stored in the system keyring");
    }
    Ok(())
}
