//! Shared helpers for interactive command handlers.

use std::io::IsTerminal;

use crate::error::CliError;

/// Ask for confirmation before a destructive action.
///
/// `--yes` skips the prompt; a non-interactive stdin without `--yes` is an
/// error rather than a silent refusal.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: prompt.to_owned(),
        });
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Require an interactive terminal (for the booking wizard and prompts).
pub fn require_terminal(what: &str) -> Result<(), CliError> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: what.to_owned(),
            reason: "requires an interactive terminal".into(),
        })
    }
}

/// Format a price the way the dashboard shows it.
pub fn euro(amount: f64) -> String {
    if (amount - amount.trunc()).abs() < f64::EPSILON {
        format!("€{amount:.0}")
    } else {
        format!("€{amount:.2}")
    }
}
