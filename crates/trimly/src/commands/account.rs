//! Customer account handlers.

use dialoguer::Password;

use trimly_api::RegisterRequest;
use trimly_core::Command as CoreCommand;

use crate::cli::{AccountArgs, AccountCommand};
use crate::error::CliError;

use super::{Ctx, util};

pub async fn handle(ctx: &Ctx<'_>, args: AccountArgs) -> Result<(), CliError> {
    match args.command {
        AccountCommand::Register {
            name,
            surname,
            email,
            phone,
        } => {
            util::require_terminal("account register")?;
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Repeat password", "Passwords don't match")
                .interact()?;

            let account = ctx
                .session
                .register(&RegisterRequest {
                    name,
                    surname,
                    email,
                    password,
                    phone: phone.unwrap_or_default(),
                })
                .await?;
            if !ctx.global.quiet {
                eprintln!("Account created (id {})", account.id);
            }
            Ok(())
        }

        AccountCommand::Login { email } => {
            util::require_terminal("account login")?;
            let password = Password::new().with_prompt("Password").interact()?;

            let account = ctx.session.login(&email, &password).await?;
            if !ctx.global.quiet {
                eprintln!(
                    "Logged in as {} {} <{}> (id {})",
                    account.name,
                    account.surname,
                    account.email,
                    account.id
                );
            }
            Ok(())
        }

        AccountCommand::Delete { id, email } => {
            if !util::confirm(
                &format!("Delete the account '{email}' (id {id})? This cannot be undone."),
                ctx.global.yes,
            )? {
                return Ok(());
            }
            ctx.session
                .execute(CoreCommand::DeleteAccount { id })
                .await?;
            if !ctx.global.quiet {
                eprintln!("Account deleted");
            }
            Ok(())
        }
    }
}
