//! Public barber directory listing.

use std::sync::Arc;

use tabled::Tabled;

use trimly_core::Barber;

use crate::cli::{BarbersArgs, BarbersCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled)]
struct BarberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "About")]
    about: String,
}

pub fn handle(ctx: &Ctx<'_>, args: BarbersArgs) -> Result<(), CliError> {
    match args.command {
        BarbersCommand::List => {
            let snapshot = ctx.session.store().barbers_snapshot();
            let barbers: Vec<Arc<Barber>> = snapshot.iter().map(Arc::clone).collect();
            let locale = ctx.locale;

            let out = output::render_list(
                &ctx.global.output,
                &barbers,
                |b| BarberRow {
                    id: b.id.clone(),
                    name: b.name.clone(),
                    role: b.role.label(locale),
                    about: b.description(locale).to_owned(),
                },
                |b| b.id.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }
    }
}
