//! Public slot-grid view for a `(date, barber)` pair.

use serde::Serialize;
use tabled::Tabled;

use trimly_core::availability::fully_booked;
use trimly_core::{SlotQuery, slot_grid};

use crate::cli::SlotsArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Serialize)]
struct SlotStatus {
    slot: &'static str,
    reserved: bool,
}

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub async fn handle(ctx: &Ctx<'_>, args: SlotsArgs) -> Result<(), CliError> {
    let query = SlotQuery::new(args.date, args.barber.clone());
    let reserved = ctx.session.reserved_times(&query).await?;

    let grid: Vec<SlotStatus> = slot_grid()
        .iter()
        .map(|slot| SlotStatus {
            slot,
            reserved: reserved.iter().any(|r| r == slot),
        })
        .collect();

    let out = output::render_list(
        &ctx.global.output,
        &grid,
        |s| SlotRow {
            slot: s.slot.to_owned(),
            status: if s.reserved { "reserved" } else { "free" }.to_owned(),
        },
        |s| s.slot.to_owned(),
    );
    output::print_output(&out, ctx.global.quiet);

    if fully_booked(&reserved) && !ctx.global.quiet {
        let name = ctx
            .session
            .store()
            .barber_display_name(args.barber.as_deref(), ctx.locale);
        eprintln!("Fully booked: no free slots for {name} on {}", args.date);
    }
    Ok(())
}
