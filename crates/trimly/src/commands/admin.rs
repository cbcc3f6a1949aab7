//! Operator console handlers.
//!
//! Everything except `login` / `logout` / `status` is gated on the local
//! admin session marker. The marker is a convenience gate set only after
//! the backend confirmed the credentials; the backend still authorizes
//! every mutating call on its own.

use chrono::{Local, NaiveDate};
use dialoguer::{Input, Password};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::Tabled;

use trimly_api::{DayOffRange, NewBarber, NewBooking};
use trimly_core::availability::daily_availability;
use trimly_core::stats::revenue_by_barber;
use trimly_core::{Command as CoreCommand, Locale, Service, SlotQuery, model};

use crate::cli::{
    AdminArgs, AdminBarbersCommand, AdminBookArgs, AdminBookingsCommand, AdminCommand,
    AdminDayoffsCommand,
};
use crate::error::CliError;
use crate::output;

use super::{Ctx, util};

pub async fn handle(ctx: &Ctx<'_>, args: AdminArgs) -> Result<(), CliError> {
    match args.command {
        AdminCommand::Login { email } => login(ctx, email).await,
        AdminCommand::Logout => {
            trimly_config::clear_admin_marker()?;
            if !ctx.global.quiet {
                eprintln!("Admin session cleared");
            }
            Ok(())
        }
        AdminCommand::Status => {
            match trimly_config::admin_marker() {
                Some(email) => println!("Admin session active for {email}"),
                None => println!("No admin session (run: trimly admin login)"),
            }
            Ok(())
        }

        // Everything below requires the marker.
        AdminCommand::Bookings(sub) => {
            require_admin()?;
            match sub.command {
                AdminBookingsCommand::List { date } => list_bookings(ctx, date),
                AdminBookingsCommand::Delete { id } => delete_booking(ctx, id).await,
            }
        }
        AdminCommand::Stats => {
            require_admin()?;
            stats(ctx)
        }
        AdminCommand::Availability { date } => {
            require_admin()?;
            availability(ctx, date)
        }
        AdminCommand::Dayoffs(sub) => {
            require_admin()?;
            match sub.command {
                AdminDayoffsCommand::List => list_day_offs(ctx),
                AdminDayoffsCommand::Add { barber, from, to } => {
                    add_day_off(ctx, barber, from, to).await
                }
                AdminDayoffsCommand::Delete { id } => delete_day_off(ctx, id).await,
            }
        }
        AdminCommand::Barbers(sub) => {
            require_admin()?;
            match sub.command {
                AdminBarbersCommand::List => list_barbers(ctx),
                AdminBarbersCommand::Add {
                    name,
                    role,
                    image,
                    description_it,
                    description_en,
                } => add_barber(ctx, name, role, &image, description_it, description_en).await,
                AdminBarbersCommand::Delete { id } => delete_barber(ctx, id).await,
            }
        }
        AdminCommand::Book(book) => {
            require_admin()?;
            manual_booking(ctx, book).await
        }
    }
}

fn require_admin() -> Result<(), CliError> {
    if trimly_config::admin_marker().is_some() {
        Ok(())
    } else {
        Err(CliError::AdminRequired)
    }
}

// ── Auth ─────────────────────────────────────────────────────────────

async fn login(ctx: &Ctx<'_>, email_flag: Option<String>) -> Result<(), CliError> {
    let email = match email_flag
        .or_else(|| ctx.profile.admin_email.clone())
        .or_else(|| std::env::var("TRIMLY_ADMIN_EMAIL").ok())
    {
        Some(email) => email,
        None => {
            util::require_terminal("admin login")?;
            Input::new().with_prompt("Admin email").interact_text()?
        }
    };

    let password = match trimly_config::resolve_admin_password(&ctx.profile, &ctx.profile_name) {
        Ok(secret) => {
            use secrecy::ExposeSecret;
            secret.expose_secret().to_owned()
        }
        Err(_) => {
            util::require_terminal("admin login")?;
            Password::new().with_prompt("Admin password").interact()?
        }
    };

    if ctx.session.check_admin(&email, &password).await? {
        trimly_config::store_admin_marker(&email)?;
        if !ctx.global.quiet {
            eprintln!("{}", "Admin session started".green());
        }
        Ok(())
    } else {
        Err(CliError::AuthFailed {
            message: "invalid admin credentials".into(),
        })
    }
}

// ── Bookings ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Barber")]
    barber: String,
}

fn list_bookings(ctx: &Ctx<'_>, date: Option<NaiveDate>) -> Result<(), CliError> {
    let store = ctx.session.store();
    let snapshot = store.bookings_snapshot();
    let locale = ctx.locale;

    let bookings: Vec<_> = snapshot
        .iter()
        .filter(|b| date.is_none_or(|d| b.date == d))
        .cloned()
        .collect();

    let out = output::render_list(
        &ctx.global.output,
        &bookings,
        |b| BookingRow {
            id: b.id,
            date: b.date.to_string(),
            time: b.time.clone(),
            customer: b.customer(),
            phone: b.phone.clone(),
            service: Service::display_name(&b.service, locale),
            price: util::euro(b.price),
            barber: store.barber_display_name(b.barber.as_deref(), locale),
        },
        |b| b.id.to_string(),
    );
    output::print_output(&out, ctx.global.quiet);

    if bookings.is_empty() && !ctx.global.quiet {
        if let Some(d) = date {
            eprintln!("No bookings on {d}");
        }
    }
    Ok(())
}

async fn delete_booking(ctx: &Ctx<'_>, id: i64) -> Result<(), CliError> {
    if !util::confirm(
        &format!("Delete booking {id}? The customer is not notified by this tool."),
        ctx.global.yes,
    )? {
        return Ok(());
    }
    ctx.session
        .execute(CoreCommand::DeleteBooking { id })
        .await?;
    if !ctx.global.quiet {
        eprintln!("Booking {id} deleted");
    }
    Ok(())
}

// ── Revenue statistics ───────────────────────────────────────────────

#[derive(Serialize)]
struct StatsEntry {
    id: String,
    name: String,
    daily: f64,
    weekly: f64,
    monthly: f64,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Barber")]
    barber: String,
    #[tabled(rename = "Today")]
    today: String,
    #[tabled(rename = "This week")]
    week: String,
    #[tabled(rename = "This month")]
    month: String,
}

fn stats(ctx: &Ctx<'_>) -> Result<(), CliError> {
    let store = ctx.session.store();
    let bookings = store.bookings_snapshot();
    let barbers = store.barbers_snapshot();
    let today = Local::now().date_naive();

    let totals = revenue_by_barber(&bookings, &barbers, today);
    let entries: Vec<StatsEntry> = barbers
        .iter()
        .map(|b| {
            let t = totals.get(&b.id).copied().unwrap_or_default();
            StatsEntry {
                id: b.id.clone(),
                name: b.name.clone(),
                daily: t.daily,
                weekly: t.weekly,
                monthly: t.monthly,
            }
        })
        .collect();

    let out = output::render_list(
        &ctx.global.output,
        &entries,
        |e| StatsRow {
            barber: e.name.clone(),
            today: util::euro(e.daily),
            week: util::euro(e.weekly),
            month: util::euro(e.monthly),
        },
        |e| format!("{}\t{}\t{}\t{}", e.id, e.daily, e.weekly, e.monthly),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

// ── Daily availability ───────────────────────────────────────────────

#[derive(Serialize)]
struct AvailabilityEntry {
    id: String,
    name: String,
    day_off: bool,
    free_slots: Vec<&'static str>,
}

#[derive(Tabled)]
struct AvailabilityRow {
    #[tabled(rename = "Barber")]
    barber: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Free slots")]
    slots: String,
}

fn availability(ctx: &Ctx<'_>, date: Option<NaiveDate>) -> Result<(), CliError> {
    let store = ctx.session.store();
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let locale = ctx.locale;

    let rows = daily_availability(
        &store.barbers_snapshot(),
        &store.day_offs_snapshot(),
        &store.bookings_snapshot(),
        date,
    );
    let entries: Vec<AvailabilityEntry> = rows
        .into_iter()
        .map(|row| AvailabilityEntry {
            id: row.barber.id.clone(),
            name: row.barber.name.clone(),
            day_off: row.is_day_off,
            free_slots: row.free_slots,
        })
        .collect();

    let out = output::render_list(
        &ctx.global.output,
        &entries,
        |e| {
            let (status, slots) = if e.day_off {
                (
                    match locale {
                        Locale::It => "IN FERIE",
                        Locale::En => "DAY OFF",
                    }
                    .to_owned(),
                    String::new(),
                )
            } else if e.free_slots.is_empty() {
                (
                    String::new(),
                    match locale {
                        Locale::It => "Nessuna disponibilità",
                        Locale::En => "No availability",
                    }
                    .to_owned(),
                )
            } else {
                (String::new(), e.free_slots.join(" "))
            };
            AvailabilityRow {
                barber: e.name.clone(),
                status,
                slots,
            }
        },
        |e| e.id.clone(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

// ── Day-off management ───────────────────────────────────────────────

#[derive(Tabled)]
struct DayOffRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Barber")]
    barber: String,
    #[tabled(rename = "Date")]
    date: String,
}

fn list_day_offs(ctx: &Ctx<'_>) -> Result<(), CliError> {
    let store = ctx.session.store();
    let snapshot = store.day_offs_snapshot();
    let day_offs: Vec<_> = snapshot.iter().cloned().collect();

    let out = output::render_list(
        &ctx.global.output,
        &day_offs,
        |d| DayOffRow {
            id: d.id,
            barber: store.barber_display_name(Some(&d.barber_id), ctx.locale),
            date: d.date.to_string(),
        },
        |d| d.id.to_string(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

async fn add_day_off(
    ctx: &Ctx<'_>,
    barber: String,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(), CliError> {
    if to < from {
        return Err(CliError::Validation {
            field: "to".into(),
            reason: "end date is before start date".into(),
        });
    }
    if from < Local::now().date_naive() {
        return Err(CliError::Validation {
            field: "from".into(),
            reason: "start date is in the past".into(),
        });
    }

    let result = ctx
        .session
        .execute(CoreCommand::AddDayOff(DayOffRange {
            barber_id: barber.clone(),
            start_date: from,
            end_date: to,
        }))
        .await?;

    if !ctx.global.quiet {
        if let trimly_core::CommandResult::DayOffs(records) = result {
            eprintln!(
                "Blocked {} for {} day(s) ({from} → {to})",
                ctx.session
                    .store()
                    .barber_display_name(Some(&barber), ctx.locale),
                records.len()
            );
        }
    }
    Ok(())
}

async fn delete_day_off(ctx: &Ctx<'_>, id: i64) -> Result<(), CliError> {
    if !util::confirm(
        &format!("Reactivate the barber for day-off record {id}? Only that single date is freed."),
        ctx.global.yes,
    )? {
        return Ok(());
    }
    ctx.session
        .execute(CoreCommand::DeleteDayOff { id })
        .await?;
    if !ctx.global.quiet {
        eprintln!("Day-off {id} removed");
    }
    Ok(())
}

// ── Barber management ────────────────────────────────────────────────

#[derive(Tabled)]
struct BarberAdminRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
}

fn list_barbers(ctx: &Ctx<'_>) -> Result<(), CliError> {
    let snapshot = ctx.session.store().barbers_snapshot();
    let barbers: Vec<_> = snapshot.iter().cloned().collect();

    let out = output::render_list(
        &ctx.global.output,
        &barbers,
        |b| BarberAdminRow {
            id: b.id.clone(),
            name: b.name.clone(),
            role: b.role.label(ctx.locale),
        },
        |b| b.id.clone(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

async fn add_barber(
    ctx: &Ctx<'_>,
    name: String,
    role: crate::cli::RoleArg,
    image: &std::path::Path,
    description_it: String,
    description_en: String,
) -> Result<(), CliError> {
    let img = inline_image(image)?;
    let role: model::Role = role.into();

    let result = ctx
        .session
        .execute(CoreCommand::AddBarber(NewBarber {
            name,
            role_key: role.key(),
            img,
            description_it,
            description_en,
        }))
        .await?;

    if !ctx.global.quiet {
        if let trimly_core::CommandResult::Barber(barber) = result {
            eprintln!("Barber '{}' added (id {})", barber.name, barber.id);
        }
    }
    Ok(())
}

async fn delete_barber(ctx: &Ctx<'_>, id: String) -> Result<(), CliError> {
    let name = ctx
        .session
        .store()
        .barber_display_name(Some(&id), ctx.locale);
    if !util::confirm(
        &format!("Delete {name}? This is irreversible."),
        ctx.global.yes,
    )? {
        return Ok(());
    }
    ctx.session
        .execute(CoreCommand::DeleteBarber { id })
        .await?;
    if !ctx.global.quiet {
        eprintln!("Barber deleted");
    }
    Ok(())
}

/// Read an image file and inline it as a data URI -- the backend stores
/// the directory image verbatim rather than hosting files.
fn inline_image(path: &std::path::Path) -> Result<String, CliError> {
    use base64::Engine;

    let bytes = std::fs::read(path)?;
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        other => {
            return Err(CliError::Validation {
                field: "image".into(),
                reason: format!("unsupported image type: {other:?}"),
            });
        }
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

// ── Manual booking entry ─────────────────────────────────────────────

/// Record a phone-in or walk-in booking. Same payload shape as the public
/// wizard; the reserved-slot query is consulted first so an already-taken
/// time is rejected before any submission.
async fn manual_booking(ctx: &Ctx<'_>, args: AdminBookArgs) -> Result<(), CliError> {
    let Some(service) = Service::from_id(&args.service) else {
        return Err(CliError::Validation {
            field: "service".into(),
            reason: format!("unknown service '{}'", args.service),
        });
    };
    if !model::is_on_grid(&args.time) {
        return Err(CliError::Validation {
            field: "time".into(),
            reason: format!("'{}' is not on the slot grid", args.time),
        });
    }

    let query = SlotQuery::new(args.date, Some(args.barber.clone()));
    let reserved = ctx.session.reserved_times(&query).await?;
    if reserved.iter().any(|r| *r == args.time) {
        return Err(CliError::Validation {
            field: "time".into(),
            reason: format!("slot {} is already taken for that barber", args.time),
        });
    }

    let result = ctx
        .session
        .execute(CoreCommand::CreateBooking(NewBooking {
            barber: Some(args.barber),
            service: service.id().to_owned(),
            date: args.date,
            time: args.time,
            name: args.name,
            surname: args.surname,
            email: args.email,
            phone: args.phone,
            message: String::new(),
            price: service.price(),
        }))
        .await?;

    if !ctx.global.quiet {
        let booking = result.into_booking().map_err(CliError::from)?;
        eprintln!(
            "Booking recorded: id {} on {} at {}",
            booking.id, booking.date, booking.time
        );
    }
    Ok(())
}
