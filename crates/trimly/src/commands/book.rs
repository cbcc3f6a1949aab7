//! The interactive booking wizard.
//!
//! Drives the core [`Wizard`] state machine end to end: every prompt maps
//! to a guarded transition, "back" entries walk the transition table in
//! reverse, and entered values survive backward navigation because the
//! draft is owned by the machine, not the prompts.

use chrono::{Local, NaiveDate};
use dialoguer::{Confirm, Input, Password, Select};
use owo_colors::OwoColorize;

use trimly_core::availability::{all_barbers_off, free_slots, fully_booked, selectable_barbers};
use trimly_core::{BarberChoice, Locale, ReservedSlots, Service, SlotQuery, Step, Wizard};

use crate::cli::BookArgs;
use crate::error::CliError;

use super::{Ctx, util};

pub async fn handle(ctx: &Ctx<'_>, args: BookArgs) -> Result<(), CliError> {
    util::require_terminal("book")?;

    let locale = ctx.locale;
    let store = ctx.session.store();
    let today = Local::now().date_naive();

    let mut wizard = Wizard::new();
    let mut reserved = ReservedSlots::new();
    // Deep-link preselection (e.g. "book with this barber" from the
    // directory listing); used as the default choice on the barber step.
    let mut preselect = args.barber;
    let mut login_offered = false;

    loop {
        match wizard.step() {
            // ── Step 1: date and service ─────────────────────────────
            Step::ServiceAndDate => {
                let default_date = wizard.draft().date.unwrap_or(today).to_string();
                let date_str: String = Input::new()
                    .with_prompt(match locale {
                        Locale::It => "Data dell'appuntamento (YYYY-MM-DD)",
                        Locale::En => "Appointment date (YYYY-MM-DD)",
                    })
                    .default(default_date)
                    .validate_with(|input: &String| -> Result<(), String> {
                        match input.parse::<NaiveDate>() {
                            Ok(date) if date >= today => Ok(()),
                            Ok(_) => Err("pick today or a later date".into()),
                            Err(_) => Err("use the YYYY-MM-DD format".into()),
                        }
                    })
                    .interact_text()?;
                let date: NaiveDate = date_str.parse().map_err(|_| CliError::Validation {
                    field: "date".into(),
                    reason: format!("invalid date: {date_str}"),
                })?;
                wizard.set_date(date, today)?;

                let items: Vec<String> = Service::ALL
                    .iter()
                    .map(|s| format!("{} - {}", s.label(locale), util::euro(s.price())))
                    .collect();
                let default_idx = wizard
                    .draft()
                    .service
                    .and_then(|s| Service::ALL.iter().position(|c| *c == s))
                    .unwrap_or(0);
                let idx = Select::new()
                    .with_prompt(match locale {
                        Locale::It => "Servizio",
                        Locale::En => "Service",
                    })
                    .items(&items)
                    .default(default_idx)
                    .interact()?;
                wizard.set_service(Service::ALL[idx])?;

                wizard.confirm_service_and_date()?;
            }

            // ── Step 2: barber ───────────────────────────────────────
            Step::Barber => {
                let Some(date) = wizard.draft().date else {
                    wizard.back();
                    continue;
                };
                let barbers = store.barbers_snapshot();
                let day_offs = store.day_offs_snapshot();

                if all_barbers_off(&barbers, &day_offs, date) {
                    eprintln!(
                        "{}",
                        match locale {
                            Locale::It =>
                                "Tutto il team è in ferie in questa data: scegli un altro giorno.",
                            Locale::En =>
                                "The whole team is off on that date: pick another day.",
                        }
                        .red()
                    );
                    wizard.back();
                    continue;
                }

                let candidates = selectable_barbers(&barbers, &day_offs, date);
                let mut items: Vec<String> = vec![locale.any_barber().to_owned()];
                items.extend(
                    candidates
                        .iter()
                        .map(|b| format!("{} ({})", b.name, b.role.label(locale))),
                );
                let back_idx = items.len();
                items.push("← Back".to_owned());

                let default_idx = preselect
                    .take()
                    .and_then(|id| candidates.iter().position(|b| b.id == id))
                    .map_or(0, |pos| pos + 1);

                let idx = Select::new()
                    .with_prompt(match locale {
                        Locale::It => "Barbiere",
                        Locale::En => "Barber",
                    })
                    .items(&items)
                    .default(default_idx)
                    .interact()?;

                if idx == back_idx {
                    wizard.back();
                    continue;
                }
                let choice = if idx == 0 {
                    BarberChoice::Any
                } else {
                    BarberChoice::Chosen(candidates[idx - 1].id.clone())
                };
                if let Err(e) = wizard.choose_barber(choice, day_offs.iter().map(|d| d.as_ref())) {
                    eprintln!("{}", e.to_string().red());
                }
            }

            // ── Step 3: time slot ────────────────────────────────────
            Step::Time => {
                let (Some(date), Some(choice)) =
                    (wizard.draft().date, wizard.draft().barber.clone())
                else {
                    wizard.back();
                    continue;
                };

                let query = SlotQuery::new(date, choice.wire_id().map(str::to_owned));
                reserved.begin(query.clone());
                match ctx.session.reserved_times(&query).await {
                    Ok(times) => {
                        reserved.apply(&query, times);
                    }
                    Err(e) => {
                        // Degrade to an unconstrained grid; the backend
                        // still rejects genuine conflicts on submit.
                        eprintln!("Could not load reserved slots: {e}");
                    }
                }

                if fully_booked(reserved.slots()) {
                    eprintln!(
                        "{}",
                        match locale {
                            Locale::It => "Tutto esaurito per questa giornata.",
                            Locale::En => "Fully booked for this day.",
                        }
                        .red()
                    );
                    wizard.back();
                    continue;
                }

                let free = free_slots(reserved.slots());
                let mut items: Vec<String> = free.iter().map(|s| (*s).to_owned()).collect();
                let back_idx = items.len();
                items.push("← Back".to_owned());

                let idx = Select::new()
                    .with_prompt(match locale {
                        Locale::It => "Orario",
                        Locale::En => "Time",
                    })
                    .items(&items)
                    .default(0)
                    .interact()?;

                if idx == back_idx {
                    wizard.back();
                    continue;
                }
                if let Err(e) = wizard.choose_slot(free[idx], reserved.slots()) {
                    eprintln!("{}", e.to_string().red());
                }
            }

            // ── Step 4: contact details and submission ───────────────
            Step::Details => {
                if !login_offered {
                    login_offered = true;
                    offer_login(ctx, &mut wizard).await?;
                }

                prompt_contact(&mut wizard, locale)?;
                print_summary(ctx, &wizard);

                let actions = match locale {
                    Locale::It => ["Conferma prenotazione", "Modifica dati", "← Back"],
                    Locale::En => ["Confirm booking", "Edit details", "← Back"],
                };
                let idx = Select::new().items(&actions).default(0).interact()?;
                match idx {
                    0 => {
                        if let Err(e) = wizard.can_submit() {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                        // Submission failure keeps the wizard on Details:
                        // show the blocking message and let the user retry
                        // or walk back. No automatic retry.
                        if let Err(e) = ctx.session.submit_booking(&mut wizard).await {
                            eprintln!(
                                "{}",
                                match locale {
                                    Locale::It => format!("Prenotazione non salvata: {e}"),
                                    Locale::En => format!("Booking was not saved: {e}"),
                                }
                                .red()
                                .bold()
                            );
                        }
                    }
                    1 => {}
                    _ => {
                        wizard.back();
                    }
                }
            }

            // ── Step 5: success ──────────────────────────────────────
            Step::Success => {
                let draft = wizard.draft();
                let barber_name = store.barber_display_name(
                    draft.barber.as_ref().and_then(BarberChoice::wire_id),
                    locale,
                );
                let date = draft.date.map(|d| d.to_string()).unwrap_or_default();
                let time = draft.time.clone().unwrap_or_default();
                let message = match locale {
                    Locale::It => format!(
                        "Grazie {}! Appuntamento confermato con {barber_name} il {date} alle {time}.",
                        draft.contact.name
                    ),
                    Locale::En => format!(
                        "Thanks {}! Appointment confirmed with {barber_name} on {date} at {time}.",
                        draft.contact.name
                    ),
                };
                println!("{}", message.green().bold());
                return Ok(());
            }
        }
    }
}

/// Optional inline login that pre-fills the contact fields on success.
async fn offer_login(ctx: &Ctx<'_>, wizard: &mut Wizard) -> Result<(), CliError> {
    let prompt = match ctx.locale {
        Locale::It => "Accedi per compilare i tuoi dati automaticamente?",
        Locale::En => "Log in to pre-fill your details?",
    };
    if !Confirm::new().with_prompt(prompt).default(false).interact()? {
        return Ok(());
    }

    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    match ctx.session.login(&email, &password).await {
        Ok(account) => {
            wizard.contact_mut().prefill(&account);
            eprintln!(
                "{}",
                match ctx.locale {
                    Locale::It => format!("Bentornato, {}! Dati caricati.", account.name),
                    Locale::En => format!("Welcome back, {}! Details loaded.", account.name),
                }
                .green()
            );
        }
        // A failed login is not fatal to the booking: details can still
        // be typed by hand.
        Err(e) => eprintln!("{}", format!("Login failed: {e}").red()),
    }
    Ok(())
}

/// Prompt for the contact fields, defaulting to whatever the draft
/// already holds (back navigation keeps previous entries).
fn prompt_contact(wizard: &mut Wizard, locale: Locale) -> Result<(), CliError> {
    let current = wizard.draft().contact.clone();

    let required = |value: &String| -> Result<(), String> {
        if value.trim().is_empty() {
            Err("required".into())
        } else {
            Ok(())
        }
    };

    let name: String = Input::new()
        .with_prompt(match locale {
            Locale::It => "Nome",
            Locale::En => "First name",
        })
        .with_initial_text(current.name)
        .validate_with(required)
        .interact_text()?;
    let surname: String = Input::new()
        .with_prompt(match locale {
            Locale::It => "Cognome",
            Locale::En => "Surname",
        })
        .with_initial_text(current.surname)
        .validate_with(required)
        .interact_text()?;
    let phone: String = Input::new()
        .with_prompt(match locale {
            Locale::It => "Telefono",
            Locale::En => "Phone",
        })
        .with_initial_text(current.phone)
        .validate_with(required)
        .interact_text()?;
    let email: String = Input::new()
        .with_prompt("Email")
        .with_initial_text(current.email)
        .validate_with(required)
        .interact_text()?;
    let message: String = Input::new()
        .with_prompt(match locale {
            Locale::It => "Messaggio (opzionale)",
            Locale::En => "Message (optional)",
        })
        .with_initial_text(current.message)
        .allow_empty(true)
        .interact_text()?;

    let contact = wizard.contact_mut();
    contact.name = name;
    contact.surname = surname;
    contact.phone = phone;
    contact.email = email;
    contact.message = message;
    Ok(())
}

/// One-line recap of the chosen appointment before submission.
fn print_summary(ctx: &Ctx<'_>, wizard: &Wizard) {
    let draft = wizard.draft();
    let barber = ctx.session.store().barber_display_name(
        draft.barber.as_ref().and_then(BarberChoice::wire_id),
        ctx.locale,
    );
    let service = draft
        .service
        .map(|s| format!("{} ({})", s.label(ctx.locale), util::euro(s.price())))
        .unwrap_or_default();
    let date = draft.date.map(|d| d.to_string()).unwrap_or_default();
    let time = draft.time.clone().unwrap_or_default();

    eprintln!("\n  {barber} | {date} @ {time} | {service}\n");
}
