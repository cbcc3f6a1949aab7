//! Reactive data layer between `trimly-api` and UI consumers (CLI / TUI).
//!
//! This crate owns the business logic and domain model for the trimly
//! workspace:
//!
//! - **[`ShopSession`]** — Central facade managing the connection lifecycle:
//!   [`connect()`](ShopSession::connect) fetches an initial data snapshot and
//!   spawns the command processor; [`start_polling()`](ShopSession::start_polling)
//!   adds the periodic dashboard refresh, cancelled again by
//!   [`stop_polling()`](ShopSession::stop_polling) when the dashboard unmounts.
//!
//! - **[`DataStore`]** — Reactive snapshot storage (`DashMap` +
//!   `tokio::sync::watch`). Every rendered list is an immutable point-in-time
//!   snapshot, replaced wholesale on refresh and patched by id on local
//!   mutations.
//!
//! - **[`Wizard`]** — The five-step booking flow as an explicit finite-state
//!   machine with guarded transitions and free backward navigation.
//!
//! - **[`ReservedSlots`]** — "Last input change wins" guard for the
//!   reserved-slot query: responses for a stale `(date, barber)` pair are
//!   discarded instead of overwriting newer results.
//!
//! - **[`stats`]** — Pure per-barber revenue aggregation (daily / weekly /
//!   monthly), recomputed from scratch on every snapshot change.
//!
//! - **Domain model** ([`model`]) — `Barber`, `Booking`, `DayOff`, the static
//!   [`Service`](model::Service) price table, and the fixed 30-minute slot
//!   grid.

pub mod availability;
pub mod command;
pub mod error;
pub mod locale;
pub mod model;
pub mod reserved;
pub mod session;
pub mod stats;
pub mod store;
pub mod wizard;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use error::CoreError;
pub use locale::Locale;
pub use reserved::{ReservedSlots, SlotQuery};
pub use session::{SessionConfig, ShopSession};
pub use store::DataStore;
pub use wizard::{BarberChoice, Contact, Draft, Step, Wizard, WizardError};

// Re-export model types at the crate root for ergonomics.
pub use model::{Barber, Booking, DayOff, Role, Service, slot_grid};
