//! Clap derive structures for the `trimly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// trimly -- booking and admin console for the barbershop backend
#[derive(Debug, Parser)]
#[command(
    name = "trimly",
    version,
    about = "Book appointments and run the shop from the command line",
    long_about = "Customer booking wizard and operator console for the\n\
        barbershop booking backend: appointments, revenue statistics,\n\
        day-off planning, and team management.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "TRIMLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 's', env = "TRIMLY_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TRIMLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Output language for service names and labels
    #[arg(long, env = "TRIMLY_LOCALE", global = true)]
    pub locale: Option<LocaleArg>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "TRIMLY_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output / Color / Locale Enums ────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LocaleArg {
    /// Italian (default)
    It,
    /// English
    En,
}

impl From<LocaleArg> for trimly_core::Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::It => Self::It,
            LocaleArg::En => Self::En,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Book an appointment (interactive wizard)
    #[command(alias = "b")]
    Book(BookArgs),

    /// Browse the barber directory
    Barbers(BarbersArgs),

    /// Show the slot grid for a date and barber
    Slots(SlotsArgs),

    /// Customer account management
    Account(AccountArgs),

    /// Operator console (requires admin login)
    Admin(AdminArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Pre-select a barber by id (as when arriving from the team page)
    #[arg(long)]
    pub barber: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BARBERS (public)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BarbersArgs {
    #[command(subcommand)]
    pub command: BarbersCommand,
}

#[derive(Debug, Subcommand)]
pub enum BarbersCommand {
    /// List the directory
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SLOTS (public)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SlotsArgs {
    /// Appointment date (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    pub date: NaiveDate,

    /// Barber id; omit for "any barber"
    #[arg(long, short = 'b')]
    pub barber: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACCOUNT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Register a customer account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Log in and show the stored contact details
    Login {
        #[arg(long)]
        email: String,
    },

    /// Delete a customer account. Irreversible.
    Delete {
        /// Account id
        id: i64,
        #[arg(long)]
        email: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMIN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Check credentials and store the local session marker
    Login {
        /// Admin email (falls back to the profile, then a prompt)
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove the local session marker
    Logout,

    /// Show whether an admin session marker is present
    Status,

    /// View and delete bookings
    Bookings(AdminBookingsArgs),

    /// Per-barber revenue statistics (today / this week / this month)
    Stats,

    /// Per-barber free slots and day-off flags for a date
    Availability {
        /// Date to inspect (defaults to today)
        #[arg(long, short = 'd')]
        date: Option<NaiveDate>,
    },

    /// Manage day-off blocks
    Dayoffs(AdminDayoffsArgs),

    /// Manage the barber directory
    Barbers(AdminBarbersArgs),

    /// Record a phone-in or walk-in booking
    Book(AdminBookArgs),
}

#[derive(Debug, Args)]
pub struct AdminBookingsArgs {
    #[command(subcommand)]
    pub command: AdminBookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminBookingsCommand {
    /// List bookings, optionally for one date
    #[command(alias = "ls")]
    List {
        /// Only bookings on this date
        #[arg(long, short = 'd')]
        date: Option<NaiveDate>,
    },

    /// Delete a booking by id
    #[command(alias = "rm")]
    Delete {
        /// Booking id
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct AdminDayoffsArgs {
    #[command(subcommand)]
    pub command: AdminDayoffsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminDayoffsCommand {
    /// List day-off records
    #[command(alias = "ls")]
    List,

    /// Block a barber for a date range (expanded per day server-side)
    Add {
        /// Barber id
        #[arg(long, short = 'b')]
        barber: String,
        /// First blocked day (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last blocked day (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
    },

    /// Delete one day-off record (reactivates that single date)
    #[command(alias = "rm")]
    Delete {
        /// Day-off record id
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct AdminBarbersArgs {
    #[command(subcommand)]
    pub command: AdminBarbersCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminBarbersCommand {
    /// List the directory with roles and ids
    #[command(alias = "ls")]
    List,

    /// Add a barber; the image file is inlined as a data URI
    Add {
        #[arg(long)]
        name: String,
        /// Role: head-barber, stylist, barber, junior
        #[arg(long, default_value = "barber")]
        role: RoleArg,
        /// Profile image file (JPEG/PNG), stored inline
        #[arg(long)]
        image: PathBuf,
        /// Italian description
        #[arg(long, default_value = "")]
        description_it: String,
        /// English description
        #[arg(long, default_value = "")]
        description_en: String,
    },

    /// Delete a barber. Irreversible.
    #[command(alias = "rm")]
    Delete {
        /// Barber id
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    HeadBarber,
    Stylist,
    Barber,
    Junior,
}

impl From<RoleArg> for trimly_core::Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::HeadBarber => Self::HeadBarber,
            RoleArg::Stylist => Self::Stylist,
            RoleArg::Barber => Self::Barber,
            RoleArg::Junior => Self::Junior,
        }
    }
}

#[derive(Debug, Args)]
pub struct AdminBookArgs {
    /// Barber id (manual entries always name a barber)
    #[arg(long, short = 'b')]
    pub barber: String,

    /// Service id: cut, beard, combo, kid
    #[arg(long)]
    pub service: String,

    /// Appointment date (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    pub date: NaiveDate,

    /// Slot label (e.g. 10:00)
    #[arg(long, short = 't')]
    pub time: String,

    /// Customer first name
    #[arg(long)]
    pub name: String,

    /// Customer surname
    #[arg(long)]
    pub surname: String,

    /// Customer email
    #[arg(long, default_value = "")]
    pub email: String,

    /// Customer phone
    #[arg(long, default_value = "")]
    pub phone: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile interactively
    Init,

    /// Print the config file path
    Path,

    /// Show the effective configuration
    Show,

    /// Store the admin password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
