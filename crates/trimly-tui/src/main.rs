mod app;
mod event;
mod theme;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use trimly_core::{Locale, ShopSession};

use crate::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _log_guard = init_tracing();

    // Same convenience gate as the CLI: the dashboard only mounts for an
    // operator who passed the backend credential check.
    if trimly_config::admin_marker().is_none() {
        return Err(eyre!(
            "No admin session. Run `trimly admin login` first."
        ));
    }

    let config = trimly_config::load_config_or_default();
    let profile_name = config
        .default_profile
        .clone()
        .unwrap_or_else(|| "default".into());
    let profile = config
        .profiles
        .get(&profile_name)
        .cloned()
        .unwrap_or_default();
    let locale: Locale = profile
        .locale
        .as_deref()
        .unwrap_or(&config.defaults.locale)
        .parse()
        .unwrap_or_default();

    let session_config = trimly_config::profile_to_session_config(&profile)?;
    let session = ShopSession::new(session_config)?;
    session.connect().await?;

    // Poll while the dashboard is mounted; stop before tearing down so
    // polling never outlives the view.
    session.start_polling().await;
    let result = App::new(session.clone(), locale).run().await;
    session.stop_polling().await;
    session.shutdown().await;

    result
}

/// Log to a file when `TRIMLY_TUI_LOG` points at one -- stderr would
/// corrupt the alternate screen.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let path = std::env::var("TRIMLY_TUI_LOG").ok()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
