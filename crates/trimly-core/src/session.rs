// ── Session abstraction ──
//
// Lifecycle management for a connection to the booking backend:
// initial snapshot fetch, command routing, dashboard polling, and
// reactive data access through the DataStore.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use trimly_api::{AdminCredentials, CustomerAccount, RegisterRequest, ShopClient, TransportConfig};

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::error::CoreError;
use crate::model::{Barber, Booking, DayOff};
use crate::reserved::SlotQuery;
use crate::store::DataStore;
use crate::wizard::Wizard;

const COMMAND_CHANNEL_SIZE: usize = 64;

/// Connection parameters for a [`ShopSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API base URL (e.g. `http://localhost:8081/api`).
    pub url: Url,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Dashboard refresh interval. The admin views re-fetch bookings and
    /// day-offs at this cadence while mounted.
    pub poll_interval: Duration,
}

impl SessionConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(5),
        }
    }
}

// ── ShopSession ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Owns the API client, the
/// reactive [`DataStore`], the command processor, and (while a dashboard
/// is mounted) the polling task.
#[derive(Clone)]
pub struct ShopSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    client: ShopClient,
    store: Arc<DataStore>,
    command_tx: Mutex<mpsc::Sender<CommandEnvelope>>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    /// Child token for the polling task -- cancelled by `stop_polling()`,
    /// replaced when polling restarts.
    poll_cancel: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl ShopSession {
    /// Create a session from configuration. Does NOT fetch anything --
    /// call [`connect()`](Self::connect) to load the initial snapshot and
    /// start the command processor.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = ShopClient::new(config.url.clone(), &transport)?;
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let poll_cancel = cancel.child_token();

        Ok(Self {
            inner: Arc::new(SessionInner {
                config,
                client,
                store: Arc::new(DataStore::new()),
                command_tx: Mutex::new(command_tx),
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                poll_cancel: Mutex::new(poll_cancel),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    pub fn client(&self) -> &ShopClient {
        &self.inner.client
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Load the initial data snapshot and spawn the command processor.
    ///
    /// The three collections are fetched concurrently. Directory and
    /// day-off failures degrade to empty lists with a logged diagnostic
    /// so dependent views keep working; they are refreshed again by
    /// polling or explicit refetch.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let (barbers_res, day_offs_res, bookings_res) = tokio::join!(
            self.inner.client.list_barbers(),
            self.inner.client.list_day_offs(),
            self.inner.client.list_bookings(),
        );

        match barbers_res {
            Ok(records) => self
                .inner
                .store
                .apply_barbers(records.into_iter().map(Barber::from).collect()),
            Err(e) => warn!(error = %e, "barber directory fetch failed; starting empty"),
        }
        match day_offs_res {
            Ok(records) => self
                .inner
                .store
                .apply_day_offs(records.into_iter().map(DayOff::from).collect()),
            Err(e) => warn!(error = %e, "day-off fetch failed; starting empty"),
        }
        match bookings_res {
            Ok(records) => self
                .inner
                .store
                .apply_bookings(records.into_iter().map(Booking::from).collect()),
            Err(e) => warn!(error = %e, "booking fetch failed; starting empty"),
        }

        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let session = self.clone();
            self.inner
                .task_handles
                .lock()
                .await
                .push(tokio::spawn(command_processor_task(session, rx)));
        }

        info!(
            barbers = self.inner.store.barber_count(),
            bookings = self.inner.store.booking_count(),
            "connected to booking backend"
        );
        Ok(())
    }

    /// Start the dashboard polling task (bookings + day-offs every
    /// `poll_interval`). Call [`stop_polling()`](Self::stop_polling) when
    /// the dashboard unmounts -- polling must not outlive the view.
    pub async fn start_polling(&self) {
        let child = self.inner.cancel.child_token();
        *self.inner.poll_cancel.lock().await = child.clone();

        let session = self.clone();
        let interval = self.inner.config.poll_interval;
        self.inner
            .task_handles
            .lock()
            .await
            .push(tokio::spawn(poll_task(session, interval, child)));
    }

    /// Cancel the polling task. The command processor keeps running.
    pub async fn stop_polling(&self) {
        self.inner.poll_cancel.lock().await.cancel();
    }

    /// Shut the session down: cancel every background task and join them.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("session shut down");
    }

    /// One-shot: connect, run the closure, shut down.
    ///
    /// Optimized for CLI invocations that need a single request-response
    /// cycle and no polling.
    pub async fn oneshot<F, Fut, T>(config: SessionConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(ShopSession) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let session = ShopSession::new(config)?;
        session.connect().await?;
        let result = f(session.clone()).await;
        session.shutdown().await;
        result
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Re-fetch bookings and replace the snapshot wholesale.
    pub async fn refresh_bookings(&self) -> Result<(), CoreError> {
        let records = self.inner.client.list_bookings().await?;
        self.inner
            .store
            .apply_bookings(records.into_iter().map(Booking::from).collect());
        Ok(())
    }

    /// Re-fetch day-offs and replace the snapshot wholesale.
    pub async fn refresh_day_offs(&self) -> Result<(), CoreError> {
        let records = self.inner.client.list_day_offs().await?;
        self.inner
            .store
            .apply_day_offs(records.into_iter().map(DayOff::from).collect());
        Ok(())
    }

    /// Re-fetch the barber directory and replace the snapshot wholesale.
    pub async fn refresh_barbers(&self) -> Result<(), CoreError> {
        let records = self.inner.client.list_barbers().await?;
        self.inner
            .store
            .apply_barbers(records.into_iter().map(Barber::from).collect());
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Fetch the reserved slot labels for a `(date, barber)` pair.
    ///
    /// Callers pair this with [`ReservedSlots`](crate::ReservedSlots) to
    /// guard against out-of-order completions.
    pub async fn reserved_times(&self, query: &SlotQuery) -> Result<Vec<String>, CoreError> {
        let records = self
            .inner
            .client
            .reserved_bookings(query.date, query.barber.as_deref())
            .await?;
        Ok(records.into_iter().map(|r| r.time).collect())
    }

    // ── Command execution ────────────────────────────────────────────

    /// Execute a mutation through the command processor.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let command_tx = self.inner.command_tx.lock().await.clone();

        command_tx
            .send(CommandEnvelope {
                command,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::SessionClosed)?;

        rx.await.map_err(|_| CoreError::SessionClosed)?
    }

    /// Submit a completed wizard draft.
    ///
    /// Builds the payload (price derived from the service table), POSTs
    /// it, and advances the wizard to `Success` only on a 2xx response.
    /// On failure the wizard stays on `Details` and the error is returned
    /// for the caller to surface.
    pub async fn submit_booking(&self, wizard: &mut Wizard) -> Result<Arc<Booking>, CoreError> {
        let request = wizard.build_request()?;
        let result = self.execute(Command::CreateBooking(request)).await?;
        let booking = result.into_booking()?;
        wizard.complete()?;
        Ok(booking)
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Check admin credentials against the backend. Returns the backend's
    /// verdict; persisting the resulting session marker is the caller's
    /// (config crate's) concern.
    pub async fn check_admin(&self, email: &str, password: &str) -> Result<bool, CoreError> {
        let valid = self
            .inner
            .client
            .check_admin(&AdminCredentials {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .await?;
        Ok(valid)
    }

    /// Customer login; the returned account pre-fills wizard contact
    /// fields.
    pub async fn login(&self, email: &str, password: &str) -> Result<CustomerAccount, CoreError> {
        Ok(self.inner.client.login(email, password).await?)
    }

    /// Customer registration.
    pub async fn register(&self, request: &RegisterRequest) -> Result<CustomerAccount, CoreError> {
        Ok(self.inner.client.register(request).await?)
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Periodic dashboard refresh: bookings and day-offs, concurrently, on a
/// fixed interval. Failures keep the previous snapshot and log a warning;
/// the next tick retries.
async fn poll_task(session: ShopSession, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; skip it, connect() just fetched.
    ticker.tick().await;

    debug!(interval_secs = interval.as_secs(), "dashboard polling started");
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let (bookings, day_offs) = tokio::join!(
                    session.refresh_bookings(),
                    session.refresh_day_offs(),
                );
                if let Err(e) = bookings {
                    warn!(error = %e, "booking poll failed; keeping previous snapshot");
                }
                if let Err(e) = day_offs {
                    warn!(error = %e, "day-off poll failed; keeping previous snapshot");
                }
            }
        }
    }
    debug!("dashboard polling stopped");
}

/// Drains the command channel, performs each mutation, and patches the
/// store on success so the UI reflects the change before the next poll.
async fn command_processor_task(session: ShopSession, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = session.inner.cancel.clone();
    loop {
        let envelope = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => match envelope {
                Some(envelope) => envelope,
                None => break,
            },
        };

        let result = process_command(&session, envelope.command).await;
        let _ = envelope.response_tx.send(result);
    }
    debug!("command processor stopped");
}

async fn process_command(
    session: &ShopSession,
    command: Command,
) -> Result<CommandResult, CoreError> {
    let client = &session.inner.client;
    let store = &session.inner.store;

    match command {
        Command::CreateBooking(request) => {
            let stored = client.create_booking(&request).await?;
            let booking = Booking::from(stored);
            store.insert_booking(booking.clone());
            Ok(CommandResult::Booking(Arc::new(booking)))
        }
        Command::DeleteBooking { id } => {
            client.delete_booking(id).await?;
            store.remove_booking(id);
            Ok(CommandResult::Deleted)
        }
        Command::AddDayOff(range) => {
            let records = client.create_day_off(&range).await?;
            let day_offs: Vec<DayOff> = records.into_iter().map(DayOff::from).collect();
            store.insert_day_offs(day_offs.clone());
            Ok(CommandResult::DayOffs(
                day_offs.into_iter().map(Arc::new).collect(),
            ))
        }
        Command::DeleteDayOff { id } => {
            client.delete_day_off(id).await?;
            store.remove_day_off(id);
            Ok(CommandResult::Deleted)
        }
        Command::AddBarber(request) => {
            let stored = client.create_barber(&request).await?;
            let barber = Barber::from(stored);
            store.insert_barber(barber.clone());
            Ok(CommandResult::Barber(Arc::new(barber)))
        }
        Command::DeleteBarber { id } => {
            client.delete_barber(&id).await?;
            store.remove_barber(&id);
            Ok(CommandResult::Deleted)
        }
        Command::DeleteAccount { id } => {
            client.delete_account(id).await?;
            Ok(CommandResult::Deleted)
        }
    }
}
