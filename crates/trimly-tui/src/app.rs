//! Application core — event loop, tab management, rendering.
//!
//! The dashboard renders from the store's `watch` subscriptions; the
//! session's polling task (5 s) pushes fresh snapshots into them while
//! the app is mounted, so concurrent bookings made through the public
//! wizard appear without any action here. Deletions are routed through
//! the session's command channel and patch the store immediately.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, Local, NaiveDate};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, TableState, Tabs},
};
use tokio::sync::watch;

use trimly_core::availability::daily_availability;
use trimly_core::stats::revenue_by_barber;
use trimly_core::{Barber, Booking, Command, DayOff, Locale, Service, ShopSession};

use crate::event::{Event, EventReader};
use crate::theme;

// ── Tabs ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Bookings,
    Stats,
    Availability,
    DaysOff,
}

impl Tab {
    const ALL: [Self; 4] = [Self::Bookings, Self::Stats, Self::Availability, Self::DaysOff];

    fn label(self) -> &'static str {
        match self {
            Self::Bookings => "Bookings",
            Self::Stats => "Stats",
            Self::Availability => "Availability",
            Self::DaysOff => "Days off",
        }
    }

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A destructive action awaiting y/n confirmation.
enum PendingDelete {
    Booking(i64),
    DayOff(i64),
}

// ── App ──────────────────────────────────────────────────────────────

pub struct App {
    session: ShopSession,
    locale: Locale,

    bookings_rx: watch::Receiver<Arc<Vec<Arc<Booking>>>>,
    day_offs_rx: watch::Receiver<Arc<Vec<Arc<DayOff>>>>,
    barbers_rx: watch::Receiver<Arc<Vec<Arc<Barber>>>>,

    active_tab: Tab,
    selected_date: NaiveDate,
    table_state: TableState,
    confirm: Option<PendingDelete>,
    status: Option<String>,
    running: bool,
}

impl App {
    pub fn new(session: ShopSession, locale: Locale) -> Self {
        let store = session.store();
        let bookings_rx = store.subscribe_bookings();
        let day_offs_rx = store.subscribe_day_offs();
        let barbers_rx = store.subscribe_barbers();

        Self {
            session,
            locale,
            bookings_rx,
            day_offs_rx,
            barbers_rx,
            active_tab: Tab::Bookings,
            selected_date: Local::now().date_naive(),
            table_state: TableState::default().with_selected(Some(0)),
            confirm: None,
            status: None,
            running: true,
        }
    }

    /// Run the main event loop until quit.
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let mut events = EventReader::new(Duration::from_millis(250));

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            let Some(event) = events.next().await else {
                break;
            };
            match event {
                Event::Key(key) => self.handle_key(key).await,
                Event::Resize | Event::Tick => {}
            }
        }

        ratatui::restore();
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    async fn handle_key(&mut self, key: KeyEvent) {
        // Confirmation overlay captures everything.
        if self.confirm.is_some() {
            match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => self.execute_pending_delete().await,
                _ => self.confirm = None,
            }
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => self.running = false,

            (_, KeyCode::Tab) => self.switch_tab(self.active_tab.next()),
            (_, KeyCode::BackTab) => self.switch_tab(self.active_tab.prev()),
            (_, KeyCode::Char('1')) => self.switch_tab(Tab::Bookings),
            (_, KeyCode::Char('2')) => self.switch_tab(Tab::Stats),
            (_, KeyCode::Char('3')) => self.switch_tab(Tab::Availability),
            (_, KeyCode::Char('4')) => self.switch_tab(Tab::DaysOff),

            (_, KeyCode::Down | KeyCode::Char('j')) => self.move_selection(1),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.move_selection(-1),

            (_, KeyCode::Left | KeyCode::Char('h')) => self.shift_date(-1),
            (_, KeyCode::Right | KeyCode::Char('l')) => self.shift_date(1),
            (_, KeyCode::Char('t')) => {
                self.selected_date = Local::now().date_naive();
            }

            (_, KeyCode::Char('d') | KeyCode::Delete) => self.request_delete(),

            (_, KeyCode::Char('r')) => self.refresh().await,

            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        if tab != self.active_tab {
            self.active_tab = tab;
            self.table_state.select(Some(0));
            self.status = None;
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.selectable_len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        #[allow(clippy::cast_possible_wrap, clippy::as_conversions)]
        let current = self.table_state.selected().unwrap_or(0) as i64;
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation, clippy::as_conversions)]
        let next = (current + delta).clamp(0, (len - 1) as i64) as usize;
        self.table_state.select(Some(next));
    }

    fn shift_date(&mut self, delta: i64) {
        self.selected_date = if delta >= 0 {
            self.selected_date + Days::new(1)
        } else {
            self.selected_date - Days::new(1)
        };
        self.table_state.select(Some(0));
    }

    fn selectable_len(&self) -> usize {
        match self.active_tab {
            Tab::Bookings => self.bookings_for_date().len(),
            Tab::DaysOff => self.day_offs_rx.borrow().len(),
            Tab::Stats | Tab::Availability => 0,
        }
    }

    fn bookings_for_date(&self) -> Vec<Arc<Booking>> {
        self.bookings_rx
            .borrow()
            .iter()
            .filter(|b| b.date == self.selected_date)
            .map(Arc::clone)
            .collect()
    }

    fn request_delete(&mut self) {
        let Some(idx) = self.table_state.selected() else {
            return;
        };
        match self.active_tab {
            Tab::Bookings => {
                if let Some(booking) = self.bookings_for_date().get(idx) {
                    self.confirm = Some(PendingDelete::Booking(booking.id));
                }
            }
            Tab::DaysOff => {
                let day_offs = self.day_offs_rx.borrow().clone();
                if let Some(day_off) = day_offs.get(idx) {
                    self.confirm = Some(PendingDelete::DayOff(day_off.id));
                }
            }
            Tab::Stats | Tab::Availability => {}
        }
    }

    async fn execute_pending_delete(&mut self) {
        let Some(pending) = self.confirm.take() else {
            return;
        };
        let command = match pending {
            PendingDelete::Booking(id) => Command::DeleteBooking { id },
            PendingDelete::DayOff(id) => Command::DeleteDayOff { id },
        };
        // The store is patched by the command processor on success, so
        // the table and the recomputed stats update without a refetch.
        match self.session.execute(command).await {
            Ok(_) => self.status = None,
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                self.status = Some(e.to_string());
            }
        }
        self.move_selection(-1);
    }

    async fn refresh(&mut self) {
        let (bookings, day_offs) = tokio::join!(
            self.session.refresh_bookings(),
            self.session.refresh_day_offs(),
        );
        self.status = bookings.err().or(day_offs.err()).map(|e| e.to_string());
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_header(frame, layout[0]);
        self.render_tab_bar(frame, layout[1]);
        match self.active_tab {
            Tab::Bookings => self.render_bookings(frame, layout[2]),
            Tab::Stats => self.render_stats(frame, layout[2]),
            Tab::Availability => self.render_availability(frame, layout[2]),
            Tab::DaysOff => self.render_day_offs(frame, layout[2]),
        }
        self.render_status_bar(frame, layout[3]);

        if self.confirm.is_some() {
            self.render_confirm(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" trimly dashboard ", theme::title()),
            Span::styled(
                format!("· {} ", self.selected_date),
                theme::hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let style = if *tab == self.active_tab {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", i + 1, tab.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::raw(" "))
            .select(Tab::ALL.iter().position(|t| *t == self.active_tab).unwrap_or(0));
        frame.render_widget(tabs, area);
    }

    fn render_bookings(&mut self, frame: &mut Frame, area: Rect) {
        let store = self.session.store();
        let bookings = self.bookings_for_date();

        let block = Block::default()
            .title(format!(" Bookings on {} ({}) ", self.selected_date, bookings.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        if bookings.is_empty() {
            frame.render_widget(
                Paragraph::new("No bookings for this date.")
                    .style(theme::hint())
                    .block(block),
                area,
            );
            return;
        }

        let rows: Vec<Row> = bookings
            .iter()
            .map(|b| {
                Row::new(vec![
                    b.time.clone(),
                    b.customer(),
                    Service::display_name(&b.service, self.locale),
                    euro(b.price),
                    store.barber_display_name(b.barber.as_deref(), self.locale),
                    b.phone.clone(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(16),
                Constraint::Min(14),
                Constraint::Length(8),
                Constraint::Min(10),
                Constraint::Min(12),
            ],
        )
        .header(
            Row::new(vec!["Time", "Customer", "Service", "Price", "Barber", "Phone"])
                .style(theme::table_header()),
        )
        .row_highlight_style(theme::selected_row())
        .block(block);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let bookings = self.bookings_rx.borrow().clone();
        let barbers = self.barbers_rx.borrow().clone();
        let today = Local::now().date_naive();

        // Pure recomputation over the current snapshot on every draw;
        // nothing incremental to drift.
        let totals = revenue_by_barber(&bookings, &barbers, today);

        let rows: Vec<Row> = barbers
            .iter()
            .map(|b| {
                let t = totals.get(&b.id).copied().unwrap_or_default();
                Row::new(vec![
                    b.name.clone(),
                    euro(t.daily),
                    euro(t.weekly),
                    euro(t.monthly),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["Barber", "Today", "Week", "Month"]).style(theme::table_header()),
        )
        .block(
            Block::default()
                .title(" Revenue ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(table, area);
    }

    fn render_availability(&self, frame: &mut Frame, area: Rect) {
        let barbers = self.barbers_rx.borrow().clone();
        let day_offs = self.day_offs_rx.borrow().clone();
        let bookings = self.bookings_rx.borrow().clone();

        let rows_data = daily_availability(&barbers, &day_offs, &bookings, self.selected_date);
        let rows: Vec<Row> = rows_data
            .iter()
            .map(|row| {
                if row.is_day_off {
                    Row::new(vec![
                        Span::raw(row.barber.name.clone()),
                        Span::styled("DAY OFF", theme::day_off_badge()),
                        Span::styled("not available on this date", theme::hint()),
                    ])
                } else if row.free_slots.is_empty() {
                    Row::new(vec![
                        Span::raw(row.barber.name.clone()),
                        Span::raw(""),
                        Span::styled("fully booked", theme::status_error()),
                    ])
                } else {
                    Row::new(vec![
                        Span::raw(row.barber.name.clone()),
                        Span::raw(format!("{} free", row.free_slots.len())),
                        Span::raw(row.free_slots.join(" ")),
                    ])
                }
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(9),
                Constraint::Min(30),
            ],
        )
        .header(Row::new(vec!["Barber", "Status", "Slots"]).style(theme::table_header()))
        .block(
            Block::default()
                .title(format!(" Availability on {} ", self.selected_date))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(table, area);
    }

    fn render_day_offs(&mut self, frame: &mut Frame, area: Rect) {
        let store = self.session.store();
        let day_offs = self.day_offs_rx.borrow().clone();

        let block = Block::default()
            .title(format!(" Days off ({}) ", day_offs.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        if day_offs.is_empty() {
            frame.render_widget(
                Paragraph::new("No blocked days planned.")
                    .style(theme::hint())
                    .block(block),
                area,
            );
            return;
        }

        let rows: Vec<Row> = day_offs
            .iter()
            .map(|d| {
                Row::new(vec![
                    d.id.to_string(),
                    store.barber_display_name(Some(&d.barber_id), self.locale),
                    d.date.to_string(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Min(16),
                Constraint::Min(12),
            ],
        )
        .header(Row::new(vec!["ID", "Barber", "Date"]).style(theme::table_header()))
        .row_highlight_style(theme::selected_row())
        .block(block);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(message) => Line::from(Span::styled(format!(" {message}"), theme::status_error())),
            None => Line::from(Span::styled(
                " 1-4 tabs  ←/→ date  j/k select  d delete  r refresh  q quit",
                theme::hint(),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect) {
        let text = match self.confirm {
            Some(PendingDelete::Booking(id)) => format!("Delete booking {id}?  [y/N]"),
            Some(PendingDelete::DayOff(id)) => {
                format!("Reactivate this barber (day-off {id})?  [y/N]")
            }
            None => return,
        };

        let width = (text.len() + 6).min(usize::from(area.width.saturating_sub(4)));
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width as u16)) / 2,
            area.y + area.height.saturating_sub(5) / 2,
            width as u16,
            3,
        );

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).centered().block(
                Block::default()
                    .title(" Confirm ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::day_off_badge()),
            ),
            popup,
        );
    }
}

fn euro(amount: f64) -> String {
    if (amount - amount.trunc()).abs() < f64::EPSILON {
        format!("€{amount:.0}")
    } else {
        format!("€{amount:.2}")
    }
}
