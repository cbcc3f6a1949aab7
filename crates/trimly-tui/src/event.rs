//! Terminal event source: crossterm input merged with a fixed tick.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;

/// Events the app loop reacts to.
pub enum Event {
    Key(KeyEvent),
    Resize,
    /// Fixed-cadence redraw trigger; also drains store updates pushed by
    /// the polling task between keypresses.
    Tick,
}

pub struct EventReader {
    events: EventStream,
    tick: tokio::time::Interval,
}

impl EventReader {
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = tokio::time::interval(tick_rate);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        Self {
            events: EventStream::new(),
            tick,
        }
    }

    /// Next event, or `None` when the input stream closed.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Some(Event::Tick),
                maybe = self.events.next() => match maybe {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Some(Event::Key(key));
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => return Some(Event::Resize),
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => return None,
                },
            }
        }
    }
}
