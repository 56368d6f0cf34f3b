use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    /// No input within the tick window; redraw the live timer.
    Tick,
    Resize,
}

/// Forwards terminal events from a reader thread. The main loop is the
/// only consumer, so keys reach the session strictly one at a time.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let next = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        // Release/Repeat would double-count keystrokes.
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(AppEvent::Key(key))
                        }
                        Ok(Event::Resize(_, _)) => Some(AppEvent::Resize),
                        Ok(_) => None,
                        Err(err) => {
                            tracing::warn!(%err, "terminal read failed");
                            None
                        }
                    },
                    Ok(false) => Some(AppEvent::Tick),
                    Err(err) => {
                        tracing::error!(%err, "terminal poll failed");
                        return;
                    }
                };

                if let Some(ev) = next {
                    if tx.send(ev).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
