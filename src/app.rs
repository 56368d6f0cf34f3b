use crossterm::event::{KeyCode, KeyEvent as TermKey, KeyModifiers};

use typesnip::config::Config;
use typesnip::session::{self, KeyEvent, Metrics, SessionState};
use typesnip::snippet::SNIPPET;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    Result,
}

pub struct App {
    pub screen: AppScreen,
    pub session: SessionState,
    pub config: Config,
    pub theme: Theme,
    pub should_quit: bool,
}

/// Wall-clock milliseconds handed to the session as `now_ms`.
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Map a terminal key to the tracker's vocabulary. `None` for app
/// commands and anything the tracker ignores.
pub fn map_key(key: &TermKey) -> Option<KeyEvent> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') => Some(KeyEvent::Space),
        KeyCode::Char(c) => Some(KeyEvent::Char(c)),
        KeyCode::Enter => Some(KeyEvent::Enter),
        KeyCode::Backspace => Some(KeyEvent::Backspace),
        _ => None,
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(
                theme = %config.theme,
                available = ?Theme::available_themes(),
                "unknown theme, using default"
            );
            Theme::default()
        });
        Self {
            screen: AppScreen::Typing,
            session: session::initialize(SNIPPET),
            config,
            theme,
            should_quit: false,
        }
    }

    pub fn restart(&mut self) {
        tracing::info!("session restarted");
        self.session = session::initialize(SNIPPET);
        self.screen = AppScreen::Typing;
    }

    pub fn metrics(&self) -> Metrics {
        session::snapshot_metrics(&self.session)
    }

    pub fn handle_key(&mut self, key: TermKey) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.restart(),
            _ => match self.screen {
                AppScreen::Typing => {
                    if let Some(ev) = map_key(&key) {
                        self.type_key(ev, now_ms());
                    }
                }
                AppScreen::Result => {}
            },
        }
    }

    pub fn type_key(&mut self, key: KeyEvent, now_ms: u64) {
        if self.session.is_complete() && self.config.stop_on_completion {
            return;
        }

        let was_complete = self.session.is_complete();
        self.session = self.session.handle_key(key, now_ms);

        if !was_complete && self.session.is_complete() {
            let m = self.metrics();
            tracing::info!(
                cpm = ?m.cpm,
                raw_cpm = ?m.raw_cpm,
                accuracy = m.accuracy,
                raw_accuracy = m.raw_accuracy,
                "snippet finished"
            );
            if self.config.stop_on_completion {
                self.screen = AppScreen::Result;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(stop_on_completion: bool) -> App {
        let config = Config {
            stop_on_completion,
            ..Config::default()
        };
        App::new(config)
    }

    fn type_all(app: &mut App) {
        for (i, key) in typesnip::replay::keys_for_text(SNIPPET).into_iter().enumerate() {
            app.type_key(key, i as u64 * 50);
        }
    }

    #[test]
    fn test_map_key() {
        let plain = |code| TermKey::new(code, KeyModifiers::NONE);
        assert_eq!(map_key(&plain(KeyCode::Char('x'))), Some(KeyEvent::Char('x')));
        assert_eq!(map_key(&plain(KeyCode::Char(' '))), Some(KeyEvent::Space));
        assert_eq!(map_key(&plain(KeyCode::Enter)), Some(KeyEvent::Enter));
        assert_eq!(map_key(&plain(KeyCode::Backspace)), Some(KeyEvent::Backspace));
        assert_eq!(map_key(&plain(KeyCode::Left)), None);
        assert_eq!(
            map_key(&TermKey::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            map_key(&TermKey::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(KeyEvent::Char('A'))
        );
    }

    #[test]
    fn test_completion_switches_to_result_screen() {
        let mut app = test_app(true);
        type_all(&mut app);
        assert!(app.session.is_complete());
        assert_eq!(app.screen, AppScreen::Result);
        assert_eq!(app.metrics().accuracy, 1.0);
    }

    #[test]
    fn test_input_ignored_after_completion() {
        let mut app = test_app(true);
        type_all(&mut app);
        let cursor = app.session.cursor;
        app.type_key(KeyEvent::Char('z'), 999_999);
        assert_eq!(app.session.cursor, cursor);
    }

    #[test]
    fn test_keep_going_accepts_input() {
        let mut app = test_app(false);
        type_all(&mut app);
        let end = app.session.timing.end_ms;
        app.type_key(KeyEvent::Char('z'), 999_999);
        assert_eq!(app.screen, AppScreen::Typing);
        assert_eq!(app.session.cursor.char, app.session.current_record().unwrap().typed.len());
        assert_eq!(app.session.timing.end_ms, end);
    }

    #[test]
    fn test_tab_restarts() {
        let mut app = test_app(true);
        app.type_key(KeyEvent::Char('d'), 0);
        app.handle_key(TermKey::new(KeyCode::Tab, KeyModifiers::NONE));
        assert!(!app.session.has_started());
        assert_eq!(app.screen, AppScreen::Typing);
    }

    #[test]
    fn test_esc_quits() {
        let mut app = test_app(true);
        app.handle_key(TermKey::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit);
    }
}
