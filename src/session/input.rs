use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::session::state::SessionState;

/// Keys the tracker understands. Anything else maps to `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Char(char),
    Space,
    Enter,
    Backspace,
    Other,
}

impl KeyEvent {
    /// Fold whitespace and control characters into their dedicated variants.
    pub fn classify(self) -> Self {
        match self {
            KeyEvent::Char(' ') => KeyEvent::Space,
            KeyEvent::Char('\n') | KeyEvent::Char('\r') => KeyEvent::Enter,
            KeyEvent::Char(c) if c.is_control() => KeyEvent::Other,
            other => other,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Char(c) => write!(f, "{c}"),
            KeyEvent::Space => f.write_str("Space"),
            KeyEvent::Enter => f.write_str("Enter"),
            KeyEvent::Backspace => f.write_str("Backspace"),
            KeyEvent::Other => f.write_str("Other"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("empty key token")]
    Empty,
    #[error("unknown key `{0}`")]
    Unknown(String),
}

impl FromStr for KeyEvent {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Err(ParseKeyError::Empty),
            (Some(c), None) => return Ok(KeyEvent::Char(c).classify()),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "space" => Ok(KeyEvent::Space),
            "enter" | "return" => Ok(KeyEvent::Enter),
            "backspace" | "bs" => Ok(KeyEvent::Backspace),
            "tab" | "esc" | "escape" => Ok(KeyEvent::Other),
            _ => Err(ParseKeyError::Unknown(s.to_string())),
        }
    }
}

/// Apply one key to `state` in place. Keys with no effect at the current
/// cursor leave the state untouched.
pub(crate) fn apply(state: &mut SessionState, key: KeyEvent, now_ms: u64) {
    if state.current_record().is_none() {
        return;
    }

    match key.classify() {
        KeyEvent::Char(ch) => process_char(state, ch, now_ms),
        KeyEvent::Space => process_space(state),
        KeyEvent::Enter => process_enter(state),
        KeyEvent::Backspace => process_backspace(state, now_ms),
        KeyEvent::Other => {}
    }

    tracing::trace!(%key, cursor = ?state.cursor, "key handled");
}

fn process_char(state: &mut SessionState, ch: char, now_ms: u64) {
    let cursor = state.cursor;
    let Some(record) = state.records.get_mut(cursor.line, cursor.word) else {
        return;
    };
    record.typed.push(ch);
    state.cursor.char += 1;

    if state.timing.start_ms.is_none() {
        state.timing.start_ms = Some(now_ms);
        tracing::debug!(now_ms, "session started");
    }

    check_completion(state, now_ms);
}

fn process_space(state: &mut SessionState) {
    let cursor = state.cursor;
    if cursor.char == 0 {
        return;
    }
    let Some(next) = state
        .text
        .line(cursor.line)
        .and_then(|l| l.next_word(cursor.word))
    else {
        return;
    };

    state.cursor.word = next;
    state.cursor.char = 0;
    state.timing.separator_count += 1;
}

fn process_enter(state: &mut SessionState) {
    let cursor = state.cursor;
    if cursor.char == 0 {
        return;
    }
    let on_last_word = state
        .text
        .line(cursor.line)
        .and_then(|l| l.last_word())
        .is_some_and(|last| last == cursor.word);
    if !on_last_word {
        return;
    }

    let Some(next_line) = state.text.next_line_from(cursor.line + 1) else {
        return;
    };
    let Some(first_word) = state.text.line(next_line).and_then(|l| l.first_word()) else {
        return;
    };

    state.cursor.line = next_line;
    state.cursor.word = first_word;
    state.cursor.char = 0;
    state.timing.separator_count += 1;
}

fn process_backspace(state: &mut SessionState, now_ms: u64) {
    let cursor = state.cursor;
    let prev = state
        .text
        .line(cursor.line)
        .and_then(|l| l.prev_word(cursor.word));

    match prev {
        Some(prev) if cursor.char == 0 => {
            state.cursor.word = prev;
            state.timing.separator_count = state.timing.separator_count.saturating_sub(1);
            if let Some(record) = state.records.get_mut(cursor.line, prev) {
                record.typed.pop();
                // Taken after the pop so the cursor stays at typed.len().
                state.cursor.char = record.typed.len();
            }
        }
        _ => {
            state.cursor.char = cursor.char.saturating_sub(1);
            if let Some(record) = state.records.get_mut(cursor.line, cursor.word) {
                record.typed.pop();
            }
        }
    }

    check_completion(state, now_ms);
}

/// Mark the session finished the first time the final word matches after
/// an edit on it. `end_ms` is never cleared.
fn check_completion(state: &mut SessionState, now_ms: u64) {
    if state.timing.end_ms.is_some() || state.timing.start_ms.is_none() {
        return;
    }
    let cursor = state.cursor;
    let Some(last) = state.records.last() else {
        return;
    };
    if (last.line, last.word) != (cursor.line, cursor.word) {
        return;
    }
    if last.typed == last.actual {
        state.timing.end_ms = Some(now_ms);
        tracing::debug!(now_ms, "session complete");
    }
}
