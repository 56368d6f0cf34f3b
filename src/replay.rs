//! Headless key scripts.
//!
//! A script is whitespace-separated key tokens (`a`, `Space`, `Enter`,
//! `Backspace`, ...). A token may carry an explicit timestamp as
//! `token@<ms>`; untimed tokens follow the previous one by `step_ms`.
//! A literal `@` key is written as a bare `@`.

use thiserror::Error;

use crate::session::input::{KeyEvent, ParseKeyError};
use crate::session::state::SessionState;

pub const DEFAULT_STEP_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptedKey {
    pub key: KeyEvent,
    pub at_ms: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("token {index}: {source}")]
    Key {
        index: usize,
        #[source]
        source: ParseKeyError,
    },
    #[error("token {index}: bad timestamp `{value}`")]
    Timestamp { index: usize, value: String },
}

pub fn parse_script(script: &str, step_ms: u64) -> Result<Vec<ScriptedKey>, ScriptError> {
    let mut keys = Vec::new();
    let mut last_ms: Option<u64> = None;

    for (index, token) in script.split_whitespace().enumerate() {
        let (key_part, time_part) = match token.rsplit_once('@') {
            Some((k, t)) if !k.is_empty() => (k, Some(t)),
            _ => (token, None),
        };

        let key = key_part
            .parse::<KeyEvent>()
            .map_err(|source| ScriptError::Key { index, source })?;

        let at_ms = match time_part {
            Some(t) => t.parse::<u64>().map_err(|_| ScriptError::Timestamp {
                index,
                value: t.to_string(),
            })?,
            None => last_ms.map_or(0, |ms| ms.saturating_add(step_ms)),
        };
        last_ms = Some(at_ms);
        keys.push(ScriptedKey { key, at_ms });
    }

    Ok(keys)
}

/// Feed every scripted key through a fresh session over `text`.
pub fn run_script(text: &str, keys: &[ScriptedKey]) -> SessionState {
    keys.iter().fold(SessionState::new(text), |state, k| {
        state.handle_key(k.key, k.at_ms)
    })
}

/// Keys that type `text` exactly, with a separator at every boundary.
pub fn keys_for_text(text: &str) -> Vec<KeyEvent> {
    let mut keys = Vec::new();
    for (i, line) in text.split('\n').filter(|l| !l.trim().is_empty()).enumerate() {
        if i > 0 {
            keys.push(KeyEvent::Enter);
        }
        for (j, word) in line.split_whitespace().enumerate() {
            if j > 0 {
                keys.push(KeyEvent::Space);
            }
            keys.extend(word.chars().map(KeyEvent::Char));
        }
    }
    keys
}
