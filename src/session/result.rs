use serde::{Deserialize, Serialize};

use crate::session::metrics;
use crate::session::state::SessionState;

/// Read-only summary of a session. Rates stay `None` until the session
/// has both started and finished.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub raw_accuracy: f64,
    pub correct_count: usize,
    pub total_count: usize,
    pub correct_words: usize,
    pub separator_count: usize,
    pub cpm: Option<f64>,
    pub raw_cpm: Option<f64>,
    pub elapsed_ms: Option<u64>,
}

impl Metrics {
    pub fn from_session(state: &SessionState) -> Self {
        let records = state.records.as_slice();
        let timing = state.timing;
        let span = timing.start_ms.zip(timing.end_ms);

        Self {
            accuracy: metrics::accuracy(records),
            raw_accuracy: metrics::raw_accuracy(records),
            correct_count: metrics::correct_char_count(records, false),
            total_count: metrics::total_char_count(records),
            correct_words: metrics::correct_word_count(records),
            separator_count: timing.separator_count,
            cpm: span.map(|(start, end)| {
                metrics::chars_per_minute(records, start, end, timing.separator_count)
            }),
            raw_cpm: span.map(|(start, end)| {
                metrics::raw_chars_per_minute(records, start, end, timing.separator_count)
            }),
            elapsed_ms: span.map(|(start, end)| metrics::elapsed_ms(start, end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input::KeyEvent;

    #[test]
    fn test_fresh_session_metrics() {
        let state = SessionState::new("ab cd");
        let m = Metrics::from_session(&state);
        assert_eq!(m.accuracy, 0.0);
        assert_eq!(m.raw_accuracy, 0.0);
        assert_eq!(m.correct_count, 0);
        assert_eq!(m.total_count, 4);
        assert_eq!(m.cpm, None);
        assert_eq!(m.raw_cpm, None);
        assert_eq!(m.elapsed_ms, None);
    }

    #[test]
    fn test_rates_present_after_completion() {
        let keys = [
            (KeyEvent::Char('a'), 0),
            (KeyEvent::Char('b'), 10_000),
            (KeyEvent::Space, 20_000),
            (KeyEvent::Char('c'), 30_000),
            (KeyEvent::Char('d'), 60_000),
        ];
        let state = keys
            .iter()
            .fold(SessionState::new("ab cd"), |st, &(k, t)| st.handle_key(k, t));
        let m = Metrics::from_session(&state);
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.raw_accuracy, 1.0);
        assert_eq!(m.correct_words, 2);
        assert_eq!(m.separator_count, 1);
        assert_eq!(m.elapsed_ms, Some(60_000));
        assert_eq!(m.cpm, Some(5.0));
        assert_eq!(m.raw_cpm, Some(5.0));
    }

    #[test]
    fn test_metrics_serialize_to_json() {
        let state = SessionState::new("ab");
        let json = serde_json::to_string(&Metrics::from_session(&state)).unwrap();
        assert!(json.contains("\"total_count\":2"));
        assert!(json.contains("\"cpm\":null"));
    }
}
