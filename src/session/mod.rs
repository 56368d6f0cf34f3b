pub mod input;
pub mod metrics;
pub mod result;
pub mod state;
pub mod text;

pub use input::{KeyEvent, ParseKeyError};
pub use result::Metrics;
pub use state::{Cursor, SessionState, SessionTiming, WordRecord, WordRecords};

pub fn initialize(text: &str) -> SessionState {
    SessionState::new(text)
}

pub fn handle_key(state: &SessionState, key: KeyEvent, now_ms: u64) -> SessionState {
    state.handle_key(key, now_ms)
}

pub fn snapshot_metrics(state: &SessionState) -> Metrics {
    Metrics::from_session(state)
}
