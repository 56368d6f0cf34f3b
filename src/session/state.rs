use std::collections::HashMap;
use std::sync::Arc;

use crate::session::input::{self, KeyEvent};
use crate::session::text::SnippetText;

/// What the user has typed for one word of the snippet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordRecord {
    pub line: usize,
    pub word: usize,
    pub actual: Vec<char>,
    pub typed: Vec<char>,
}

impl WordRecord {
    pub fn new(line: usize, word: usize, actual: Vec<char>) -> Self {
        Self {
            line,
            word,
            actual,
            typed: Vec::new(),
        }
    }

    /// Typed past the end of the target word.
    pub fn overflow(&self) -> &[char] {
        self.typed.get(self.actual.len()..).unwrap_or(&[])
    }
}

/// Records in document order, plus a `(line, word)` index into them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordRecords {
    records: Vec<WordRecord>,
    index: HashMap<(usize, usize), usize>,
}

impl WordRecords {
    fn from_text(text: &SnippetText) -> Self {
        let records: Vec<WordRecord> = text
            .positions()
            .map(|(line, word, w)| WordRecord::new(line, word, w.chars.clone()))
            .collect();
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| ((r.line, r.word), i))
            .collect();
        Self { records, index }
    }

    pub fn get(&self, line: usize, word: usize) -> Option<&WordRecord> {
        self.index.get(&(line, word)).map(|&i| &self.records[i])
    }

    pub(crate) fn get_mut(&mut self, line: usize, word: usize) -> Option<&mut WordRecord> {
        let i = *self.index.get(&(line, word))?;
        self.records.get_mut(i)
    }

    pub fn as_slice(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&WordRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a WordRecords {
    type Item = &'a WordRecord;
    type IntoIter = std::slice::Iter<'a, WordRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Position of the next character to type. `char` may run past the
/// end of the target word while extra characters are typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub line: usize,
    pub word: usize,
    pub char: usize,
}

impl Cursor {
    pub fn new(line: usize, word: usize, char: usize) -> Self {
        Self { line, word, char }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionTiming {
    pub start_ms: Option<u64>,
    pub end_ms: Option<u64>,
    /// Accepted space/enter presses that crossed a word or line boundary.
    pub separator_count: usize,
}

/// One practice run over a fixed text. Transitions return a new value.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub text: Arc<SnippetText>,
    pub records: WordRecords,
    pub cursor: Cursor,
    pub timing: SessionTiming,
}

impl SessionState {
    pub fn new(text: &str) -> Self {
        let text = SnippetText::new(text);
        let records = WordRecords::from_text(&text);
        let cursor = text
            .first_position()
            .map(|(line, word)| Cursor::new(line, word, 0))
            .unwrap_or_default();
        tracing::debug!(
            lines = text.lines.len(),
            words = records.len(),
            "session initialized"
        );
        Self {
            text: Arc::new(text),
            records,
            cursor,
            timing: SessionTiming::default(),
        }
    }

    pub fn handle_key(&self, key: KeyEvent, now_ms: u64) -> Self {
        let mut next = self.clone();
        input::apply(&mut next, key, now_ms);
        next
    }

    pub fn current_record(&self) -> Option<&WordRecord> {
        self.records.get(self.cursor.line, self.cursor.word)
    }

    pub fn has_started(&self) -> bool {
        self.timing.start_ms.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.timing.end_ms.is_some()
    }

    /// Milliseconds since start, measured to `end_ms` once complete.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match (self.timing.start_ms, self.timing.end_ms) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            (Some(start), None) => now_ms.saturating_sub(start),
            _ => 0,
        }
    }

    /// Share of typeable words the cursor has moved past, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        if self.is_complete() {
            return 1.0;
        }
        let done = self
            .records
            .iter()
            .take_while(|r| (r.line, r.word) != (self.cursor.line, self.cursor.word))
            .count();
        done as f64 / self.records.len() as f64
    }
}
