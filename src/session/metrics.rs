//! Accuracy and speed formulas over word records. Nothing here mutates state.

use crate::session::state::WordRecord;

const MS_PER_MINUTE: f64 = 60_000.0;

/// A word matches when it was typed exactly, with no extra characters.
pub fn is_matching(record: &WordRecord) -> bool {
    record.typed == record.actual
}

pub fn correct_word_count<'a>(records: impl IntoIterator<Item = &'a WordRecord>) -> usize {
    records.into_iter().filter(|r| is_matching(r)).count()
}

/// Positions where the typed char equals the target char. Without
/// `include_incomplete`, only fully matching words count.
pub fn correct_char_count<'a>(
    records: impl IntoIterator<Item = &'a WordRecord>,
    include_incomplete: bool,
) -> usize {
    records
        .into_iter()
        .filter(|r| include_incomplete || is_matching(r))
        .map(|r| {
            r.typed
                .iter()
                .zip(&r.actual)
                .filter(|(typed, actual)| typed == actual)
                .count()
        })
        .sum()
}

/// Characters typed past each word's end, capped at the word's own length.
pub fn extra_char_count<'a>(records: impl IntoIterator<Item = &'a WordRecord>) -> usize {
    records
        .into_iter()
        .map(|r| r.typed.len().saturating_sub(r.actual.len()).min(r.actual.len()))
        .sum()
}

pub fn total_char_count<'a>(records: impl IntoIterator<Item = &'a WordRecord>) -> usize {
    records.into_iter().map(|r| r.actual.len()).sum()
}

/// Correct characters in completed words over the total target length.
pub fn accuracy(records: &[WordRecord]) -> f64 {
    let total = total_char_count(records);
    if total == 0 {
        return 0.0;
    }
    correct_char_count(records, false) as f64 / total as f64
}

/// Like [`accuracy`] but counts partial words and subtracts overflow.
pub fn raw_accuracy(records: &[WordRecord]) -> f64 {
    let total = total_char_count(records);
    if total == 0 {
        return 0.0;
    }
    let correct = correct_char_count(records, true) as f64;
    let extra = extra_char_count(records) as f64;
    (correct - extra) / total as f64
}

pub fn elapsed_ms(start_ms: u64, end_ms: u64) -> u64 {
    end_ms.saturating_sub(start_ms)
}

fn per_minute(count: usize, start_ms: u64, end_ms: u64) -> f64 {
    let elapsed = elapsed_ms(start_ms, end_ms);
    if elapsed == 0 {
        return 0.0;
    }
    count as f64 / (elapsed as f64 / MS_PER_MINUTE)
}

/// (Correct characters in completed words + separators) per minute.
pub fn chars_per_minute(
    records: &[WordRecord],
    start_ms: u64,
    end_ms: u64,
    separator_count: usize,
) -> f64 {
    per_minute(
        correct_char_count(records, false) + separator_count,
        start_ms,
        end_ms,
    )
}

/// [`chars_per_minute`] counting correct characters of partial words too.
pub fn raw_chars_per_minute(
    records: &[WordRecord],
    start_ms: u64,
    end_ms: u64,
    separator_count: usize,
) -> f64 {
    per_minute(
        correct_char_count(records, true) + separator_count,
        start_ms,
        end_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(actual: &str, typed: &str) -> WordRecord {
        let mut r = WordRecord::new(0, 0, actual.chars().collect());
        r.typed = typed.chars().collect();
        r
    }

    #[test]
    fn test_matching_requires_same_length() {
        assert!(is_matching(&record("ab", "ab")));
        assert!(!is_matching(&record("ab", "a")));
        assert!(!is_matching(&record("ab", "abc")));
        assert!(!is_matching(&record("ab", "ax")));
    }

    #[test]
    fn test_correct_count_with_and_without_incomplete() {
        let records = vec![record("ab", "ab"), record("cd", "xd")];
        assert_eq!(correct_char_count(&records, false), 2);
        assert_eq!(correct_char_count(&records, true), 3);
        assert_eq!(correct_word_count(&records), 1);
    }

    #[test]
    fn test_accuracy_example() {
        let records = vec![record("ab", "ab"), record("cd", "xd")];
        assert_eq!(total_char_count(&records), 4);
        assert!((accuracy(&records) - 0.5).abs() < 1e-9);
        assert!((raw_accuracy(&records) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_extra_chars_capped_at_word_length() {
        let records = vec![record("abc", "abcdefghijklm")];
        assert_eq!(extra_char_count(&records), 3);
        let records = vec![record("abc", "abcd"), record("x", "")];
        assert_eq!(extra_char_count(&records), 1);
    }

    #[test]
    fn test_overflow_lowers_raw_accuracy() {
        let records = vec![record("ab", "abzz"), record("cd", "")];
        assert_eq!(correct_char_count(&records, true), 2);
        assert!((raw_accuracy(&records) - 0.0).abs() < 1e-9);
        assert_eq!(accuracy(&records), 0.0);
    }

    #[test]
    fn test_empty_records_yield_zero() {
        let records: Vec<WordRecord> = Vec::new();
        assert_eq!(accuracy(&records), 0.0);
        assert_eq!(raw_accuracy(&records), 0.0);
        assert_eq!(chars_per_minute(&records, 0, 60_000, 0), 0.0);
        assert_eq!(raw_chars_per_minute(&records, 0, 60_000, 0), 0.0);
    }

    #[test]
    fn test_cpm_one_minute() {
        // 50 correct chars spread over completed words, plus 10 separators.
        let records: Vec<WordRecord> = (0..10).map(|_| record("abcde", "abcde")).collect();
        assert_eq!(correct_char_count(&records, false), 50);
        assert!((chars_per_minute(&records, 0, 60_000, 10) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_raw_cpm_counts_partial_words() {
        let records = vec![record("abcd", "abxd"), record("ef", "ef")];
        // Completed: 2, raw: 3 + 2 = 5, over 30 seconds.
        assert!((chars_per_minute(&records, 0, 30_000, 1) - 6.0).abs() < 1e-9);
        assert!((raw_chars_per_minute(&records, 0, 30_000, 1) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_is_not_infinite() {
        let records = vec![record("a", "a")];
        assert_eq!(chars_per_minute(&records, 500, 500, 0), 0.0);
        assert_eq!(raw_chars_per_minute(&records, 900, 500, 0), 0.0);
    }

    #[test]
    fn test_order_independent() {
        let mut records = vec![record("ab", "ab"), record("cde", "cdx"), record("f", "fg")];
        let forward = (accuracy(&records), raw_accuracy(&records));
        records.reverse();
        assert_eq!(forward, (accuracy(&records), raw_accuracy(&records)));
    }
}
