/// A single token of a line, as produced by splitting on whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub chars: Vec<char>,
}

impl Word {
    /// Blank tokens (empty, or whitespace only) are never typed.
    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|c| c.is_whitespace())
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub words: Vec<Word>,
}

impl Line {
    fn parse(raw: &str) -> Self {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        Self {
            words: raw
                .split(char::is_whitespace)
                .map(|token| Word {
                    chars: token.chars().collect(),
                })
                .collect(),
        }
    }

    pub fn first_word(&self) -> Option<usize> {
        self.words.iter().position(|w| !w.is_blank())
    }

    pub fn last_word(&self) -> Option<usize> {
        self.words.iter().rposition(|w| !w.is_blank())
    }

    pub fn next_word(&self, word: usize) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .skip(word + 1)
            .find(|(_, w)| !w.is_blank())
            .map(|(i, _)| i)
    }

    pub fn prev_word(&self, word: usize) -> Option<usize> {
        let end = word.min(self.words.len());
        self.words[..end].iter().rposition(|w| !w.is_blank())
    }

    pub fn is_blank(&self) -> bool {
        self.first_word().is_none()
    }
}

/// Precomputed line/word/char structure of the practice text.
///
/// Word indices are token indices of `line.split(char::is_whitespace)`, so
/// leading indentation occupies indices that the cursor never lands on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetText {
    pub lines: Vec<Line>,
}

impl SnippetText {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(Line::parse).collect(),
        }
    }

    pub fn line(&self, line: usize) -> Option<&Line> {
        self.lines.get(line)
    }

    /// First line at or after `from` that contains a typeable word.
    pub fn next_line_from(&self, from: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, l)| !l.is_blank())
            .map(|(i, _)| i)
    }

    /// `(line, word)` of the first typeable word in the document.
    pub fn first_position(&self) -> Option<(usize, usize)> {
        let line = self.next_line_from(0)?;
        let word = self.lines[line].first_word()?;
        Some((line, word))
    }

    /// `(line, word)` of the last typeable word in the document.
    pub fn last_position(&self) -> Option<(usize, usize)> {
        self.lines
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, l)| l.last_word().map(|w| (i, w)))
    }

    /// All typeable words in document order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize, &Word)> {
        self.lines.iter().enumerate().flat_map(|(li, line)| {
            line.words
                .iter()
                .enumerate()
                .filter(|(_, w)| !w.is_blank())
                .map(move |(wi, w)| (li, wi, w))
        })
    }
}
