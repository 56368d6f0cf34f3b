use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::ThemeColors;
use typesnip::session::{Cursor, SessionState, WordRecord};

pub struct TypingArea<'a> {
    session: &'a SessionState,
    colors: &'a ThemeColors,
    show_cursor: bool,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a SessionState, colors: &'a ThemeColors, show_cursor: bool) -> Self {
        Self {
            session,
            colors,
            show_cursor,
        }
    }

    fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.colors.text_cursor_fg())
            .bg(self.colors.text_cursor_bg())
    }

    fn char_style(&self, typed: Option<char>, target: char) -> Style {
        match typed {
            Some(t) if t == target => Style::default().fg(self.colors.text_correct()),
            Some(_) => Style::default().fg(self.colors.text_incorrect()),
            None => Style::default().fg(self.colors.text_pending()),
        }
    }

    /// One styled line per snippet line; blank tokens keep their spacing.
    fn build_lines(&self) -> Vec<Line<'static>> {
        let cursor = self.show_cursor.then_some(self.session.cursor);
        let mut out = Vec::with_capacity(self.session.text.lines.len());

        for (li, line) in self.session.text.lines.iter().enumerate() {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let last_token = line.words.len().saturating_sub(1);

            for (wi, word) in line.words.iter().enumerate() {
                let record = self.session.records.get(li, wi);
                let here = cursor.filter(|c| c.line == li && c.word == wi);
                let passed = is_passed(self.session.cursor, li, wi);
                let flag = record.is_some_and(|r| passed && r.typed != r.actual);

                for (ci, &target) in word.chars.iter().enumerate() {
                    let typed = record.and_then(|r| r.typed.get(ci).copied());
                    let mut style = if here.is_some_and(|c| c.char == ci) {
                        self.cursor_style()
                    } else {
                        self.char_style(typed, target)
                    };
                    if flag {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    spans.push(Span::styled(target.to_string(), style));
                }

                if let Some(record) = record {
                    spans.extend(self.overflow_spans(record, flag));
                }

                let cursor_after = here.is_some_and(|c| c.char >= word.len());
                if wi < last_token {
                    let style = if cursor_after {
                        self.cursor_style()
                    } else {
                        Style::default()
                    };
                    spans.push(Span::styled(" ", style));
                } else if cursor_after {
                    spans.push(Span::styled(" ", self.cursor_style()));
                }
            }

            out.push(Line::from(spans));
        }

        out
    }

    fn overflow_spans(&self, record: &WordRecord, flag: bool) -> Vec<Span<'static>> {
        let mut style = Style::default().fg(self.colors.text_extra());
        if flag {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        record
            .overflow()
            .iter()
            .map(|c| Span::styled(c.to_string(), style))
            .collect()
    }
}

fn is_passed(cursor: Cursor, line: usize, word: usize) -> bool {
    cursor.line > line || (cursor.line == line && cursor.word > word)
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.build_lines();

        let block = Block::bordered()
            .border_style(Style::default().fg(self.colors.border()))
            .style(Style::default().bg(self.colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
