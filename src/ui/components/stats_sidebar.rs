use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::ThemeColors;
use typesnip::session::{Cursor, Metrics};

pub struct StatsSidebar<'a> {
    metrics: &'a Metrics,
    /// Live elapsed time, shown while the session is still running.
    elapsed_ms: u64,
    cursor: Option<Cursor>,
    colors: &'a ThemeColors,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        metrics: &'a Metrics,
        elapsed_ms: u64,
        cursor: Option<Cursor>,
        colors: &'a ThemeColors,
    ) -> Self {
        Self {
            metrics,
            elapsed_ms,
            cursor,
            colors,
        }
    }

    fn row(&self, label: &'static str, value: String, value_style: Style) -> Line<'static> {
        Line::from(vec![
            Span::styled(label, Style::default().fg(self.colors.fg())),
            Span::styled(value, value_style),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let colors = self.colors;
        let m = self.metrics;
        let pending = || Style::default().fg(colors.text_pending());
        let rate = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{v:.0}"));

        let accuracy = m.accuracy * 100.0;
        let acc_style = Style::default().fg(if accuracy >= 95.0 {
            colors.success()
        } else {
            colors.error()
        });

        let mut lines = vec![
            self.row("Accuracy:     ", format!("{accuracy:.0}%"), acc_style),
            self.row(
                "Raw accuracy: ",
                format!("{:.0}%", m.raw_accuracy * 100.0),
                Style::default().fg(colors.accent()),
            ),
            Line::from(""),
            self.row(
                "Correct words: ",
                m.correct_words.to_string(),
                Style::default().fg(colors.success()),
            ),
            self.row(
                "Correct chars: ",
                format!("{}/{}", m.correct_count, m.total_count),
                Style::default().fg(colors.success()),
            ),
            self.row("Space/Enter:   ", m.separator_count.to_string(), pending()),
            Line::from(""),
            self.row("CPM:     ", rate(m.cpm), Style::default().fg(colors.accent())),
            self.row("Raw CPM: ", rate(m.raw_cpm), Style::default().fg(colors.accent())),
            self.row(
                "Time:    ",
                format!("{:.2}s", m.elapsed_ms.unwrap_or(self.elapsed_ms) as f64 / 1000.0),
                Style::default().fg(colors.fg()),
            ),
        ];

        if let Some(c) = self.cursor {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Line: {} Word: {} Char: {}", c.line, c.word, c.char),
                pending(),
            )));
        }

        lines
    }
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Stats ")
            .border_style(Style::default().fg(self.colors.border()))
            .style(Style::default().bg(self.colors.bg()));

        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}
