use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::theme::ThemeColors;
use typesnip::session::Metrics;

/// Summary shown once the snippet is finished.
pub struct ResultPanel<'a> {
    metrics: &'a Metrics,
    colors: &'a ThemeColors,
}

impl<'a> ResultPanel<'a> {
    pub fn new(metrics: &'a Metrics, colors: &'a ThemeColors) -> Self {
        Self { metrics, colors }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        let m = self.metrics;
        let value = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let label = Style::default().fg(colors.fg());

        let cpm = m.cpm.map_or("-".to_string(), |v| format!("{v:.0}"));
        let raw_cpm = m.raw_cpm.map_or("-".to_string(), |v| format!("{v:.0}"));
        let secs = m.elapsed_ms.unwrap_or(0) as f64 / 1000.0;

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("CPM ", label),
                Span::styled(cpm, value),
                Span::styled("   raw ", label),
                Span::styled(raw_cpm, value),
            ]),
            Line::from(vec![
                Span::styled("Accuracy ", label),
                Span::styled(format!("{:.0}%", m.accuracy * 100.0), value),
                Span::styled("   raw ", label),
                Span::styled(format!("{:.0}%", m.raw_accuracy * 100.0), value),
            ]),
            Line::from(vec![
                Span::styled("Time ", label),
                Span::styled(format!("{secs:.2}s"), value),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "[Tab] Again  [Esc] Quit",
                Style::default().fg(colors.text_pending()),
            )),
        ];

        let block = Block::bordered()
            .title(" Done ")
            .border_style(Style::default().fg(colors.success()))
            .style(Style::default().bg(colors.bg()));

        Clear.render(area, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
