use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this width the stats move into a one-line header.
const SIDEBAR_MIN_WIDTH: u16 = 90;

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        if area.width >= SIDEBAR_MIN_WIDTH {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(50), Constraint::Length(32)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                sidebar: Some(horizontal[1]),
                footer: vertical[2],
            }
        } else {
            Self {
                header: vertical[0],
                main: vertical[1],
                sidebar: None,
                footer: vertical[2],
            }
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if current.is_empty() {
            format!(" {hint}")
        } else {
            format!("{current}{separator}{hint}")
        };
        if candidate.chars().count() <= width || current.is_empty() {
            current = candidate;
        } else {
            out.push(std::mem::take(&mut current));
            current = format!(" {hint}");
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let left = area.x.saturating_add(area.width.saturating_sub(w) / 2);
    let top = area.y.saturating_add(area.height.saturating_sub(h) / 2);
    Rect::new(left, top, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_only_when_wide() {
        let wide = AppLayout::new(Rect::new(0, 0, 120, 30));
        assert!(wide.sidebar.is_some());
        let narrow = AppLayout::new(Rect::new(0, 0, 60, 30));
        assert!(narrow.sidebar.is_none());
        assert_eq!(narrow.main.width, 60);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[Esc] Quit", "[Tab] Restart"], 40);
        assert_eq!(lines, vec![" [Esc] Quit  [Tab] Restart".to_string()]);
        let lines = pack_hint_lines(&["[Esc] Quit", "[Tab] Restart"], 14);
        assert_eq!(lines.len(), 2);
        assert!(pack_hint_lines(&[], 40).is_empty());
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 6, area), Rect::new(10, 2, 20, 6));
        assert_eq!(centered_rect(80, 20, area), area);
    }
}
