//! Tab bar widget for pattern method selection

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Pattern input methods, one per tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Daily,
    Random,
    PatternFile,
    Image,
    Text,
    Manual,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Random => "Random",
            Self::PatternFile => "Text File Pattern",
            Self::Image => "Image",
            Self::Text => "Text",
            Self::Manual => "Manual",
        }
    }

    /// One-line description shown under the tab bar
    pub fn description(self) -> &'static str {
        match self {
            Self::Daily => "Same number of commits every day",
            Self::Random => "Random number of commits every day",
            Self::PatternFile => "Digits 0-4 in a text file, one line per weekday",
            Self::Image => "Darker pixels get more commits",
            Self::Text => "Write text across the graph",
            Self::Manual => "Click cells to cycle commit levels",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Daily,
            Tab::Random,
            Tab::PatternFile,
            Tab::Image,
            Tab::Text,
            Tab::Manual,
        ]
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Daily => Self::Random,
            Self::Random => Self::PatternFile,
            Self::PatternFile => Self::Image,
            Self::Image => Self::Text,
            Self::Text => Self::Manual,
            Self::Manual => Self::Daily,
        }
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Daily => Self::Manual,
            Self::Random => Self::Daily,
            Self::PatternFile => Self::Random,
            Self::Image => Self::PatternFile,
            Self::Text => Self::Image,
            Self::Manual => Self::Text,
        }
    }

    /// Get tab from number key (1-6)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=6 => Self::all().get(n as usize - 1).copied(),
            _ => None,
        }
    }
}

/// Tab bar widget showing available methods
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Total width of all tabs for centering
        let total_width: u16 = Tab::all()
            .iter()
            .map(|tab| {
                let label = tab.label();
                let display_len = if *tab == self.selected {
                    label.len() + 2 // "[label]"
                } else {
                    label.len()
                };
                display_len as u16 + 2 // + spacing
            })
            .sum::<u16>()
            .saturating_sub(2); // Remove trailing spacing

        let start_x = area.x + (area.width.saturating_sub(total_width)) / 2;
        let mut x = start_x;

        for tab in Tab::all() {
            let is_selected = *tab == self.selected;
            let label = tab.label();

            let display = if is_selected {
                format!("[{}]", label)
            } else {
                label.to_string()
            };

            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if is_selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2;
        }

        if area.height > 1 {
            let desc = self.selected.description();
            let desc_x = area.x + (area.width.saturating_sub(desc.len() as u16)) / 2;
            buf.set_stringn(
                desc_x,
                area.y + 1,
                desc,
                area.width as usize,
                Style::default().fg(self.theme.muted()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_labels() {
        assert_eq!(Tab::Daily.label(), "Daily");
        assert_eq!(Tab::PatternFile.label(), "Text File Pattern");
        assert_eq!(Tab::Manual.label(), "Manual");
    }

    #[test]
    fn test_tab_all() {
        let all = Tab::all();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], Tab::Daily);
        assert_eq!(all[2], Tab::PatternFile);
        assert_eq!(all[5], Tab::Manual);
    }

    #[test]
    fn test_tab_next_prev_cycle() {
        let mut tab = Tab::Daily;
        for _ in 0..Tab::all().len() {
            assert_eq!(tab.next().prev(), tab);
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Daily);
        assert_eq!(Tab::Manual.next(), Tab::Daily);
        assert_eq!(Tab::Daily.prev(), Tab::Manual);
    }

    #[test]
    fn test_tab_default() {
        assert_eq!(Tab::default(), Tab::Daily);
    }

    #[test]
    fn test_tab_from_number() {
        assert_eq!(Tab::from_number(1), Some(Tab::Daily));
        assert_eq!(Tab::from_number(4), Some(Tab::Image));
        assert_eq!(Tab::from_number(6), Some(Tab::Manual));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(7), None);
    }

    #[test]
    fn test_tab_bar_renders_selected_in_brackets() {
        let area = Rect::new(0, 0, 100, 2);
        let mut buf = Buffer::empty(area);
        TabBar::new(Tab::Image, Theme::Dark).render(area, &mut buf);

        let line: String = (0..100)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(line.contains("[Image]"));
        assert!(line.contains("Daily"));
        let desc: String = (0..100)
            .map(|x| buf.cell((x, 1)).unwrap().symbol().to_string())
            .collect();
        assert!(desc.contains("Darker pixels"));
    }
}
