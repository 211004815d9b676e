//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 24;

/// Editing keys
const FORM_KEYS: [(&str, &str); 5] = [
    ("Tab / Shift+Tab", "Switch method"),
    ("1-6", "Jump to method"),
    ("Up / Down", "Move between fields"),
    ("Left / Right", "Change selection"),
    ("Enter", "Focus preview"),
];

/// Preview keys
const PREVIEW_KEYS: [(&str, &str); 3] = [
    ("Arrows / hjkl", "Move cursor"),
    ("Space / Enter", "Cycle commit level"),
    ("Esc", "Back to form"),
];

/// General keys
const GENERAL_KEYS: [(&str, &str); 4] = [
    ("Ctrl+G", "Generate repository"),
    ("Ctrl+R", "Reroll random pattern"),
    ("? / F1", "Toggle help"),
    ("Esc / Ctrl+C", "Quit"),
];

/// Center a `width` x `height` box in `area`, clamped to the area size
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        centered_area(area, POPUP_WIDTH, POPUP_HEIGHT)
    }

    fn render_section(
        &self,
        title: &str,
        keys: &[(&str, &str)],
        rows: &[Rect],
        buf: &mut Buffer,
    ) {
        let header = Line::from(vec![Span::styled(
            title.to_string(),
            Style::default()
                .fg(self.theme.date())
                .add_modifier(Modifier::BOLD),
        )]);
        Paragraph::new(header).render(rows[0], buf);

        if rows[1].height == 0 {
            return;
        }
        let sep = "─".repeat(rows[1].width as usize);
        buf.set_string(
            rows[1].x,
            rows[1].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );

        for ((key, desc), row) in keys.iter().zip(&rows[2..]) {
            render_keybinding(*row, buf, key, desc, self.theme);
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = format!(" gistory v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        // header + separator + keys per section, blank line between sections
        let mut constraints = Vec::new();
        for keys in [FORM_KEYS.len(), PREVIEW_KEYS.len(), GENERAL_KEYS.len()] {
            constraints.extend(std::iter::repeat(Constraint::Length(1)).take(keys + 2));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1)); // close hint
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        let form_end = FORM_KEYS.len() + 2;
        let preview_start = form_end + 1;
        let preview_end = preview_start + PREVIEW_KEYS.len() + 2;
        let general_start = preview_end + 1;
        let general_end = general_start + GENERAL_KEYS.len() + 2;

        self.render_section("Form", &FORM_KEYS, &rows[..form_end], buf);
        self.render_section(
            "Preview",
            &PREVIEW_KEYS,
            &rows[preview_start..preview_end],
            buf,
        );
        self.render_section(
            "General",
            &GENERAL_KEYS,
            &rows[general_start..general_end],
            buf,
        );

        let hint = Line::from(vec![Span::styled(
            "Press ? to close",
            Style::default().fg(self.theme.muted()),
        )]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(rows[general_end + 1], buf);
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<18}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}
