//! Quit confirmation popup widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

use super::help::centered_area;

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 8;

/// Selected button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuitChoice {
    Yes,
    #[default]
    No,
}

/// State for quit confirmation dialog. Defaults to "No".
#[derive(Debug, Clone, Default)]
pub struct QuitConfirmState {
    pub choice: QuitChoice,
}

impl QuitConfirmState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch between Yes and No
    pub fn toggle(&mut self) {
        self.choice = match self.choice {
            QuitChoice::Yes => QuitChoice::No,
            QuitChoice::No => QuitChoice::Yes,
        };
    }

    pub fn confirmed(&self) -> bool {
        self.choice == QuitChoice::Yes
    }
}

/// Quit confirmation popup overlay
pub struct QuitConfirmPopup {
    choice: QuitChoice,
    /// A repository is still being written
    busy: bool,
    theme: Theme,
}

impl QuitConfirmPopup {
    pub fn new(choice: QuitChoice, busy: bool, theme: Theme) -> Self {
        Self {
            choice,
            busy,
            theme,
        }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        centered_area(area, POPUP_WIDTH, POPUP_HEIGHT)
    }

    fn button(&self, label: &'static str, choice: QuitChoice) -> [Span<'static>; 2] {
        let (marker, style) = if self.choice == choice {
            (
                "▸ ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(self.theme.muted()))
        };
        [Span::styled(marker, style), Span::styled(label, style)]
    }
}

impl Widget for QuitConfirmPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Quit? ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.date()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Question
            Constraint::Length(1), // [2] Busy warning
            Constraint::Length(1), // [3] Buttons
            Constraint::Length(1), // [4] Key hints
        ])
        .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Are you sure you want to quit?",
            Style::default().fg(self.theme.text()),
        )))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        if self.busy {
            Paragraph::new(Line::from(Span::styled(
                "A repository is still being generated",
                Style::default().fg(self.theme.warning()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
        }

        let [yes_marker, yes] = self.button("Yes", QuitChoice::Yes);
        let [no_marker, no] = self.button("No", QuitChoice::No);
        Paragraph::new(Line::from(vec![
            yes_marker,
            yes,
            Span::raw("       "),
            no_marker,
            no,
        ]))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        let key = Style::default()
            .fg(self.theme.muted())
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(self.theme.muted());
        Paragraph::new(Line::from(vec![
            Span::styled("←→", key),
            Span::styled(" Select  ", text),
            Span::styled("Enter", key),
            Span::styled(" Confirm", text),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }
}
