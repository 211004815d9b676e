//! Repository generation spinner popup

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::tui::theme::Theme;

use super::help::centered_area;

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const POPUP_WIDTH: u16 = 36;
const POPUP_HEIGHT: u16 = 5;

/// Generation stage for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStage {
    Pattern,
    Commits,
}

impl GenerateStage {
    pub fn message(self) -> &'static str {
        match self {
            Self::Pattern => "Building pattern...",
            Self::Commits => "Writing commits...",
        }
    }
}

/// Spinner popup shown while a repository is generated
pub struct Spinner {
    frame: usize,
    stage: GenerateStage,
    theme: Theme,
}

impl Spinner {
    pub fn new(frame: usize, stage: GenerateStage, theme: Theme) -> Self {
        Self {
            frame,
            stage,
            theme,
        }
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_area(area, POPUP_WIDTH, POPUP_HEIGHT);
        if popup.width < 4 || popup.height < 3 {
            return;
        }

        Clear.render(popup, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()))
            .title(" Generating ")
            .title_style(
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(popup);
        block.render(popup, buf);

        let text = format!("{} {}", self.current_char(), self.stage.message());
        let x = inner.x + (inner.width.saturating_sub(text.chars().count() as u16)) / 2;
        let y = inner.y + inner.height / 2;
        buf.set_stringn(
            x,
            y,
            &text,
            inner.width as usize,
            Style::default().fg(self.theme.success()),
        );
    }
}
