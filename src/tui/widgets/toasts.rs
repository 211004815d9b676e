//! Toast stack, drawn in the top-right corner

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::services::toast::{ToastKind, ToastQueue};
use crate::tui::theme::Theme;

const MAX_WIDTH: u16 = 60;
const TOAST_HEIGHT: u16 = 3;

pub struct Toasts<'a> {
    queue: &'a ToastQueue,
    theme: Theme,
}

impl<'a> Toasts<'a> {
    pub fn new(queue: &'a ToastQueue, theme: Theme) -> Self {
        Self { queue, theme }
    }

    fn color(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Success => self.theme.success(),
            ToastKind::Info => self.theme.accent(),
            ToastKind::Warning => self.theme.warning(),
            ToastKind::Error => self.theme.error(),
        }
    }
}

impl Widget for Toasts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y;
        for toast in self.queue.iter() {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let wanted = (toast.message.chars().count() + 4).max(toast.kind.title().len() + 6);
            let width = u16::try_from(wanted)
                .unwrap_or(u16::MAX)
                .min(MAX_WIDTH)
                .min(area.width);
            let rect = Rect::new(area.x + area.width - width, y, width, TOAST_HEIGHT);

            Clear.render(rect, buf);
            let color = self.color(toast.kind);
            let block = Block::default()
                .title(Span::styled(
                    format!(" {} ", toast.kind.title()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color));
            Paragraph::new(Line::from(Span::styled(
                toast.message.as_str(),
                Style::default().fg(self.theme.text()),
            )))
            .block(block)
            .render(rect, buf);

            y += TOAST_HEIGHT;
        }
    }
}
