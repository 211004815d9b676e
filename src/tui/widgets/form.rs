//! Form widget: pattern fields on the left, repository fields on the right

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::form::{Field, FormState, REPO_FIELDS};
use crate::tui::theme::Theme;

use super::tabs::Tab;

/// Width of the label column
const LABEL_WIDTH: usize = 17;

/// Rows needed to show the tallest form, including borders
pub fn form_height() -> u16 {
    let tallest = Tab::all()
        .iter()
        .map(|tab| Field::method_fields(*tab).len())
        .chain(std::iter::once(REPO_FIELDS.len()))
        .max()
        .unwrap_or(0);
    // value row + error row per field
    tallest as u16 * 2 + 2
}

pub struct FormView<'a> {
    form: &'a FormState,
    tab: Tab,
    /// None while the preview has focus
    focused: Option<Field>,
    theme: Theme,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a FormState, tab: Tab, focused: Option<Field>, theme: Theme) -> Self {
        Self {
            form,
            tab,
            focused,
            theme,
        }
    }

    fn render_fields(&self, title: &str, fields: &[Field], area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints = vec![Constraint::Length(1); fields.len() * 2];
        constraints.push(Constraint::Fill(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in fields.iter().enumerate() {
            self.render_field(*field, rows[i * 2], rows[i * 2 + 1], buf);
        }
    }

    fn render_field(&self, field: Field, row: Rect, error_row: Rect, buf: &mut Buffer) {
        let focused = self.focused == Some(field);
        let label_style = if focused {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text())
        };
        let marker = if focused { "▸ " } else { "  " };

        let value = self.form.value(field);
        let value_span = if field.is_select() {
            Span::styled(
                format!("◂ {value} ▸"),
                Style::default().fg(self.theme.date()),
            )
        } else if focused {
            Span::styled(
                format!("{value}█"),
                Style::default().fg(self.theme.text()),
            )
        } else {
            Span::styled(value, Style::default().fg(self.theme.date()))
        };

        let line = Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
            value_span,
        ]);
        Paragraph::new(line).render(row, buf);

        if let Some(msg) = self.form.errors().get(field.key()) {
            // Under the value when it fits, under the label otherwise
            let indent = if LABEL_WIDTH + 2 + msg.chars().count() <= error_row.width as usize {
                LABEL_WIDTH + 2
            } else {
                2
            };
            let indent = " ".repeat(indent);
            Paragraph::new(Line::from(Span::styled(
                format!("{indent}{msg}"),
                Style::default().fg(self.theme.error()),
            )))
            .render(error_row, buf);
        }
    }
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [pattern_area, repo_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);

        self.render_fields(
            "Pattern",
            Field::method_fields(self.tab),
            pattern_area,
            buf,
        );
        self.render_fields("Repository", &REPO_FIELDS, repo_area, buf);
    }
}
