//! Contribution-graph preview widget
//!
//! Renders builder cells as 8 rows (month labels + Sunday..Saturday) by N
//! week columns, followed by a legend line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::services::calendar::{columns, DAYS_PER_WEEK};
use crate::tui::theme::Theme;
use crate::types::{Cell, CommitLevel};

/// 2 chars content + 1 gap
pub const CELL_WIDTH: u16 = 3;
/// "Mon " prefix
pub const LABEL_WIDTH: u16 = 4;
/// Label row + 7 day rows + legend
pub const GRID_HEIGHT: u16 = 1 + DAYS_PER_WEEK as u16 + 1;

/// Weekday labels, by Sunday-first row
const ROW_LABELS: [(usize, &str); 3] = [(1, "Mon"), (3, "Wed"), (5, "Fri")];

/// Week columns that fit in `width`
pub fn visible_columns(width: u16) -> usize {
    (width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH) as usize
}

/// Column and row of the data cell with `index`
pub fn cell_position(cells: &[Cell], index: usize) -> Option<(usize, usize)> {
    columns(cells).iter().enumerate().find_map(|(col, column)| {
        column
            .days
            .iter()
            .position(|c| c.index() == Some(index))
            .map(|row| (col, row))
    })
}

/// Data index at a column/row, if that slot holds a data cell
pub fn index_at(cells: &[Cell], column: usize, row: usize) -> Option<usize> {
    columns(cells)
        .get(column)
        .and_then(|c| c.days.get(row))
        .and_then(|c| c.index())
}

/// Smallest scroll change that keeps `column` inside a `visible`-wide window
pub fn scroll_to_show(column: usize, visible: usize, scroll: usize) -> usize {
    if visible == 0 {
        column
    } else if column < scroll {
        column
    } else if column >= scroll + visible {
        column + 1 - visible
    } else {
        scroll
    }
}

/// Preview widget for ratatui
pub struct PreviewGrid<'a> {
    cells: &'a [Cell],
    theme: Theme,
    cursor: Option<usize>,
    scroll: usize,
}

impl<'a> PreviewGrid<'a> {
    pub fn new(cells: &'a [Cell], theme: Theme) -> Self {
        Self {
            cells,
            theme,
            cursor: None,
            scroll: 0,
        }
    }

    /// Highlight the data cell with this index
    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// First week column to draw
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn render_row_labels(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.muted());
        for (row, label) in ROW_LABELS {
            let y = area.y + 1 + row as u16;
            if y < area.bottom() {
                buf.set_string(area.x, y, label, style);
            }
        }
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer, y: u16) {
        let muted = Style::default().fg(self.theme.muted());
        let mut x = area.x + LABEL_WIDTH;

        buf.set_string(x, y, "Less ", muted);
        x += 5;
        for level in CommitLevel::ALL {
            if x + 1 >= area.right() {
                return;
            }
            buf.set_string(
                x,
                y,
                "██",
                Style::default().fg(self.theme.level_color(level)),
            );
            x += 2;
        }
        buf.set_string(x, y, " More", muted);
        x += 5;

        if let Some(tooltip) = self.cursor_tooltip() {
            let x = x + 3;
            if x < area.right() {
                let width = (area.right() - x) as usize;
                buf.set_stringn(x, y, tooltip, width, Style::default().fg(self.theme.date()));
            }
        }
    }

    fn cursor_tooltip(&self) -> Option<&'a str> {
        let cursor = self.cursor?;
        self.cells.iter().find_map(|c| match c {
            Cell::Data { tooltip, index, .. } if *index == cursor => Some(tooltip.as_str()),
            _ => None,
        })
    }
}

impl Widget for PreviewGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= LABEL_WIDTH || area.height == 0 {
            return;
        }

        self.render_row_labels(area, buf);

        let visible = visible_columns(area.width);
        let start_x = area.x + LABEL_WIDTH;
        let label_style = Style::default().fg(self.theme.muted());

        for (i, column) in columns(self.cells)
            .iter()
            .skip(self.scroll)
            .take(visible)
            .enumerate()
        {
            let x = start_x + i as u16 * CELL_WIDTH;

            if let Some(label) = column.label {
                let width = (area.right().saturating_sub(x)) as usize;
                buf.set_stringn(x, area.y, label, width, label_style);
            }

            for (row, day) in column.days.iter().enumerate() {
                let y = area.y + 1 + row as u16;
                if y >= area.bottom() {
                    break;
                }
                if let Cell::Data { level, index, .. } = day {
                    let color = self.theme.level_color(*level);
                    if self.cursor == Some(*index) {
                        let style = Style::default()
                            .fg(self.theme.cursor())
                            .bg(color)
                            .add_modifier(Modifier::BOLD);
                        buf.set_string(x, y, "[]", style);
                    } else {
                        buf.set_string(x, y, "██", Style::default().fg(color));
                    }
                }
            }
        }

        let legend_y = area.y + GRID_HEIGHT - 1;
        if legend_y < area.bottom() {
            self.render_legend(area, buf, legend_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::calendar::build_cells;
    use chrono::NaiveDate;

    fn cells(start: (i32, u32, u32), len: usize) -> Vec<Cell> {
        let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        build_cells(start, &vec![CommitLevel::Many; len])
    }

    fn render(cells: &[Cell], cursor: Option<usize>, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, GRID_HEIGHT);
        let mut buf = Buffer::empty(area);
        PreviewGrid::new(cells, Theme::Dark)
            .cursor(cursor)
            .render(area, &mut buf);
        buf
    }

    fn text_at(buf: &Buffer, x: u16, y: u16, len: u16) -> String {
        (x..x + len)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    // ========== Layout helpers ==========

    #[test]
    fn test_visible_columns() {
        assert_eq!(visible_columns(LABEL_WIDTH + 3 * CELL_WIDTH), 3);
        assert_eq!(visible_columns(LABEL_WIDTH + 3 * CELL_WIDTH + 2), 3);
        assert_eq!(visible_columns(2), 0);
    }

    #[test]
    fn test_cell_position_and_index_at() {
        // Tuesday start: index 0 sits in column 0, row 2
        let cells = cells((2024, 1, 9), 10);
        assert_eq!(cell_position(&cells, 0), Some((0, 2)));
        assert_eq!(cell_position(&cells, 5), Some((1, 0)));
        assert_eq!(cell_position(&cells, 99), None);

        assert_eq!(index_at(&cells, 0, 2), Some(0));
        assert_eq!(index_at(&cells, 0, 0), None); // padding
        assert_eq!(index_at(&cells, 9, 0), None);
    }

    #[test]
    fn test_scroll_to_show() {
        assert_eq!(scroll_to_show(0, 10, 5), 0);
        assert_eq!(scroll_to_show(7, 10, 5), 5);
        assert_eq!(scroll_to_show(15, 10, 5), 6);
    }

    // ========== Rendering ==========

    #[test]
    fn test_render_row_labels() {
        let buf = render(&cells((2024, 1, 7), 14), None, 40);
        assert_eq!(text_at(&buf, 0, 2, 3), "Mon");
        assert_eq!(text_at(&buf, 0, 4, 3), "Wed");
        assert_eq!(text_at(&buf, 0, 6, 3), "Fri");
        assert_eq!(text_at(&buf, 0, 1, 3), "   ");
    }

    #[test]
    fn test_render_month_label_row() {
        let buf = render(&cells((2024, 1, 7), 35), None, 40);
        assert_eq!(text_at(&buf, LABEL_WIDTH, 0, 3), "Jan");
        let feb_x = LABEL_WIDTH + 4 * CELL_WIDTH;
        assert_eq!(text_at(&buf, feb_x, 0, 3), "Feb");
    }

    #[test]
    fn test_render_data_colors_and_padding() {
        let buf = render(&cells((2024, 1, 9), 1), None, 40);
        // Sunday/Monday rows are padding
        assert_eq!(buf.cell((LABEL_WIDTH, 1)).unwrap().symbol(), " ");
        // Tuesday row holds the data cell
        let cell = buf.cell((LABEL_WIDTH, 3)).unwrap();
        assert_eq!(cell.symbol(), "█");
        assert_eq!(cell.fg, Theme::Dark.level_color(CommitLevel::Many));
    }

    #[test]
    fn test_render_cursor_and_tooltip() {
        let cells = cells((2024, 1, 7), 7);
        let buf = render(&cells, Some(1), 80);
        let cell = buf.cell((LABEL_WIDTH, 2)).unwrap();
        assert_eq!(cell.symbol(), "[");
        assert_eq!(cell.fg, Theme::Dark.cursor());

        let legend = text_at(&buf, 0, GRID_HEIGHT - 1, 80);
        assert!(legend.contains("Less"));
        assert!(legend.contains("More"));
        assert!(legend.contains("Many commits on Jan 8"));
    }

    #[test]
    fn test_render_scroll_skips_columns() {
        let cells = cells((2024, 1, 7), 35);
        let area = Rect::new(0, 0, 40, GRID_HEIGHT);
        let mut buf = Buffer::empty(area);
        PreviewGrid::new(&cells, Theme::Dark)
            .scroll(4)
            .render(area, &mut buf);
        assert_eq!(text_at(&buf, LABEL_WIDTH, 0, 3), "Feb");
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let cells = cells((2024, 1, 7), 100);
        let _ = render(&cells, Some(3), 3);
        let _ = render(&cells, Some(3), 6);
    }
}
