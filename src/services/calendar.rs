//! Calendar grid layout for the contribution-graph preview
//!
//! Maps a flat sequence of per-day levels onto Sunday-first week columns,
//! inserting a label cell at the head of every column and padding cells so
//! every column holds exactly seven days.

use chrono::{Datelike, NaiveDate};

use crate::types::{Cell, CommitLevel};

/// Days per column
pub const DAYS_PER_WEEK: usize = 7;

/// A month label is only placed on a column whose first day falls before
/// this day of the month, so two labels never crowd adjacent columns.
pub const MONTH_LABEL_DAY_LIMIT: u32 = 16;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Tooltip text for a day, e.g. "Few commits on Jan 7"
pub fn tooltip(level: CommitLevel, date: NaiveDate) -> String {
    format!("{} commits on {}", level.label(), date.format("%b %-d"))
}

/// Build the preview cells for `values`, where `values[i]` is the level of
/// `start + i` days.
///
/// Never fails: an empty sequence yields only the label placeholder and the
/// padding for the start week.
pub fn build_cells(start: NaiveDate, values: &[CommitLevel]) -> Vec<Cell> {
    let leading = start.weekday().num_days_from_sunday() as usize;
    let mut cells = Vec::with_capacity(values.len() + values.len() / DAYS_PER_WEEK + 16);

    let mut column = 0;
    cells.push(Cell::Label { text: None, column });
    cells.extend(std::iter::repeat(Cell::Padding).take(leading));
    let initial = cells.len();

    let mut last_month: Option<u32> = None;
    let mut date = start;

    for (i, &level) in values.iter().enumerate() {
        if (i + initial) % DAYS_PER_WEEK == 1 {
            let month = date.month0();
            let text = if last_month != Some(month) && date.day() < MONTH_LABEL_DAY_LIMIT {
                last_month = Some(month);
                Some(MONTH_NAMES[month as usize])
            } else {
                None
            };

            // Sunday start: the placeholder would double the first label slot
            if i == 0 {
                cells.pop();
            } else {
                column += 1;
            }
            cells.push(Cell::Label { text, column });
        }

        cells.push(Cell::Data {
            level,
            date,
            tooltip: tooltip(level, date),
            index: i,
        });

        // Saturates at the end of chrono's calendar
        date = date.succ_opt().unwrap_or(NaiveDate::MAX);
    }

    let cursor_weekday = (leading + values.len()) % DAYS_PER_WEEK;
    let trailing = (DAYS_PER_WEEK - cursor_weekday) % DAYS_PER_WEEK;
    cells.extend(std::iter::repeat(Cell::Padding).take(trailing));

    cells
}

/// Advance the level at `index` to the next one in cyclic order.
///
/// This is the update path a UI invokes when a data cell is activated;
/// the grid is rebuilt from the updated values afterwards. Returns false
/// for an out-of-range index.
pub fn on_activate(values: &mut [CommitLevel], index: usize) -> bool {
    match values.get_mut(index) {
        Some(level) => {
            *level = level.next();
            true
        }
        None => false,
    }
}

/// One week column of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    pub label: Option<&'static str>,
    /// Day cells, Sunday first. Seven for every column of a complete grid.
    pub days: Vec<&'a Cell>,
}

/// Group a cell sequence into columns. Each label cell opens a column.
pub fn columns(cells: &[Cell]) -> Vec<Column<'_>> {
    let mut result: Vec<Column<'_>> = Vec::with_capacity(cells.len() / (DAYS_PER_WEEK + 1) + 1);

    for cell in cells {
        match cell {
            Cell::Label { text, .. } => result.push(Column {
                label: *text,
                days: Vec::with_capacity(DAYS_PER_WEEK),
            }),
            day => match result.last_mut() {
                Some(col) => col.days.push(day),
                None => result.push(Column {
                    label: None,
                    days: vec![day],
                }),
            },
        }
    }

    // A Sunday start with no data leaves a lone placeholder with no days
    result.retain(|col| !col.days.is_empty());
    result
}

/// Cell counts of a built grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStats {
    pub labels: usize,
    pub leading_padding: usize,
    pub data: usize,
    pub trailing_padding: usize,
}

impl CellStats {
    /// Count the cells of a grid built by [`build_cells`] from `start`.
    ///
    /// Padding before the first data cell is leading. Without data the
    /// split comes from the start weekday.
    pub fn from_cells(start: NaiveDate, cells: &[Cell]) -> Self {
        let mut stats = Self::default();
        let mut padding = 0;
        for cell in cells {
            match cell {
                Cell::Label { .. } => stats.labels += 1,
                Cell::Data { .. } => stats.data += 1,
                Cell::Padding if stats.data == 0 => stats.leading_padding += 1,
                Cell::Padding => stats.trailing_padding += 1,
            }
            if matches!(cell, Cell::Padding) {
                padding += 1;
            }
        }
        if stats.data == 0 {
            let leading = start.weekday().num_days_from_sunday() as usize;
            stats.leading_padding = leading.min(padding);
            stats.trailing_padding = padding - stats.leading_padding;
        }
        stats
    }

    /// Day cells (data + padding)
    pub fn days(&self) -> usize {
        self.leading_padding + self.data + self.trailing_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn labels(cells: &[Cell]) -> Vec<Option<&'static str>> {
        cells
            .iter()
            .filter_map(|c| match c {
                Cell::Label { text, .. } => Some(*text),
                _ => None,
            })
            .collect()
    }

    // ========== Scenarios ==========

    #[test]
    fn test_sunday_start_full_week() {
        let cells = build_cells(date(2024, 1, 7), &[CommitLevel::Few; 7]);
        let stats = CellStats::from_cells(date(2024, 1, 7), &cells);

        assert_eq!(stats.leading_padding, 0);
        assert_eq!(stats.data, 7);
        assert_eq!(stats.trailing_padding, 0);
        assert_eq!(labels(&cells), vec![Some("Jan")]);
        assert!(cells[0].is_label());
    }

    #[test]
    fn test_tuesday_single_day() {
        let cells = build_cells(date(2024, 1, 9), &[CommitLevel::Some]);
        let stats = CellStats::from_cells(date(2024, 1, 9), &cells);

        assert_eq!(stats.leading_padding, 2);
        assert_eq!(stats.data, 1);
        assert_eq!(stats.trailing_padding, 4);
        assert_eq!(stats.days(), 7);
        assert_eq!(stats.labels, 1);
    }

    #[test]
    fn test_empty_values_midweek() {
        let cells = build_cells(date(2024, 1, 9), &[]);
        let stats = CellStats::from_cells(date(2024, 1, 9), &cells);

        assert_eq!(stats.data, 0);
        assert_eq!(stats.leading_padding, 2);
        assert_eq!(stats.trailing_padding, 5);
        assert_eq!(stats.days(), 7);
        assert_eq!(stats.labels, 1);
    }

    #[test]
    fn test_empty_values_sunday() {
        let cells = build_cells(date(2024, 1, 7), &[]);
        assert_eq!(cells, vec![Cell::Label { text: None, column: 0 }]);
        assert!(columns(&cells).is_empty());
    }

    // ========== Invariants ==========

    #[test]
    fn test_days_always_complete_weeks() {
        let start = date(2023, 12, 28);
        for offset in 0..7 {
            let s = start + chrono::Duration::days(offset);
            for len in 0..30 {
                let values = vec![CommitLevel::Many; len];
                let cells = build_cells(s, &values);
                let stats = CellStats::from_cells(s, &cells);
                assert_eq!(stats.days() % DAYS_PER_WEEK, 0, "start {s}, len {len}");
                assert_eq!(stats.data, len);
                assert_eq!(
                    stats.leading_padding,
                    s.weekday().num_days_from_sunday() as usize
                );
                assert_eq!(
                    stats.trailing_padding,
                    (DAYS_PER_WEEK - (stats.leading_padding + len) % DAYS_PER_WEEK)
                        % DAYS_PER_WEEK,
                    "start {s}, len {len}"
                );
            }
        }
    }

    #[test]
    fn test_one_label_per_column() {
        let start = date(2024, 2, 14);
        let values = vec![CommitLevel::Few; 100];
        let cells = build_cells(start, &values);
        let stats = CellStats::from_cells(start, &cells);

        assert_eq!(stats.labels * DAYS_PER_WEEK, stats.days());
        for col in columns(&cells) {
            assert_eq!(col.days.len(), DAYS_PER_WEEK);
        }
    }

    #[test]
    fn test_label_columns_are_sequential() {
        let cells = build_cells(date(2024, 1, 3), &vec![CommitLevel::Few; 40]);
        let cols: Vec<usize> = cells
            .iter()
            .filter_map(|c| match c {
                Cell::Label { column, .. } => Some(*column),
                _ => None,
            })
            .collect();
        let expected: Vec<usize> = (0..cols.len()).collect();
        assert_eq!(cols, expected);
    }

    #[test]
    fn test_sunday_start_label_not_duplicated() {
        let cells = build_cells(date(2024, 1, 7), &[CommitLevel::Few; 3]);
        assert!(cells[0].is_label());
        assert!(cells[1].is_data());
        assert_eq!(CellStats::from_cells(date(2024, 1, 7), &cells).labels, 1);
    }

    #[test]
    fn test_data_indices_in_order() {
        let values = vec![CommitLevel::Some; 20];
        let cells = build_cells(date(2024, 5, 1), &values);
        let indices: Vec<usize> = cells.iter().filter_map(Cell::index).collect();
        assert_eq!(indices, (0..20).collect::<Vec<_>>());
    }

    // ========== Month labels ==========

    #[test]
    fn test_month_transition_label() {
        // Columns start Jan 7, 14, 21, 28, Feb 4
        let cells = build_cells(date(2024, 1, 7), &vec![CommitLevel::Few; 35]);
        assert_eq!(
            labels(&cells),
            vec![Some("Jan"), None, None, None, Some("Feb")]
        );
    }

    #[test]
    fn test_late_month_start_skips_label() {
        // Columns start Jan 21, 28, Feb 4, 11, 18, 25
        let cells = build_cells(date(2024, 1, 21), &vec![CommitLevel::Few; 42]);
        assert_eq!(
            labels(&cells),
            vec![None, None, Some("Feb"), None, None, None]
        );
    }

    #[test]
    fn test_midweek_start_first_column_unlabelled() {
        // Wednesday start: placeholder column, then Mar 24, Mar 31, Apr 7
        let cells = build_cells(date(2024, 3, 20), &vec![CommitLevel::Few; 25]);
        assert_eq!(labels(&cells), vec![None, None, None, Some("Apr")]);
    }

    #[test]
    fn test_multi_year_labels_each_month_once() {
        let cells = build_cells(date(2023, 1, 1), &vec![CommitLevel::Few; 730]);
        let named: Vec<&str> = labels(&cells).into_iter().flatten().collect();
        assert_eq!(named.len(), 24);
        assert_eq!(named[0], "Jan");
        assert_eq!(named[12], "Jan");
    }

    // ========== Tooltips ==========

    #[test]
    fn test_tooltip_format() {
        assert_eq!(
            tooltip(CommitLevel::Few, date(2024, 1, 7)),
            "Few commits on Jan 7"
        );
        assert_eq!(
            tooltip(CommitLevel::Zero, date(2024, 12, 25)),
            "No commits on Dec 25"
        );
    }

    #[test]
    fn test_data_cell_dates_advance() {
        let cells = build_cells(date(2024, 2, 28), &[CommitLevel::Few; 3]);
        let dates: Vec<NaiveDate> = cells
            .iter()
            .filter_map(|c| match c {
                Cell::Data { date, .. } => Some(*date),
                _ => None,
            })
            .collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    // ========== Activation ==========

    #[test]
    fn test_on_activate_cycles_level() {
        let mut values = vec![CommitLevel::ALot, CommitLevel::Zero];
        assert!(on_activate(&mut values, 0));
        assert!(on_activate(&mut values, 1));
        assert_eq!(values, vec![CommitLevel::Zero, CommitLevel::Few]);
    }

    #[test]
    fn test_on_activate_out_of_range() {
        let mut values = vec![CommitLevel::Few];
        assert!(!on_activate(&mut values, 5));
        assert_eq!(values, vec![CommitLevel::Few]);
    }

    #[test]
    fn test_build_does_not_mutate_input() {
        let values = vec![CommitLevel::Some; 10];
        let before = values.clone();
        let _ = build_cells(date(2024, 1, 1), &values);
        assert_eq!(values, before);
    }
}
