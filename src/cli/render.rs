//! Plain-text and JSON output for `gistory preview`

use chrono::NaiveDate;
use serde::Serialize;

use crate::services::calendar::{columns, CellStats, DAYS_PER_WEEK};
use crate::types::{Cell, CommitLevel};

/// "Mon " prefix width
const LABEL_WIDTH: usize = 4;
/// Matches `CommitLevel::to_cell_str`
const CELL_WIDTH: usize = 3;

const ROW_LABELS: [&str; DAYS_PER_WEEK] = ["", "Mon", "", "Wed", "", "Fri", ""];

/// Render cells as a month header, seven weekday rows and a legend
pub fn render_text(cells: &[Cell]) -> String {
    let cols = columns(cells);
    let mut lines = Vec::with_capacity(DAYS_PER_WEEK + 2);

    let mut header = " ".repeat(LABEL_WIDTH);
    for col in &cols {
        header.push_str(&format!("{:<CELL_WIDTH$}", col.label.unwrap_or("")));
    }
    lines.push(header);

    for (row, label) in ROW_LABELS.iter().enumerate() {
        let mut line = format!("{label:<LABEL_WIDTH$}");
        for col in &cols {
            match col.days.get(row).and_then(|c| c.level()) {
                Some(level) => line.push_str(level.to_cell_str()),
                None => line.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        lines.push(line);
    }

    let legend: String = CommitLevel::ALL.iter().map(|l| l.to_cell_str()).collect();
    lines.push(format!("{}Less {legend}More", " ".repeat(LABEL_WIDTH)));

    lines
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `--json` document
#[derive(Debug, Serialize)]
pub struct PreviewJson<'a> {
    pub start_date: NaiveDate,
    pub days: usize,
    pub commits: usize,
    pub cells: &'a [Cell],
}

impl<'a> PreviewJson<'a> {
    pub fn new(start_date: NaiveDate, levels: &[CommitLevel], cells: &'a [Cell]) -> Self {
        Self {
            start_date,
            days: CellStats::from_cells(start_date, cells).data,
            commits: levels.iter().map(|l| l.commits()).sum(),
            cells,
        }
    }
}
