//! Preview grid cells

use chrono::NaiveDate;
use serde::Serialize;

use super::CommitLevel;

/// One renderable unit of the preview grid.
///
/// A grid is a flat sequence of cells: every column starts with a `Label`
/// and is followed by seven day cells (`Data` or `Padding`), Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cell {
    /// Column header. `text` is a short month name, or `None` when the
    /// column gets no label.
    Label {
        text: Option<&'static str>,
        column: usize,
    },
    /// A day of the pattern
    Data {
        level: CommitLevel,
        date: NaiveDate,
        tooltip: String,
        /// Offset into the original level sequence
        index: usize,
    },
    /// Filler for partial weeks at the start and end
    Padding,
}

impl Cell {
    pub fn is_label(&self) -> bool {
        matches!(self, Cell::Label { .. })
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Cell::Data { .. })
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, Cell::Padding)
    }

    /// Level of a data cell
    pub fn level(&self) -> Option<CommitLevel> {
        match self {
            Cell::Data { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Index of a data cell into the level sequence
    pub fn index(&self) -> Option<usize> {
        match self {
            Cell::Data { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_predicates() {
        let label = Cell::Label {
            text: Some("Jan"),
            column: 0,
        };
        let data = Cell::Data {
            level: CommitLevel::Few,
            date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            tooltip: "Few commits on Jan 7".to_string(),
            index: 3,
        };
        assert!(label.is_label());
        assert!(data.is_data());
        assert!(Cell::Padding.is_padding());
        assert_eq!(data.level(), Some(CommitLevel::Few));
        assert_eq!(data.index(), Some(3));
        assert_eq!(Cell::Padding.level(), None);
        assert_eq!(label.index(), None);
    }

    #[test]
    fn test_cell_json_is_tagged() {
        let json = serde_json::to_value(Cell::Padding).unwrap();
        assert_eq!(json["kind"], "padding");

        let json = serde_json::to_value(Cell::Label {
            text: None,
            column: 2,
        })
        .unwrap();
        assert_eq!(json["kind"], "label");
        assert!(json["text"].is_null());
        assert_eq!(json["column"], 2);
    }
}
