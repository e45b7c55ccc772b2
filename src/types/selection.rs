use serde::{Deserialize, Serialize};

/// A logical cell coordinate (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Grid axis. Rows stack vertically, columns horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// Where a structural insert lands relative to the selected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    After,
}

impl InsertPosition {
    /// Parse `"before"` or `"after"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }

    /// Resolve to a concrete insertion index relative to `reference`.
    pub fn resolve(self, reference: u32) -> u32 {
        match self {
            Self::Before => reference,
            Self::After => reference.saturating_add(1),
        }
    }
}

/// Which structural commands are currently available.
///
/// Used by toolbar glue to enable or disable buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionState {
    pub can_insert_row: bool,
    pub can_remove_row: bool,
    pub can_insert_column: bool,
    pub can_remove_column: bool,
}
