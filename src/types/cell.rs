use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single cell's content.
///
/// The formula is opaque to the grid; only `calculated_value` is ever shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Formula text as entered (never evaluated here)
    #[serde(default)]
    pub formula: String,
    /// The display value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_value: Option<String>,
    /// Value type
    #[serde(rename = "type", default)]
    pub cell_type: CellType,
    /// Format flags applied to the display value
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub formatting: BTreeSet<CellFormat>,
}

impl Cell {
    /// A string cell with the given display text.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            calculated_value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Text shown in the cell element.
    pub fn display_text(&self) -> &str {
        self.calculated_value.as_deref().unwrap_or("")
    }

    /// True when the cell carries neither a formula nor a value.
    pub fn is_blank(&self) -> bool {
        self.formula.is_empty() && self.calculated_value.as_deref().map_or(true, str::is_empty)
    }
}

/// Cell value type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    String,
    Number,
    Date,
}

impl CellType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Date => "Date",
        }
    }
}

/// Format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    Bold,
    Italic,
    Underlined,
}
