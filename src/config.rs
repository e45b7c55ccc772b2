//! Construction-time grid configuration.
//!
//! All values are fixed once a [`GridEngine`](crate::engine::GridEngine) is
//! built. The browser passes a partial object; missing fields take defaults.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 28.0;

/// Default column width in pixels.
pub const DEFAULT_COL_WIDTH: f32 = 80.0;

/// Grid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Initial number of rows
    pub row_count: u32,
    /// Initial number of columns
    pub column_count: u32,
    /// Height of a row that has never been resized
    pub default_row_height: f32,
    /// Width of a column that has never been resized
    pub default_column_width: f32,
    /// Horizontal gap added after every column
    pub cell_padding: f32,
    /// Width of the row header strip
    pub row_header_width: f32,
    /// Height of the column header strip
    pub header_height: f32,
    /// Rows materialized beyond each edge of the visible range
    pub buffer_rows: u32,
    /// Removal never goes below this many rows
    pub min_rows: u32,
    /// Removal never goes below this many columns
    pub min_columns: u32,
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
    /// Inset keeping a column anchor right of its own cell's left edge
    pub column_anchor_low_inset: f32,
    /// Inset keeping a column anchor inside the container's right edge
    pub column_anchor_high_inset: f32,
    /// Inset keeping a row anchor below its own cell's top edge
    pub row_anchor_low_inset: f32,
    /// Inset keeping a row anchor inside the container's bottom edge
    pub row_anchor_high_inset: f32,
    /// Distance the top sentinel sits above the first materialized row
    pub top_sentinel_offset: f32,
    /// Row slots in the element pool; `None` sizes it to `visible + 2 * buffer`
    pub pool_slots: Option<u32>,
    /// Fill every cell with its `"row, col"` coordinates
    pub seed_coordinates: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_count: 10_000,
            column_count: 26,
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_column_width: DEFAULT_COL_WIDTH,
            cell_padding: 12.0,
            row_header_width: 63.0,
            header_height: 28.0,
            buffer_rows: 10,
            min_rows: 2,
            min_columns: 2,
            viewport_width: 1280.0,
            viewport_height: 600.0,
            column_anchor_low_inset: 10.0,
            column_anchor_high_inset: 30.0,
            row_anchor_low_inset: 10.0,
            row_anchor_high_inset: 20.0,
            top_sentinel_offset: 10.0,
            pool_slots: None,
            seed_coordinates: false,
        }
    }
}

impl GridConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("defaultRowHeight", self.default_row_height),
            ("defaultColumnWidth", self.default_column_width),
            ("viewportWidth", self.viewport_width),
            ("viewportHeight", self.viewport_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("cellPadding", self.cell_padding),
            ("rowHeaderWidth", self.row_header_width),
            ("headerHeight", self.header_height),
            ("columnAnchorLowInset", self.column_anchor_low_inset),
            ("columnAnchorHighInset", self.column_anchor_high_inset),
            ("rowAnchorLowInset", self.row_anchor_low_inset),
            ("rowAnchorHighInset", self.row_anchor_high_inset),
            ("topSentinelOffset", self.top_sentinel_offset),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.min_rows == 0 || self.min_columns == 0 {
            return Err(GridError::InvalidConfig(
                "minimum row and column counts must be at least 1".into(),
            ));
        }
        if self.row_count < self.min_rows {
            return Err(GridError::InvalidConfig(format!(
                "rowCount {} is below minRows {}",
                self.row_count, self.min_rows
            )));
        }
        if self.column_count < self.min_columns {
            return Err(GridError::InvalidConfig(format!(
                "columnCount {} is below minColumns {}",
                self.column_count, self.min_columns
            )));
        }
        Ok(())
    }

    /// Visible row estimate used to size the pool, from default heights.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_rows_estimate(&self) -> u32 {
        let rows = (self.viewport_height / self.default_row_height).ceil();
        if rows.is_finite() && rows > 0.0 {
            rows.min(u32::MAX as f32) as u32
        } else {
            1
        }
    }

    /// Smallest pool that holds the visible rows and both buffers.
    pub fn required_pool_size(&self) -> usize {
        let slots = u64::from(self.visible_rows_estimate()) + 2 * u64::from(self.buffer_rows);
        usize::try_from(slots).unwrap_or(usize::MAX)
    }

    /// Number of row slots the pool is built with.
    pub fn pool_size(&self) -> usize {
        match self.pool_slots {
            Some(slots) => slots as usize,
            None => self.required_pool_size(),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        GridConfig::default().validate().unwrap();
    }

    #[test]
    fn default_pool_covers_visible_rows_and_both_buffers() {
        let config = GridConfig::default();
        // ceil(600 / 28) = 22
        assert_eq!(config.visible_rows_estimate(), 22);
        assert_eq!(config.pool_size(), 42);
    }

    #[test]
    fn explicit_pool_size_overrides_estimate() {
        let config = GridConfig::from_json(r#"{"poolSlots": 64}"#).unwrap();
        assert_eq!(config.pool_size(), 64);
        assert_eq!(config.required_pool_size(), 42);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{"rowCount": 500, "bufferRows": 4}"#).unwrap();
        assert_eq!(config.row_count, 500);
        assert_eq!(config.buffer_rows, 4);
        assert_eq!(config.default_row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(config.column_count, 26);
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let config = GridConfig {
            default_row_height: 0.0,
            ..GridConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("defaultRowHeight"));
    }

    #[test]
    fn rejects_counts_below_minimum() {
        let config = GridConfig {
            row_count: 1,
            ..GridConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidConfig(_))
        ));
    }
}
