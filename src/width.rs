//! Column width inference.
//!
//! Widths are in spreadsheet character units. Each column is sized to its
//! longest rendered value, scaled and padded, then clamped so one long note
//! cannot produce an unusably wide column.

use serde::{Deserialize, Serialize};

use crate::cell::Table;
use crate::format::cell_text;

/// How rendered text length maps to a column width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidthPolicy {
    /// Multiplier applied to the longest value's length.
    pub factor: f64,
    /// Added after scaling.
    pub padding: f64,
    pub min: u32,
    pub max: u32,
}

impl Default for WidthPolicy {
    fn default() -> Self {
        Self {
            factor: 1.15,
            padding: 2.0,
            min: 10,
            max: 50,
        }
    }
}

impl WidthPolicy {
    pub fn with_bounds(mut self, min: u32, max: u32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_scaling(mut self, factor: f64, padding: f64) -> Self {
        self.factor = factor;
        self.padding = padding;
        self
    }

    /// Width for a column whose longest value is `max_len` characters.
    ///
    /// `max` wins if the bounds are inverted.
    pub fn width_for(&self, max_len: usize) -> u32 {
        let raw = (max_len as f64 * self.factor + self.padding).round();
        let raw = if raw.is_finite() && raw > 0.0 {
            // Saturating: anything past u32::MAX is clamped below anyway.
            raw as u32
        } else {
            0
        };
        raw.max(self.min).min(self.max)
    }
}

/// Infer one width per column.
///
/// The column count is [`Table::column_count`]; cells missing from short
/// rows count as empty. Lengths are measured in characters of the rendered
/// text, formula guard included.
///
/// # Examples
///
/// ```
/// use tabex::{infer_column_widths, Cell, Table, WidthPolicy};
///
/// let table = Table::from_rows([vec![Cell::from("x"), Cell::from("y".repeat(200))]]);
/// assert_eq!(infer_column_widths(&table, &WidthPolicy::default()), vec![10, 50]);
/// ```
pub fn infer_column_widths(table: &Table, policy: &WidthPolicy) -> Vec<u32> {
    let mut max_lens = vec![0usize; table.column_count()];
    for row in table.rows() {
        for (col, cell) in row.iter().enumerate() {
            let len = cell_text(cell).chars().count();
            if len > max_lens[col] {
                max_lens[col] = len;
            }
        }
    }
    max_lens
        .into_iter()
        .map(|len| policy.width_for(len))
        .collect()
}
