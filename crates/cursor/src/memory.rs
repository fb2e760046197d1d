//! In-memory RowCursor over labelled rows.

use rowcast_core::Value;

use crate::error::CursorError;
use crate::traits::{Column, RowCursor};

/// A cursor over rows held in memory.
///
/// Starts positioned before the first row, like a freshly executed query.
/// Useful for tests and for adapting already-materialized results.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    // 0 = before the first row; n = on row n - 1; rows.len() + 1 = exhausted
    position: usize,
    last_was_null: bool,
}

impl MemoryCursor {
    /// Create an empty cursor with the given column labels.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a row. Its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), CursorError> {
        if row.len() != self.columns.len() {
            return Err(CursorError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder form of [`push_row`](Self::push_row).
    pub fn with_row(mut self, row: Vec<Value>) -> Result<Self, CursorError> {
        self.push_row(row)?;
        Ok(self)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn current_row(&self) -> Result<&[Value], CursorError> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
            .ok_or(CursorError::NoCurrentRow)
    }
}

impl RowCursor for MemoryCursor {
    fn advance(&mut self) -> Result<bool, CursorError> {
        if self.position <= self.rows.len() {
            self.position += 1;
        }
        let on_row = self.position <= self.rows.len();
        if !on_row {
            tracing::debug!(rows = self.rows.len(), "cursor exhausted");
        }
        Ok(on_row)
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_label(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    fn get_value(&mut self, column: Column<'_>) -> Result<Value, CursorError> {
        let index = self.column_index(column).inspect_err(|e| {
            tracing::debug!(column = %column, error = %e, "column lookup failed");
        })?;
        let value = self.current_row()?[index].clone();
        self.last_was_null = value.is_null();
        Ok(value)
    }

    fn was_null(&self) -> bool {
        self.last_was_null
    }
}
