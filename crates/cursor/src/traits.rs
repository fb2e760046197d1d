use std::fmt;

use rowcast_core::{Coerce, Value};

use crate::error::CursorError;

/// Addresses a column of the current row.
///
/// Indexes are zero-based. Labels match ASCII case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    Index(usize),
    Label(&'a str),
}

impl From<usize> for Column<'_> {
    fn from(index: usize) -> Self {
        Column::Index(index)
    }
}

impl<'a> From<&'a str> for Column<'a> {
    fn from(label: &'a str) -> Self {
        Column::Label(label)
    }
}

impl fmt::Display for Column<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Index(i) => write!(f, "#{}", i),
            Column::Label(label) => f.write_str(label),
        }
    }
}

/// A forward-only cursor over result rows.
///
/// This is the collaborator the coercion engine sits behind. An implementation
/// supplies the dynamically typed value of a column and remembers whether the
/// most recent fetch was SQL NULL.
///
/// ## Primitive getters
///
/// The provided `get_boolean` .. `get_double` methods follow the classic
/// driver contract: SQL NULL reads as `false` or `0` and only `was_null()`
/// tells it apart from a stored zero. A non-NULL value that cannot be coerced
/// to the primitive is a `CursorError::Conversion`.
pub trait RowCursor {
    /// Move to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool, CursorError>;

    fn column_count(&self) -> usize;

    /// Label of the zero-based column `index`, if it exists.
    fn column_label(&self, index: usize) -> Option<&str>;

    /// Fetch the raw value of `column` in the current row.
    ///
    /// Implementations must update `was_null()` on every successful fetch.
    fn get_value(&mut self, column: Column<'_>) -> Result<Value, CursorError>;

    /// Whether the most recently fetched value was SQL NULL.
    fn was_null(&self) -> bool;

    /// Resolve a column to its zero-based index.
    fn column_index(&self, column: Column<'_>) -> Result<usize, CursorError> {
        let count = self.column_count();
        match column {
            Column::Index(index) if index < count => Ok(index),
            Column::Index(index) => Err(CursorError::ColumnOutOfRange { index, count }),
            Column::Label(label) => (0..count)
                .find(|&i| {
                    self.column_label(i)
                        .is_some_and(|l| l.eq_ignore_ascii_case(label))
                })
                .ok_or_else(|| CursorError::UnknownColumn {
                    label: label.to_string(),
                }),
        }
    }

    fn get_boolean(&mut self, column: Column<'_>) -> Result<bool, CursorError> {
        get_primitive(self, column)
    }

    fn get_byte(&mut self, column: Column<'_>) -> Result<i8, CursorError> {
        get_primitive(self, column)
    }

    fn get_short(&mut self, column: Column<'_>) -> Result<i16, CursorError> {
        get_primitive(self, column)
    }

    fn get_int(&mut self, column: Column<'_>) -> Result<i32, CursorError> {
        get_primitive(self, column)
    }

    fn get_long(&mut self, column: Column<'_>) -> Result<i64, CursorError> {
        get_primitive(self, column)
    }

    fn get_float(&mut self, column: Column<'_>) -> Result<f32, CursorError> {
        get_primitive(self, column)
    }

    fn get_double(&mut self, column: Column<'_>) -> Result<f64, CursorError> {
        get_primitive(self, column)
    }
}

/// NULL reads as the type's zero value.
fn get_primitive<C, T>(cursor: &mut C, column: Column<'_>) -> Result<T, CursorError>
where
    C: RowCursor + ?Sized,
    T: Coerce + Default,
{
    let value = cursor.get_value(column)?;
    if value.is_null() {
        return Ok(T::default());
    }
    T::coerce(&value).ok_or_else(|| CursorError::Conversion {
        column: column.to_string(),
        source_type: value.type_name(),
        target: T::TARGET,
    })
}
