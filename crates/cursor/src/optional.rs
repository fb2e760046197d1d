//! Null-safe accessors: `Option` instead of sentinel NULL.

use rowcast_core::{
    coerce, BigInt, Coerce, Date, Decimal, OffsetDateTime, PrimitiveDateTime, TargetType, Time,
    Value,
};

use crate::error::CursorError;
use crate::traits::{Column, RowCursor};

/// Wraps a [`RowCursor`] so every accessor returns `Option`.
///
/// `Ok(None)` means the column was NULL or, for the object accessors, that
/// the value could not be coerced to the requested type. Cursor failures
/// (no current row, unknown column, backend errors) stay in `Err`.
#[derive(Debug, Clone)]
pub struct OptionalRow<C> {
    cursor: C,
}

impl<C: RowCursor> OptionalRow<C> {
    pub fn new(cursor: C) -> Self {
        Self { cursor }
    }

    pub fn advance(&mut self) -> Result<bool, CursorError> {
        self.cursor.advance()
    }

    pub fn inner(&self) -> &C {
        &self.cursor
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    pub fn into_inner(self) -> C {
        self.cursor
    }

    // ── Primitive accessors ─────────────────────────────────────────────
    //
    // Fetched through the cursor's primitive getter, then `was_null` decides.

    pub fn get_boolean<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<bool>, CursorError> {
        let v = self.cursor.get_boolean(column.into())?;
        Ok(self.unless_null(v))
    }

    pub fn get_byte<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<i8>, CursorError> {
        let v = self.cursor.get_byte(column.into())?;
        Ok(self.unless_null(v))
    }

    pub fn get_short<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<i16>, CursorError> {
        let v = self.cursor.get_short(column.into())?;
        Ok(self.unless_null(v))
    }

    pub fn get_int<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<i32>, CursorError> {
        let v = self.cursor.get_int(column.into())?;
        Ok(self.unless_null(v))
    }

    pub fn get_long<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<i64>, CursorError> {
        let v = self.cursor.get_long(column.into())?;
        Ok(self.unless_null(v))
    }

    pub fn get_float<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<f32>, CursorError> {
        let v = self.cursor.get_float(column.into())?;
        Ok(self.unless_null(v))
    }

    pub fn get_double<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<f64>, CursorError> {
        let v = self.cursor.get_double(column.into())?;
        Ok(self.unless_null(v))
    }

    fn unless_null<T>(&self, v: T) -> Option<T> {
        if self.cursor.was_null() {
            None
        } else {
            Some(v)
        }
    }

    // ── Object accessors ────────────────────────────────────────────────

    /// The raw value, `None` for NULL.
    pub fn get_value<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<Value>, CursorError> {
        let value = self.cursor.get_value(column.into())?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    /// Text as stored; any other value in its display form.
    pub fn get_string<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<String>, CursorError> {
        Ok(self.get_value(column)?.map(|value| match value {
            Value::Text(t) => t,
            other => other.to_string(),
        }))
    }

    /// Fetch and coerce to any [`Coerce`] target.
    pub fn get<'a, T: Coerce>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<T>, CursorError> {
        let column = column.into();
        let value = self.cursor.get_value(column)?;
        let coerced = T::coerce(&value);
        if coerced.is_none() && !value.is_null() {
            tracing::debug!(
                column = %column,
                source_type = value.type_name(),
                coerce_to = %T::TARGET,
                "value not coercible"
            );
        }
        Ok(coerced)
    }

    /// Fetch and coerce to a target chosen at run time.
    pub fn get_as<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
        target: TargetType,
    ) -> Result<Option<Value>, CursorError> {
        let value = self.cursor.get_value(column.into())?;
        Ok(coerce(&value, target))
    }

    pub fn get_decimal<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<Decimal>, CursorError> {
        self.get(column)
    }

    pub fn get_big_integer<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<BigInt>, CursorError> {
        self.get(column)
    }

    pub fn get_character<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<char>, CursorError> {
        self.get(column)
    }

    pub fn get_instant<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<OffsetDateTime>, CursorError> {
        self.get(column)
    }

    pub fn get_local_date<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<Date>, CursorError> {
        self.get(column)
    }

    pub fn get_local_date_time<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<PrimitiveDateTime>, CursorError> {
        self.get(column)
    }

    pub fn get_local_time<'a>(
        &mut self,
        column: impl Into<Column<'a>>,
    ) -> Result<Option<Time>, CursorError> {
        self.get(column)
    }
}
