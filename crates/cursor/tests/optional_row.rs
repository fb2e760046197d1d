//! Null-safe accessors over a realistic result set.

use rowcast_core::{Decimal, TargetType, Value};
use rowcast_cursor::{Column, CursorError, MemoryCursor, OptionalRow, RowCursor};
use std::str::FromStr;
use time::macros::{date, datetime, time};

fn orders() -> OptionalRow<MemoryCursor> {
    let cursor = MemoryCursor::new([
        "order_id", "total", "paid", "placed_at", "ship_on", "note", "priority",
    ])
    .with_row(vec![
        Value::Long(1001),
        Value::Decimal(Decimal::from_str("19.99").unwrap()),
        Value::Text("yes".to_string()),
        Value::Timestamp(datetime!(2024-03-01 09:30 +1)),
        Value::Text("2024-03-04".to_string()),
        Value::Null,
        Value::Char('3'),
    ])
    .unwrap()
    .with_row(vec![
        Value::Long(1002),
        Value::Text("12.5".to_string()),
        Value::Int(0),
        Value::Long(1_709_280_000_000),
        Value::SqlDate(date!(2024 - 03 - 05)),
        Value::Text("leave at door".to_string()),
        Value::Null,
    ])
    .unwrap();
    OptionalRow::new(cursor)
}

#[test]
fn reads_typed_columns_row_by_row() {
    let mut rows = orders();

    assert!(rows.advance().unwrap());
    assert_eq!(rows.get_long("order_id").unwrap(), Some(1001));
    assert_eq!(
        rows.get_decimal("total").unwrap(),
        Some(Decimal::from_str("19.99").unwrap())
    );
    assert_eq!(rows.get_boolean("paid").unwrap(), Some(true));
    assert_eq!(
        rows.get_instant("placed_at").unwrap(),
        Some(datetime!(2024-03-01 08:30 UTC))
    );
    assert_eq!(
        rows.get_local_date_time("placed_at").unwrap(),
        Some(datetime!(2024-03-01 09:30))
    );
    assert_eq!(rows.get_local_time("placed_at").unwrap(), Some(time!(09:30)));
    assert_eq!(
        rows.get_local_date("ship_on").unwrap(),
        Some(date!(2024 - 03 - 04))
    );
    assert_eq!(rows.get_string("note").unwrap(), None);
    assert_eq!(rows.get_int("priority").unwrap(), Some(3));

    assert!(rows.advance().unwrap());
    assert_eq!(
        rows.get_decimal("total").unwrap(),
        Some(Decimal::from_str("12.5").unwrap())
    );
    assert_eq!(rows.get_boolean("paid").unwrap(), Some(false));
    assert_eq!(
        rows.get_instant("placed_at").unwrap(),
        Some(datetime!(2024-03-01 08:00 UTC))
    );
    assert_eq!(
        rows.get_local_date_time("ship_on").unwrap(),
        Some(datetime!(2024-03-05 00:00))
    );
    assert_eq!(
        rows.get_string("note").unwrap(),
        Some("leave at door".to_string())
    );
    assert_eq!(rows.get_int("priority").unwrap(), None);
    assert_eq!(rows.get_character("priority").unwrap(), None);

    assert!(!rows.advance().unwrap());
}

#[test]
fn uncoercible_object_value_is_none_but_primitive_is_an_error() {
    let mut rows = orders();
    rows.advance().unwrap();
    assert_eq!(rows.get_local_date("note").unwrap(), None);

    rows.advance().unwrap();
    assert_eq!(rows.get_local_date("note").unwrap(), None);
    match rows.get_double("note") {
        Err(CursorError::Conversion {
            column,
            source_type,
            target,
        }) => {
            assert_eq!(column, "note");
            assert_eq!(source_type, "Text");
            assert_eq!(target, TargetType::Double);
        }
        other => panic!("expected Conversion error, got {:?}", other),
    }
}

#[test]
fn cursor_errors_propagate() {
    let mut rows = orders();
    assert_eq!(
        rows.get_long("order_id"),
        Err(CursorError::NoCurrentRow)
    );
    rows.advance().unwrap();
    assert!(matches!(
        rows.get_decimal("discount"),
        Err(CursorError::UnknownColumn { .. })
    ));
}

#[test]
fn generic_and_dynamic_accessors_agree() {
    let mut rows = orders();
    rows.advance().unwrap();
    let by_type: Option<i16> = rows.get("order_id").unwrap();
    let by_target = rows.get_as("order_id", TargetType::Short).unwrap();
    assert_eq!(by_type.map(Value::Short), by_target);
    assert_eq!(
        rows.get_value("order_id").unwrap(),
        Some(Value::Long(1001))
    );
}

/// A backend whose driver fails on every fetch.
struct BrokenCursor;

impl RowCursor for BrokenCursor {
    fn advance(&mut self) -> Result<bool, CursorError> {
        Ok(true)
    }

    fn column_count(&self) -> usize {
        1
    }

    fn column_label(&self, index: usize) -> Option<&str> {
        (index == 0).then_some("only")
    }

    fn get_value(&mut self, _column: Column<'_>) -> Result<Value, CursorError> {
        Err(CursorError::Backend("connection reset".to_string()))
    }

    fn was_null(&self) -> bool {
        false
    }
}

#[test]
fn backend_failures_reach_the_caller() {
    let mut rows = OptionalRow::new(BrokenCursor);
    rows.advance().unwrap();
    let err = rows.get_int("only").unwrap_err();
    assert_eq!(err.to_string(), "cursor backend error: connection reset");
    assert_eq!(rows.inner().column_index(Column::Label("ONLY")), Ok(0));
}
