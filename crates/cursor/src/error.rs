use rowcast_core::TargetType;

/// All errors that can be returned by a RowCursor implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// A value was requested before the first `advance()` or after the last row.
    #[error("cursor is not positioned on a row")]
    NoCurrentRow,

    /// Zero-based column index past the end of the row.
    #[error("column index {index} out of range for {count} columns")]
    ColumnOutOfRange { index: usize, count: usize },

    /// No column carries the requested label.
    #[error("unknown column: {label}")]
    UnknownColumn { label: String },

    /// A primitive getter found a non-NULL value it cannot coerce.
    #[error("column {column}: cannot read {source_type} as {target}")]
    Conversion {
        column: String,
        source_type: &'static str,
        target: TargetType,
    },

    /// A row handed to an in-memory cursor does not match its column count.
    #[error("row has {actual} values, expected {expected}")]
    RowWidth { expected: usize, actual: usize },

    /// A backend-specific cursor error (driver, connection, decoding, etc.).
    #[error("cursor backend error: {0}")]
    Backend(String),
}
