mod error;
mod memory;
mod optional;
mod traits;

pub use error::CursorError;
pub use memory::MemoryCursor;
pub use optional::OptionalRow;
pub use traits::{Column, RowCursor};
