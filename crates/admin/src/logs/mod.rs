//! Live event log parsing.
//!
//! The server streams timestamped, loosely punctuated text lines in a dozen
//! shapes. `lines/` holds one independently tested micro-grammar per shape,
//! `parser` runs the priority-ordered dispatch over a raw blob, and `model`
//! carries the typed records.

pub mod lines;
pub mod model;
pub mod parser;

pub use model::{Action, Event, LogBatch};
pub use parser::{parse, parse_at};
