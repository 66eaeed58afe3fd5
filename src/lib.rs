//! Purpose: Conversion helpers between integers, floats, text, and timestamps.
//! Exports: `core` plus root re-exports of the extension traits and `DateFormat`.
//! Role: Library crate; every helper is a pure function of its inputs.
//! Invariants: Optional helpers return `None`, defaulted helpers return 0; neither panics.
//! Invariants: No hidden global state; date formatters are built per call.
pub mod core;

pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::numeric::{FloatKind, IntegerKind, NativeFloat};
pub use crate::core::pattern::DEFAULT_PATTERN;
pub use crate::core::text::TextExt;
pub use crate::core::timestamp::{DateFormat, TimestampExt};
