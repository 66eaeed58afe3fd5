// Conversion helpers grouped by source kind, plus the pattern compiler and errors.
pub mod error;
pub mod numeric;
pub mod pattern;
pub mod text;
pub mod timestamp;
