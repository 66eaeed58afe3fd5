//! Purpose: Text-to-number and text-to-timestamp conversions.
//! Exports: `TextExt`.
//! Role: Optional (`to_*`) and defaulted (`to_*_value`) parse helpers on `str`.
//! Invariants: Optional helpers return `None` on malformed input and never panic.
//! Invariants: Defaulted helpers return 0 on malformed input; only `to_float_value`
//! also maps a parsed NaN to 0.
//! Notes: Parsing is strict `FromStr`: no trimming, no locale separators.
use std::str::FromStr;

use time::OffsetDateTime;
use tracing::trace;

use crate::core::timestamp::DateFormat;

pub trait TextExt {
    /// Parses into any `FromStr` type, `None` on failure.
    fn parse_as<T: FromStr>(&self) -> Option<T>;

    fn to_int(&self) -> Option<i64>;

    /// `0` when the text is not an `i64` literal.
    fn to_int_value(&self) -> i64;

    fn to_float(&self) -> Option<f32>;

    /// `0` when the text is not a float literal or parses to NaN.
    fn to_float_value(&self) -> f32;

    fn to_double(&self) -> Option<f64>;

    /// `0` when the text is not a float literal.
    ///
    /// Unlike [`TextExt::to_float_value`], a parsed NaN is returned as NaN.
    fn to_double_value(&self) -> f64;

    /// Parses with `pattern` in the system zone. An invalid pattern or any
    /// mismatch yields `None`.
    fn parse_timestamp(&self, pattern: &str) -> Option<OffsetDateTime>;

    /// Parses with `yyyy-MM-dd HH:mm:ss` in the system zone.
    fn parse_timestamp_default(&self) -> Option<OffsetDateTime>;

    fn parse_timestamp_with(&self, format: &DateFormat) -> Option<OffsetDateTime>;
}

impl TextExt for str {
    fn parse_as<T: FromStr>(&self) -> Option<T> {
        self.parse().ok()
    }

    fn to_int(&self) -> Option<i64> {
        self.parse_as()
    }

    fn to_int_value(&self) -> i64 {
        self.to_int().unwrap_or_else(|| {
            trace!(input = self, "not an integer, using 0");
            0
        })
    }

    fn to_float(&self) -> Option<f32> {
        self.parse_as()
    }

    fn to_float_value(&self) -> f32 {
        match self.to_float() {
            Some(value) if !value.is_nan() => value,
            _ => {
                trace!(input = self, "not a number, using 0");
                0.0
            }
        }
    }

    fn to_double(&self) -> Option<f64> {
        self.parse_as()
    }

    fn to_double_value(&self) -> f64 {
        self.to_double().unwrap_or_else(|| {
            trace!(input = self, "not a number, using 0");
            0.0
        })
    }

    fn parse_timestamp(&self, pattern: &str) -> Option<OffsetDateTime> {
        match DateFormat::new(pattern) {
            Ok(format) => format.parse(self),
            Err(err) => {
                trace!(pattern, error = %err, "invalid date pattern");
                None
            }
        }
    }

    fn parse_timestamp_default(&self) -> Option<OffsetDateTime> {
        DateFormat::default().parse(self)
    }

    fn parse_timestamp_with(&self, format: &DateFormat) -> Option<OffsetDateTime> {
        format.parse(self)
    }
}
