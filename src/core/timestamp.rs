//! Purpose: Format and parse timestamps with a conventional date pattern.
//! Exports: `DateFormat`, `TimestampExt`.
//! Role: Immutable pattern + zone configuration built fresh per call by the helpers.
//! Invariants: A `DateFormat` never changes after construction; sharing one is safe.
//! Invariants: Parsing succeeds only when the whole text matches the pattern and
//! every date field in the pattern resolves to a calendar date.
//! Invariants: Without a fixed offset, each instant uses the system zone's offset at
//! that instant (UTC when it cannot be determined), so DST is honoured.
//! Invariants: Formatting never panics; out-of-range shifts become `ErrorKind::Format`.
use time::macros::date;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::pattern::Pattern;

/// The system zone's offset at `instant`, or UTC when it cannot be determined.
///
/// `time` refuses the lookup on some platforms while other threads are running.
fn local_offset_at(instant: OffsetDateTime) -> UtcOffset {
    UtcOffset::local_offset_at(instant).unwrap_or(UtcOffset::UTC)
}

/// Places a wall-clock time in the zone described by `offset_at`.
///
/// The first lookup treats the wall clock as UTC; a second lookup at the
/// resulting instant corrects guesses that land across a transition.
fn resolve_wall_clock(
    local: PrimitiveDateTime,
    offset_at: impl Fn(OffsetDateTime) -> UtcOffset,
) -> OffsetDateTime {
    let guess = offset_at(local.assume_utc());
    let candidate = local.assume_offset(guess);
    let offset = offset_at(candidate);
    if offset == guess {
        candidate
    } else {
        local.assume_offset(offset)
    }
}

#[derive(Clone, Debug)]
pub struct DateFormat {
    pattern: Pattern,
    offset: Option<UtcOffset>,
}

impl DateFormat {
    /// Compiles `pattern`, interpreting offset-less values in the system zone.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Ok(Self {
            pattern: Pattern::compile(pattern)?,
            offset: None,
        })
    }

    /// Fixes the offset instead of following the system zone.
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The fixed offset, or `None` when the system zone is used.
    pub fn offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        self.offset.unwrap_or_else(|| local_offset_at(instant))
    }

    /// Renders `timestamp` in the configured zone.
    pub fn try_format(&self, timestamp: OffsetDateTime) -> Result<String, Error> {
        self.format_in(timestamp, |instant| self.offset_at(instant))
    }

    fn format_in(
        &self,
        timestamp: OffsetDateTime,
        offset_at: impl Fn(OffsetDateTime) -> UtcOffset,
    ) -> Result<String, Error> {
        let offset = offset_at(timestamp);
        let shifted = timestamp.checked_to_offset(offset).ok_or_else(|| {
            Error::new(ErrorKind::Format)
                .with_message(format!("timestamp is out of range at offset {offset}"))
                .with_pattern(self.pattern.as_str())
        })?;
        shifted.format(self.pattern.items()).map_err(|err| {
            Error::new(ErrorKind::Format)
                .with_message("timestamp cannot be rendered with pattern")
                .with_pattern(self.pattern.as_str())
                .with_source(err)
        })
    }

    /// Like [`DateFormat::try_format`], but yields the pattern text itself when
    /// the timestamp cannot be rendered.
    pub fn format(&self, timestamp: OffsetDateTime) -> String {
        match self.try_format(timestamp) {
            Ok(text) => text,
            Err(err) => {
                debug!(pattern = self.pattern.as_str(), error = %err, "timestamp format failed");
                self.pattern.as_str().to_string()
            }
        }
    }

    /// An offset in the text wins over the configured zone.
    pub fn try_parse(&self, text: &str) -> Result<OffsetDateTime, Error> {
        self.parse_in(text, |instant| self.offset_at(instant))
    }

    fn parse_in(
        &self,
        text: &str,
        offset_at: impl Fn(OffsetDateTime) -> UtcOffset,
    ) -> Result<OffsetDateTime, Error> {
        let items = self.pattern.items();
        let fields = self.pattern.fields();
        let parse_error = |err: time::error::Parse| {
            Error::new(ErrorKind::Parse)
                .with_message("text does not match pattern")
                .with_pattern(self.pattern.as_str())
                .with_input(text)
                .with_source(err)
        };
        let unresolvable = |message: &str| {
            Error::new(ErrorKind::Parse)
                .with_message(message)
                .with_pattern(self.pattern.as_str())
                .with_input(text)
        };

        if fields.has_partial_date() {
            return Err(unresolvable("pattern date fields do not form a full date"));
        }
        let local = if fields.has_date() && fields.has_time() {
            PrimitiveDateTime::parse(text, items).map_err(parse_error)?
        } else if fields.has_date() {
            Date::parse(text, items)
                .map_err(parse_error)?
                .with_time(Time::MIDNIGHT)
        } else if fields.has_time() {
            date!(1970-01-01).with_time(Time::parse(text, items).map_err(parse_error)?)
        } else {
            return Err(unresolvable("pattern carries neither a date nor a time"));
        };

        if fields.has_offset() {
            let offset = UtcOffset::parse(text, items).map_err(parse_error)?;
            return Ok(local.assume_offset(offset));
        }
        Ok(resolve_wall_clock(local, offset_at))
    }

    /// Like [`DateFormat::try_parse`], but `None` on any mismatch.
    pub fn parse(&self, text: &str) -> Option<OffsetDateTime> {
        match self.try_parse(text) {
            Ok(timestamp) => Some(timestamp),
            Err(err) => {
                debug!(pattern = self.pattern.as_str(), error = %err, "timestamp parse failed");
                None
            }
        }
    }
}

impl Default for DateFormat {
    /// `yyyy-MM-dd HH:mm:ss` in the system zone.
    fn default() -> Self {
        Self {
            pattern: Pattern::default(),
            offset: None,
        }
    }
}

/// Timestamp to text.
pub trait TimestampExt {
    /// Formats with `pattern` in the system zone. An invalid pattern yields
    /// the pattern text unchanged.
    fn to_text(&self, pattern: &str) -> String;

    /// Formats with `yyyy-MM-dd HH:mm:ss` in the system zone.
    fn to_text_default(&self) -> String;

    fn to_text_with(&self, format: &DateFormat) -> String;
}

impl TimestampExt for OffsetDateTime {
    fn to_text(&self, pattern: &str) -> String {
        match DateFormat::new(pattern) {
            Ok(format) => format.format(*self),
            Err(err) => {
                debug!(pattern, error = %err, "invalid date pattern");
                pattern.to_string()
            }
        }
    }

    fn to_text_default(&self) -> String {
        DateFormat::default().format(*self)
    }

    fn to_text_with(&self, format: &DateFormat) -> String {
        format.format(*self)
    }
}
