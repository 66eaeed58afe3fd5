//! Purpose: Cover text <-> timestamp helpers through the public API.
//! Exports: Integration tests only (no runtime exports).
//! Role: Verify default-pattern parsing, mismatch handling, and deterministic formatting.
//! Invariants: System-zone assertions derive their expectation from `UtcOffset::local_offset_at`.
//! Notes: `RUST_LOG=convertible=trace` shows fallback events while debugging.

use convertible::{DateFormat, ErrorKind, TextExt, TimestampExt, DEFAULT_PATTERN};
use time::macros::datetime;
use time::UtcOffset;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn utc_default() -> DateFormat {
    DateFormat::default().with_offset(UtcOffset::UTC)
}

#[test]
fn default_pattern_parses_matching_text() {
    init_tracing();
    assert!("2025-08-26 12:34:56".parse_timestamp_default().is_some());
    assert!("2025-08-26 12:34:56".parse_timestamp(DEFAULT_PATTERN).is_some());
}

#[test]
fn default_pattern_rejects_reordered_text() {
    init_tracing();
    assert!("26-08-2025 12:34:56".parse_timestamp_default().is_none());
    assert!("2025-08-26".parse_timestamp_default().is_none());
}

#[test]
fn formatting_is_deterministic() {
    init_tracing();
    let ts = datetime!(2025-08-26 12:34:56 UTC);
    let formatted = ts.to_text(DEFAULT_PATTERN);
    let expected = DateFormat::new(DEFAULT_PATTERN)
        .expect("compile")
        .format(ts);
    assert_eq!(formatted, expected);
    assert_eq!(ts.to_text_default(), expected);
}

#[test]
fn default_format_follows_system_zone_at_each_instant() {
    init_tracing();
    for ts in [
        datetime!(2025-01-15 12:00 UTC),
        datetime!(2025-07-15 12:00 UTC),
    ] {
        let offset = UtcOffset::local_offset_at(ts).unwrap_or(UtcOffset::UTC);
        let expected = utc_default().with_offset(offset).format(ts);
        assert_eq!(ts.to_text_default(), expected, "instant {ts}");
        assert_eq!(expected.parse_timestamp_default(), Some(ts), "instant {ts}");
    }
}

#[test]
fn utc_format_and_parse_round_trip() {
    init_tracing();
    let format = utc_default();
    let ts = datetime!(2025-08-26 12:34:56 UTC);
    let text = ts.to_text_with(&format);
    assert_eq!(text, "2025-08-26 12:34:56");
    assert_eq!(text.parse_timestamp_with(&format), Some(ts));
}

#[test]
fn offsets_are_applied_on_both_sides() {
    init_tracing();
    let ts = datetime!(2025-08-26 12:34:56 UTC);
    let tokyo = utc_default().with_offset(UtcOffset::from_hms(9, 0, 0).expect("offset"));
    let text = tokyo.format(ts);
    assert_eq!(text, "2025-08-26 21:34:56");
    assert_eq!(tokyo.parse(&text), Some(ts));
}

#[test]
fn custom_patterns_round_trip() {
    init_tracing();
    let ts = datetime!(2024-02-29 07:05:09.250 UTC);
    let cases = [
        ("yyyy-MM-dd'T'HH:mm:ss.SSSXXX", "2024-02-29T07:05:09.250+00:00"),
        ("dd MMMM yyyy, HH:mm:ss.SSS", "29 February 2024, 07:05:09.250"),
        ("yyyy/M/d H:m:s.SSS", "2024/2/29 7:5:9.250"),
    ];
    for (pattern, expected) in cases {
        let format = DateFormat::new(pattern)
            .expect("compile")
            .with_offset(UtcOffset::UTC);
        let text = format.format(ts);
        assert_eq!(text, expected, "pattern {pattern}");
        assert_eq!(format.parse(&text), Some(ts), "pattern {pattern}");
    }
}

#[test]
fn invalid_patterns_are_reported_or_absorbed() {
    init_tracing();
    let err = DateFormat::new("yyyy-QQ").expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::Pattern);
    assert!("2025-01".parse_timestamp("yyyy-QQ").is_none());
    let ts = datetime!(2025-08-26 12:34:56 UTC);
    assert_eq!(ts.to_text("yyyy-QQ"), "yyyy-QQ");
}

#[test]
fn try_parse_exposes_source_error() {
    use std::error::Error as _;

    init_tracing();
    let err = utc_default()
        .try_parse("2025-13-01 00:00:00")
        .expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.input(), Some("2025-13-01 00:00:00"));
    assert!(err.source().is_some());
}
