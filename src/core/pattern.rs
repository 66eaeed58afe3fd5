//! Purpose: Compile `yyyy-MM-dd HH:mm:ss` style date patterns into `time` format items.
//! Exports: `Pattern`, `DEFAULT_PATTERN`.
//! Role: Single translation point between conventional pattern letters and `time`
//! format descriptions; callers never build description strings themselves.
//! Invariants: Unknown pattern letters and unterminated quotes are errors, never literals.
//! Invariants: Non-letter characters and quoted text are emitted as literals.
//! Notes: `yy` formats the last two digits but cannot be parsed back into a full date.
use std::borrow::Cow;

use time::format_description::{self, BorrowedFormatItem, OwnedFormatItem};
use time::macros::format_description;

use crate::core::error::{Error, ErrorKind};

pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

/// Calendar parts a compiled pattern carries, used to pick the parse target.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Fields {
    pub(crate) year: bool,
    pub(crate) short_year: bool,
    pub(crate) month: bool,
    pub(crate) day: bool,
    pub(crate) ordinal: bool,
    pub(crate) hour: bool,
    pub(crate) offset: bool,
}

impl Fields {
    pub(crate) fn has_date(&self) -> bool {
        self.year && ((self.month && self.day) || self.ordinal)
    }

    /// Some date field is present but they do not resolve to a calendar date.
    pub(crate) fn has_partial_date(&self) -> bool {
        let any = self.year || self.short_year || self.month || self.day || self.ordinal;
        any && !self.has_date()
    }

    pub(crate) fn has_time(&self) -> bool {
        self.hour
    }

    pub(crate) fn has_offset(&self) -> bool {
        self.offset
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Year,
    ShortYear,
    Month,
    Day,
    Ordinal,
    Hour,
    Offset,
    Other,
}

#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    description: String,
    items: OwnedFormatItem,
    fields: Fields,
}

impl Pattern {
    pub fn compile(pattern: &str) -> Result<Self, Error> {
        let mut description = String::with_capacity(pattern.len() * 2);
        let mut fields = Fields::default();
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\'' {
                if chars.next_if_eq(&'\'').is_some() {
                    push_literal(&mut description, '\'');
                    continue;
                }
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    if inner == '\'' {
                        if chars.next_if_eq(&'\'').is_some() {
                            push_literal(&mut description, '\'');
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    push_literal(&mut description, inner);
                }
                if !closed {
                    return Err(Error::new(ErrorKind::Pattern)
                        .with_message("unterminated quoted literal")
                        .with_pattern(pattern));
                }
                continue;
            }

            if ch.is_ascii_alphabetic() {
                let mut width = 1usize;
                while chars.next_if_eq(&ch).is_some() {
                    width += 1;
                }
                let Some((component, field)) = component(ch, width) else {
                    return Err(Error::new(ErrorKind::Pattern)
                        .with_message(format!(
                            "unsupported token {:?}",
                            ch.to_string().repeat(width)
                        ))
                        .with_pattern(pattern));
                };
                description.push_str(&component);
                match field {
                    Field::Year => fields.year = true,
                    Field::ShortYear => fields.short_year = true,
                    Field::Month => fields.month = true,
                    Field::Day => fields.day = true,
                    Field::Ordinal => fields.ordinal = true,
                    Field::Hour => fields.hour = true,
                    Field::Offset => fields.offset = true,
                    Field::Other => {}
                }
                continue;
            }

            push_literal(&mut description, ch);
        }

        let items = format_description::parse_owned::<1>(&description).map_err(|err| {
            Error::new(ErrorKind::Pattern)
                .with_message("pattern produced an invalid format description")
                .with_pattern(pattern)
                .with_source(err)
        })?;

        Ok(Self {
            source: pattern.to_string(),
            description,
            items,
            fields,
        })
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The equivalent `time` format description (version 1 syntax).
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn items(&self) -> &OwnedFormatItem {
        &self.items
    }

    pub(crate) fn fields(&self) -> Fields {
        self.fields
    }
}

impl Default for Pattern {
    /// [`DEFAULT_PATTERN`], built at compile time.
    fn default() -> Self {
        const ITEMS: &[BorrowedFormatItem<'static>] =
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        Self {
            source: DEFAULT_PATTERN.to_string(),
            description: "[year]-[month]-[day] [hour]:[minute]:[second]".to_string(),
            items: ITEMS.into(),
            fields: Fields {
                year: true,
                month: true,
                day: true,
                hour: true,
                ..Fields::default()
            },
        }
    }
}

fn push_literal(description: &mut String, ch: char) {
    if ch == '[' {
        description.push_str("[[");
    } else {
        description.push(ch);
    }
}

fn component(letter: char, width: usize) -> Option<(Cow<'static, str>, Field)> {
    let (text, field): (&'static str, Field) = match (letter, width) {
        ('y', 2) => ("[year repr:last_two]", Field::ShortYear),
        ('y', _) => ("[year]", Field::Year),
        ('M', 1) => ("[month padding:none]", Field::Month),
        ('M', 2) => ("[month]", Field::Month),
        ('M', 3) => ("[month repr:short]", Field::Month),
        ('M', _) => ("[month repr:long]", Field::Month),
        ('d', 1) => ("[day padding:none]", Field::Day),
        ('d', 2) => ("[day]", Field::Day),
        ('D', 1) => ("[ordinal padding:none]", Field::Ordinal),
        ('D', 2 | 3) => ("[ordinal]", Field::Ordinal),
        ('E', 1..=3) => ("[weekday repr:short]", Field::Other),
        ('E', 4) => ("[weekday repr:long]", Field::Other),
        ('H', 1) => ("[hour padding:none]", Field::Hour),
        ('H', 2) => ("[hour]", Field::Hour),
        ('h', 1) => ("[hour repr:12 padding:none]", Field::Hour),
        ('h', 2) => ("[hour repr:12]", Field::Hour),
        ('a', 1) => ("[period]", Field::Other),
        ('m', 1) => ("[minute padding:none]", Field::Other),
        ('m', 2) => ("[minute]", Field::Other),
        ('s', 1) => ("[second padding:none]", Field::Other),
        ('s', 2) => ("[second]", Field::Other),
        ('S', 1..=9) => {
            return Some((
                Cow::Owned(format!("[subsecond digits:{width}]")),
                Field::Other,
            ));
        }
        ('Z', 1..=3) | ('X' | 'x', 1 | 2) => (
            "[offset_hour sign:mandatory][offset_minute]",
            Field::Offset,
        ),
        ('X' | 'x', 3) => (
            "[offset_hour sign:mandatory]:[offset_minute]",
            Field::Offset,
        ),
        _ => return None,
    };
    Some((Cow::Borrowed(text), field))
}

#[cfg(test)]
mod tests {
    use super::{Pattern, DEFAULT_PATTERN};
    use crate::core::error::ErrorKind;

    #[test]
    fn default_pattern_translates() {
        let pattern = Pattern::compile(DEFAULT_PATTERN).expect("compile");
        assert_eq!(
            pattern.description(),
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        );
        let fields = pattern.fields();
        assert!(fields.has_date());
        assert!(fields.has_time());
        assert!(!fields.has_offset());
        assert_eq!(pattern.as_str(), DEFAULT_PATTERN);
    }

    #[test]
    fn built_in_default_agrees_with_compiler() {
        let compiled = Pattern::compile(DEFAULT_PATTERN).expect("compile");
        let built = Pattern::default();
        assert_eq!(built.as_str(), compiled.as_str());
        assert_eq!(built.description(), compiled.description());
        assert_eq!(built.fields(), compiled.fields());
    }

    #[test]
    fn quoted_literals_and_brackets_are_escaped() {
        let pattern = Pattern::compile("yyyy-MM-dd'T'HH:mm '['Z ''!''").expect("compile");
        assert_eq!(
            pattern.description(),
            "[year]-[month]-[day]T[hour]:[minute] [[[offset_hour sign:mandatory][offset_minute] '!'"
        );
        assert!(pattern.fields().has_offset());
    }

    #[test]
    fn width_selects_representation() {
        let pattern = Pattern::compile("d/M/yy h a EEEE MMM SSS").expect("compile");
        assert_eq!(
            pattern.description(),
            "[day padding:none]/[month padding:none]/[year repr:last_two] [hour repr:12 padding:none] [period] [weekday repr:long] [month repr:short] [subsecond digits:3]"
        );
        assert!(!pattern.fields().has_date());
        assert!(pattern.fields().has_partial_date());
    }

    #[test]
    fn month_and_day_without_year_is_partial() {
        let fields = Pattern::compile("MM-dd HH:mm").expect("compile").fields();
        assert!(fields.has_partial_date());
        assert!(!Pattern::compile("HH:mm").expect("compile").fields().has_partial_date());
        assert!(!Pattern::compile(DEFAULT_PATTERN).expect("compile").fields().has_partial_date());
    }

    #[test]
    fn ordinal_counts_as_date() {
        let pattern = Pattern::compile("yyyy.DDD").expect("compile");
        assert!(pattern.fields().has_date());
        assert!(!pattern.fields().has_time());
    }

    #[test]
    fn unknown_letter_is_rejected() {
        let err = Pattern::compile("yyyy-QQ").expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Pattern);
        assert_eq!(err.pattern(), Some("yyyy-QQ"));
        assert!(err.to_string().contains("\"QQ\""));
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let err = Pattern::compile("yyyy 'at").expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Pattern);
        assert_eq!(err.message(), Some("unterminated quoted literal"));
    }

    #[test]
    fn oversized_tokens_are_rejected() {
        assert!(Pattern::compile("ddd").is_err());
        assert!(Pattern::compile("SSSSSSSSSS").is_err());
    }
}
