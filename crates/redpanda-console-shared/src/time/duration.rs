//! A [`Duration`] which is written the way the Console configuration expects durations: a
//! sequence of `<integer><unit>` fragments like `10s`, `1m30s` or `500ms`. Units range from hours
//! down to nanoseconds, so every [`std::time::Duration`] has a textual form.
//!
//! Fragments are summed, so `1m1m` is the same as `2m`. The canonical [`Display`] form always
//! starts at the largest unit, `90s` is displayed as `1m30s`.
//!
//! [`Duration`] implements [`Deref`] to [`std::time::Duration`], which gives access to
//! `as_secs`, `as_millis` and friends.

use std::{
    borrow::Cow,
    fmt::Display,
    iter::Peekable,
    num::ParseIntError,
    ops::Deref,
    str::{CharIndices, FromStr},
};

use schemars::{JsonSchema, Schema, SchemaGenerator};
use snafu::{OptionExt, ResultExt, Snafu};
use strum::IntoEnumIterator;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(module)]
pub enum DurationParseError {
    #[snafu(display("invalid input, either empty or contains non-ascii characters"))]
    InvalidInput,

    #[snafu(display("unexpected character {chr:?}"))]
    UnexpectedCharacter { chr: char },

    #[snafu(display("fragment with value {value} has no unit"))]
    NoUnit { value: u64 },

    #[snafu(display("unknown unit {unit:?}, expected one of h, m, s, ms, us or ns"))]
    UnknownUnit { unit: String },

    #[snafu(display("failed to parse fragment value as integer"))]
    ParseInt { source: ParseIntError },

    #[snafu(display("duration overflows the supported range"))]
    Overflow,
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(std::time::Duration);

impl Duration {
    pub const ZERO: Self = Self(std::time::Duration::ZERO);

    pub const fn from_secs(secs: u64) -> Self {
        Self(std::time::Duration::from_secs(secs))
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(std::time::Duration::from_millis(millis))
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use duration_parse_error::*;

        let input = s.trim();
        if input.is_empty() || !input.is_ascii() {
            return InvalidInputSnafu.fail();
        }

        // A bare zero is the only fragment allowed without a unit
        if input == "0" {
            return Ok(Self::ZERO);
        }

        let mut chars = input.char_indices().peekable();
        let mut duration = std::time::Duration::ZERO;

        while let Some(&(_, chr)) = chars.peek() {
            let Some(value) = take_while(input, &mut chars, |c| c.is_ascii_digit()) else {
                return UnexpectedCharacterSnafu { chr }.fail();
            };
            let value = value.parse::<u64>().context(ParseIntSnafu)?;

            let Some(unit) = take_while(input, &mut chars, |c| c.is_ascii_alphabetic()) else {
                return match chars.peek() {
                    Some(&(_, chr)) => UnexpectedCharacterSnafu { chr }.fail(),
                    None => NoUnitSnafu { value }.fail(),
                };
            };
            let unit = unit
                .parse::<DurationUnit>()
                .ok()
                .context(UnknownUnitSnafu { unit })?;

            duration = duration
                .checked_add(unit.of(value).context(OverflowSnafu)?)
                .context(OverflowSnafu)?;
        }

        Ok(Self(duration))
    }
}

/// Consumes the longest run of characters matching `f` and returns it as a slice of `input`.
fn take_while<'a>(
    input: &'a str,
    chars: &mut Peekable<CharIndices<'a>>,
    f: impl Fn(char) -> bool,
) -> Option<&'a str> {
    let &(from, _) = chars.peek()?;
    let mut to = None;

    while let Some((i, c)) = chars.next_if(|&(_, c)| f(c)) {
        to = Some(i + c.len_utf8());
    }

    to.map(|to| &input[from..to])
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_zero() {
            return write!(f, "0{}", DurationUnit::Seconds);
        }

        let mut nanos = self.0.as_nanos();

        for unit in DurationUnit::iter() {
            let whole = nanos / unit.nanos();
            if whole > 0 {
                write!(f, "{whole}{unit}")?;
            }
            nanos %= unit.nanos();
        }

        Ok(())
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self(value)
    }
}

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl JsonSchema for Duration {
    fn schema_name() -> Cow<'static, str> {
        "Duration".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }

    fn inline_schema() -> bool {
        true
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Units supported in a [`Duration`] fragment. The order of variants is the order in which the
/// [`Display`] implementation of [`Duration`] emits them.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
pub enum DurationUnit {
    #[strum(serialize = "h")]
    Hours,

    #[strum(serialize = "m")]
    Minutes,

    #[strum(serialize = "s")]
    Seconds,

    #[strum(serialize = "ms")]
    Milliseconds,

    #[strum(serialize = "us")]
    Microseconds,

    #[strum(serialize = "ns")]
    Nanoseconds,
}

impl DurationUnit {
    fn nanos(self) -> u128 {
        match self {
            Self::Hours => 60 * Self::Minutes.nanos(),
            Self::Minutes => 60 * Self::Seconds.nanos(),
            Self::Seconds => 1000 * Self::Milliseconds.nanos(),
            Self::Milliseconds => 1000 * Self::Microseconds.nanos(),
            Self::Microseconds => 1000,
            Self::Nanoseconds => 1,
        }
    }

    /// Returns `value` units as a [`std::time::Duration`], or [`None`] on overflow.
    fn of(self, value: u64) -> Option<std::time::Duration> {
        let nanos = u128::from(value) * self.nanos();
        let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
        let subsec_nanos = u32::try_from(nanos % NANOS_PER_SEC).ok()?;

        Some(std::time::Duration::new(secs, subsec_nanos))
    }
}
