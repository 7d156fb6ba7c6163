//! Header date token recognition and canonicalization
//!
//! The acquisition header of an MDOC file records its date once, as a
//! `day-month-year` shaped token such as `05-Jan-23`. This module finds that
//! token inside an arbitrary line and rebuilds it into the [`CanonicalDate`]
//! that gets propagated to every `DateTime` field.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

/// Separator placed between the parts of a canonical date
pub const DATE_SEPARATOR: char = '-';

const DATE_TOKEN_PATTERN: &str = r"(\w{2,})-(\w+)-(\w{2,})";

fn date_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_TOKEN_PATTERN).expect("date token pattern is a valid regex"))
}

fn leading_date_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^{}", DATE_TOKEN_PATTERN)).expect("date token pattern is a valid regex")
    })
}

/// A `day-month-year` shaped token found inside a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken<'a> {
    pub day: &'a str,
    pub month_unit: &'a str,
    pub year_fragment: &'a str,
    /// Byte range of the whole token within the searched line
    pub span: Range<usize>,
}

impl<'a> DateToken<'a> {
    /// The token exactly as it appears in the line
    pub fn as_matched<'l>(&self, line: &'l str) -> &'l str {
        &line[self.span.clone()]
    }

    /// Rebuild the token as `day-month-YY`, keeping only the last two
    /// characters of the year fragment
    pub fn canonicalize(&self) -> CanonicalDate {
        let year = last_chars(self.year_fragment, 2);
        CanonicalDate(format!(
            "{}{sep}{}{sep}{}",
            self.day,
            self.month_unit,
            year,
            sep = DATE_SEPARATOR
        ))
    }
}

/// Find the leftmost date-shaped token in `line`
pub fn find_date_token(line: &str) -> Option<DateToken<'_>> {
    token_from_captures(date_token_regex().captures(line)?)
}

/// Match a date-shaped token at the very start of `value`
///
/// The token must be a whole word: it has to end at whitespace or at the end
/// of `value`, so `04-Jan-22` matches but `14:30:05` and `04-Jan-22:x` don't.
pub fn leading_date_token(value: &str) -> Option<DateToken<'_>> {
    let token = token_from_captures(leading_date_token_regex().captures(value)?)?;
    match value[token.span.end..].chars().next() {
        None => Some(token),
        Some(c) if c.is_whitespace() => Some(token),
        Some(_) => None,
    }
}

fn token_from_captures(caps: regex::Captures<'_>) -> Option<DateToken<'_>> {
    let whole = caps.get(0)?;
    Some(DateToken {
        day: caps.get(1)?.as_str(),
        month_unit: caps.get(2)?.as_str(),
        year_fragment: caps.get(3)?.as_str(),
        span: whole.range(),
    })
}

/// The single date propagated to every `DateTime` field of one file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalDate(String);

impl CanonicalDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn last_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    match s.char_indices().nth(count - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}
