//! The per-file transform: find the header date, propagate it into
//! every `DateTime` field, pass everything else through untouched

use crate::date::{find_date_token, leading_date_token, CanonicalDate};
use crate::reader::{split_line_ending, MdocLines};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

/// Where a file's transform currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// No header date seen yet; every line is checked for one
    SearchingForHeader,
    /// Header date found; only `DateTime` lines are rewritten from here on
    CanonicalDateSet(CanonicalDate),
}

impl ScanState {
    pub fn canonical_date(&self) -> Option<&CanonicalDate> {
        match self {
            ScanState::SearchingForHeader => None,
            ScanState::CanonicalDateSet(date) => Some(date),
        }
    }
}

/// What happened to a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// The header line, with its date token replaced by the canonical date
    Header { text: String, token: String },
    /// A `DateTime` line whose date was replaced
    DateTime { text: String, previous: String },
    /// A `DateTime` line with no date to replace
    Malformed,
    /// Any other line
    Unchanged,
}

/// Advance the scan by one line of content (no terminator)
///
/// The state moves from `SearchingForHeader` to `CanonicalDateSet` at most
/// once, on the first line holding a date token. After that, header matching
/// is never attempted again.
pub fn advance(state: ScanState, content: &str, marker: &str) -> (ScanState, LineEdit) {
    match state {
        ScanState::SearchingForHeader => match find_date_token(content) {
            Some(token) => {
                let date = token.canonicalize();
                let text = format!(
                    "{}{}{}",
                    &content[..token.span.start],
                    date,
                    &content[token.span.end..]
                );
                let edit = LineEdit::Header { text, token: token.as_matched(content).to_string() };
                (ScanState::CanonicalDateSet(date), edit)
            }
            None => (ScanState::SearchingForHeader, LineEdit::Unchanged),
        },
        ScanState::CanonicalDateSet(date) => {
            let edit = match datetime_field(content, marker) {
                DateTimeField::NotDateTime => LineEdit::Unchanged,
                DateTimeField::Missing => LineEdit::Malformed,
                DateTimeField::Value(range) => LineEdit::DateTime {
                    text: format!(
                        "{}{}{}",
                        &content[..range.start],
                        date,
                        &content[range.end..]
                    ),
                    previous: content[range].to_string(),
                },
            };
            (ScanState::CanonicalDateSet(date), edit)
        }
    }
}

enum DateTimeField {
    NotDateTime,
    Missing,
    Value(std::ops::Range<usize>),
}

/// Locate the existing date inside a `DateTime = <date> <time>` line
///
/// A line is a `DateTime` line when its label is exactly `marker`, followed by
/// whitespace or `=`. The date is a date-shaped token at the start of the
/// value after `=`; any other value (a bare time, free text) counts as missing.
fn datetime_field(content: &str, marker: &str) -> DateTimeField {
    let label_start = content.len() - content.trim_start().len();
    let Some(after_marker) = content[label_start..].strip_prefix(marker) else {
        return DateTimeField::NotDateTime;
    };
    match after_marker.chars().next() {
        Some(c) if c == '=' || c.is_whitespace() => {}
        None => return DateTimeField::Missing,
        Some(_) => return DateTimeField::NotDateTime,
    }

    let Some(eq) = after_marker.find('=') else {
        return DateTimeField::Missing;
    };
    if !after_marker[..eq].trim().is_empty() {
        return DateTimeField::NotDateTime;
    }

    let value_offset = content.len() - after_marker.len() + eq + 1;
    let value = &content[value_offset..];
    let leading = value.len() - value.trim_start().len();
    let start = value_offset + leading;
    match leading_date_token(&content[start..]) {
        Some(token) => DateTimeField::Value(start + token.span.start..start + token.span.end),
        None => DateTimeField::Missing,
    }
}

/// Result of transforming one file's lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    /// Date propagated to the `DateTime` lines, if a header date was found
    pub canonical_date: Option<CanonicalDate>,
    /// 1-based number of the header line
    pub header_line: Option<usize>,
    /// Header token as it appeared before canonicalization
    pub header_token: Option<String>,
    pub total_lines: usize,
    pub datetime_lines: usize,
    /// Lines whose text actually differs from the input
    pub changed_lines: usize,
    /// Dates found in `DateTime` lines before rewriting
    pub previous_dates: BTreeSet<String>,
    /// 1-based numbers of `DateTime` lines that had no date to replace
    pub malformed_lines: Vec<usize>,
}

impl RewriteReport {
    pub fn found_header(&self) -> bool {
        self.canonical_date.is_some()
    }

    /// True when every `DateTime` line already held the canonical date
    pub fn is_consistent(&self) -> bool {
        match &self.canonical_date {
            Some(date) => self.previous_dates.iter().all(|d| d == date.as_str()),
            None => self.previous_dates.len() <= 1,
        }
    }
}

/// Stateful wrapper around [`advance`] that records a [`RewriteReport`]
#[derive(Debug)]
pub struct LineRewriter {
    marker: String,
    state: ScanState,
    report: RewriteReport,
}

impl LineRewriter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            state: ScanState::SearchingForHeader,
            report: RewriteReport::default(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Transform one raw line, terminator included
    pub fn rewrite_line(&mut self, raw: &str) -> String {
        let (content, ending) = split_line_ending(raw);
        self.report.total_lines += 1;
        let line_no = self.report.total_lines;

        let state = std::mem::replace(&mut self.state, ScanState::SearchingForHeader);
        let (state, edit) = advance(state, content, &self.marker);
        self.state = state;

        let new_content = match edit {
            LineEdit::Header { text, token } => {
                self.report.header_line = Some(line_no);
                self.report.header_token = Some(token);
                self.report.canonical_date = self.state.canonical_date().cloned();
                text
            }
            LineEdit::DateTime { text, previous } => {
                self.report.datetime_lines += 1;
                self.report.previous_dates.insert(previous);
                text
            }
            LineEdit::Malformed => {
                self.report.datetime_lines += 1;
                self.report.malformed_lines.push(line_no);
                return raw.to_string();
            }
            LineEdit::Unchanged => return raw.to_string(),
        };

        if new_content != content {
            self.report.changed_lines += 1;
        }
        format!("{}{}", new_content, ending)
    }

    pub fn finish(self) -> RewriteReport {
        self.report
    }
}

/// Stream lines from `reader` through the transform into `writer`
pub fn rewrite_lines<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    marker: &str,
) -> io::Result<RewriteReport> {
    rewrite_line_iter(MdocLines::new(reader), writer, marker)
}

/// Drive the transform from an already opened line source
pub fn rewrite_line_iter<I, W>(lines: I, mut writer: W, marker: &str) -> io::Result<RewriteReport>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut rewriter = LineRewriter::new(marker);
    for line in lines {
        let line = line?;
        writer.write_all(rewriter.rewrite_line(&line).as_bytes())?;
    }
    writer.flush()?;
    Ok(rewriter.finish())
}

/// Transform a whole in-memory document
pub fn rewrite_str(content: &str, marker: &str) -> (String, RewriteReport) {
    let mut rewriter = LineRewriter::new(marker);
    let output: String = content.split_inclusive('\n').map(|l| rewriter.rewrite_line(l)).collect();
    (output, rewriter.finish())
}
