//! Parsing of `errno --list` output.
//!
//! Each listing line carries a symbolic name, the numeric error code and a
//! free-text description, separated by spaces or tabs:
//!
//! ```text
//! ENOENT          2 No such file or directory
//! ```
//!
//! Lines that do not have this shape (blank lines, headers) are skipped.

use std::fmt;
use tracing::trace;

/// One error code parsed from a single listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Decimal digits of the error code exactly as listed (`2` for `ENOENT`).
    ///
    /// Kept as text so leading zeros and values wider than any integer type
    /// are reproduced unchanged.
    pub numeric_id: String,
    /// Symbolic identifier such as `ENOENT`.
    pub name: String,
    /// Human-readable description, verbatim from the listing.
    pub description: String,
}

impl ErrorEntry {
    pub fn new(
        numeric_id: impl ToString,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            numeric_id: numeric_id.to_string(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Parse one listing line into an entry.
    ///
    /// The line must contain an identifier, blanks, a decimal id, blanks and a
    /// non-empty description running to the end of the line. The match is not
    /// anchored: leading blanks are skipped and, if the first identifier on the
    /// line does not start a valid entry, later identifiers are tried.
    ///
    /// Returns `None` for lines that do not match.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut cursor = 0;
        while let Some(start) = next_word_start(line, cursor) {
            let end = word_end(line, start);
            if let Some(entry) = match_fields(&line[start..end], &line[end..]) {
                return Some(entry);
            }
            cursor = end;
        }

        None
    }

    /// Value of the error code, or `None` if it does not fit in a `u64`.
    pub fn value(&self) -> Option<u64> {
        self.numeric_id.parse().ok()
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.name, self.numeric_id, self.description)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn next_word_start(line: &str, from: usize) -> Option<usize> {
    line[from..]
        .char_indices()
        .find(|&(_, c)| is_word_char(c))
        .map(|(i, _)| from + i)
}

fn word_end(line: &str, start: usize) -> usize {
    line[start..]
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(line.len(), |(i, _)| start + i)
}

/// Match `blanks digits blanks description` after an identifier.
fn match_fields(name: &str, rest: &str) -> Option<ErrorEntry> {
    let after_gap = rest.trim_start_matches(is_blank);
    if after_gap.len() == rest.len() {
        return None;
    }

    let digits_len = after_gap.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let (digits, tail) = after_gap.split_at(digits_len);

    let description = take_description(tail)?;

    Some(ErrorEntry::new(digits, name, description))
}

/// Split off the blanks after the id and return the description.
///
/// When only blanks follow the id, the last one becomes the description as
/// long as at least one remains as separator.
fn take_description(tail: &str) -> Option<&str> {
    let blanks = tail.len() - tail.trim_start_matches(is_blank).len();
    if blanks == 0 {
        return None;
    }

    let rest = &tail[blanks..];
    if !rest.is_empty() {
        Some(rest)
    } else if blanks >= 2 {
        Some(&tail[blanks - 1..])
    } else {
        None
    }
}

/// Lines split on `\n`, `\r\n` or a lone `\r`.
#[derive(Debug, Clone)]
struct ListingLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for ListingLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(pos) = self.rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut self.rest));
        };

        let line = &self.rest[..pos];
        let break_len = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[pos + break_len..];
        Some(line)
    }
}

/// Lazy iterator over the entries of a listing, in listing order.
///
/// Created by [`parse_listing`]. Non-empty lines that do not match are
/// counted in [`Entries::skipped`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    lines: ListingLines<'a>,
    line_no: usize,
    skipped: usize,
}

impl Entries<'_> {
    /// Number of non-blank lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Entries<'_> {
    type Item = ErrorEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            if let Some(entry) = ErrorEntry::parse_line(line) {
                return Some(entry);
            }

            if !line.trim().is_empty() {
                self.skipped += 1;
                trace!(line_no = self.line_no, line, "skipping unrecognized listing line");
            }
        }
    }
}

/// Parse a whole listing buffer.
pub fn parse_listing(text: &str) -> Entries<'_> {
    Entries {
        lines: ListingLines { rest: text },
        line_no: 0,
        skipped: 0,
    }
}
