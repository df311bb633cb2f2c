//! Rendering of error entries as lookup-table initializers.

use crate::entry::{ErrorEntry, parse_listing};
use crate::source::{ErrnoSource, SourceError};
use std::fmt;
use std::io::Write;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while emitting the table.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to write table entry: {0}")]
    Write(#[from] std::io::Error),
}

/// Table-initializer literal for one entry.
///
/// Renders `{ 2 ,{ "ENOENT", "No such file or directory" } },`. The name and
/// description are inserted verbatim; embedded quotes are not escaped.
#[derive(Debug, Clone, Copy)]
pub struct TableLiteral<'a>(pub &'a ErrorEntry);

impl fmt::Display for TableLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ErrorEntry {
            numeric_id,
            name,
            description,
        } = self.0;
        write!(f, "{{ {numeric_id} ,{{ \"{name}\", \"{description}\" }} }},")
    }
}

/// Counts from one emitter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Literals written.
    pub emitted: usize,
    /// Non-blank listing lines that did not parse.
    pub skipped: usize,
}

/// Lists error codes from a source and writes one literal per entry.
#[derive(Debug, Clone)]
pub struct Emitter<S> {
    source: S,
}

impl<S: ErrnoSource> Emitter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run the whole pipeline once, writing to `out`.
    ///
    /// Entries are written in listing order without sorting or deduplication.
    pub fn emit<W: Write>(&self, out: &mut W) -> Result<EmitSummary, EmitError> {
        let listing = self.source.list_error_codes()?;

        let mut entries = parse_listing(&listing);
        let mut emitted = 0;
        for entry in entries.by_ref() {
            writeln!(out, "{}", TableLiteral(&entry))?;
            emitted += 1;
        }
        out.flush()?;

        let summary = EmitSummary {
            emitted,
            skipped: entries.skipped(),
        };
        debug!(emitted = summary.emitted, skipped = summary.skipped, "Table emitted");
        if summary.emitted == 0 {
            warn!("Listing contained no error codes");
        }

        Ok(summary)
    }
}
