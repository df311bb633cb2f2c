//! Sources of the raw error-code listing.
//!
//! The emitter only needs the listing text, so the external `errno` utility
//! sits behind [`ErrnoSource`] and can be swapped for a fixed buffer.

use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::{debug, info};

/// Program invoked by [`ListingCommand::default`].
pub const DEFAULT_PROGRAM: &str = "errno";

/// Argument that makes `errno` print every known code.
pub const DEFAULT_LIST_FLAG: &str = "--list";

/// Errors that can occur while obtaining the listing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Result type for listing operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Anything that can produce an error-code listing.
pub trait ErrnoSource {
    /// Return the whole listing as one text buffer, one entry per line.
    fn list_error_codes(&self) -> Result<String>;
}

impl<S: ErrnoSource + ?Sized> ErrnoSource for &S {
    fn list_error_codes(&self) -> Result<String> {
        (**self).list_error_codes()
    }
}

/// Program and arguments used to obtain the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ListingCommand {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ListingCommand {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, [DEFAULT_LIST_FLAG])
    }
}

/// Listing produced by running an external command to completion.
#[derive(Debug, Clone, Default)]
pub struct CommandSource {
    command: ListingCommand,
}

impl CommandSource {
    pub fn new(command: ListingCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ListingCommand {
        &self.command
    }
}

impl ErrnoSource for CommandSource {
    fn list_error_codes(&self) -> Result<String> {
        let ListingCommand { program, args } = &self.command;
        debug!(%program, ?args, "Running listing command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| SourceError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::Failed {
                program: program.clone(),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        let listing = String::from_utf8_lossy(&output.stdout).into_owned();
        info!(
            %program,
            bytes = listing.len(),
            lines = listing.lines().count(),
            "Listing command finished"
        );
        Ok(listing)
    }
}

/// Fixed listing text, for tests and for callers that already hold the output.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    listing: String,
}

impl StaticSource {
    pub fn new(listing: impl Into<String>) -> Self {
        Self {
            listing: listing.into(),
        }
    }

    /// Build a source from individual lines.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut listing = String::new();
        for line in lines {
            listing.push_str(line.as_ref());
            listing.push('\n');
        }
        Self { listing }
    }
}

impl ErrnoSource for StaticSource {
    fn list_error_codes(&self) -> Result<String> {
        Ok(self.listing.clone())
    }
}
