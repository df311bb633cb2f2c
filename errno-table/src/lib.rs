//! Generate errno lookup-table initializers.
//!
//! Runs `errno --list`, parses every `NAME ID description` line and renders
//! each entry as `{ ID ,{ "NAME", "description" } },` for pasting into a
//! lookup table in another program.

#![forbid(unsafe_code)]

pub mod emit;
pub mod entry;
pub mod logging;
pub mod source;
pub mod table;

pub use emit::{EmitError, EmitSummary, Emitter, TableLiteral};
pub use entry::{Entries, ErrorEntry, parse_listing};
pub use logging::{LogConfig, LogError, LogFormat, LoggingGuards, init_logging};
pub use source::{CommandSource, ErrnoSource, ListingCommand, SourceError, StaticSource};
pub use table::ErrnoTable;
