//! In-memory errno lookup table.
//!
//! Native counterpart of the table the emitted literals are pasted into:
//! maps an error number to its entry and renders `NAME(id): description`.

use crate::entry::ErrorEntry;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// Text returned by [`ErrnoTable::describe`] for ids not in the table.
pub const UNKNOWN: &str = "unknown";

/// Error entries keyed by numeric id.
#[derive(Debug, Clone, Default)]
pub struct ErrnoTable {
    entries: BTreeMap<u64, ErrorEntry>,
}

impl ErrnoTable {
    /// Build a table, keeping the first entry seen for each id.
    ///
    /// Entries whose id does not fit in a `u64` cannot be looked up and are
    /// left out.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ErrorEntry>,
    {
        let mut table = BTreeMap::new();
        for entry in entries {
            let Some(id) = entry.value() else {
                debug!(id = %entry.numeric_id, name = %entry.name, "Errno id out of range");
                continue;
            };
            match table.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(existing) => {
                    debug!(
                        id,
                        kept = %existing.get().name,
                        dropped = %entry.name,
                        "Duplicate errno id"
                    );
                }
            }
        }
        Self { entries: table }
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&ErrorEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.values()
    }

    /// Render `NAME(id): description`, or `unknown` for a missing id.
    #[must_use]
    pub fn describe(&self, id: u64) -> String {
        match self.get(id) {
            Some(entry) => format!("{}({}): {}", entry.name, id, entry.description),
            None => UNKNOWN.to_string(),
        }
    }
}

impl FromIterator<ErrorEntry> for ErrnoTable {
    fn from_iter<T: IntoIterator<Item = ErrorEntry>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}
