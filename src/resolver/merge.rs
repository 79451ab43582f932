use std::collections::btree_map::Entry;
use std::path::PathBuf;

use crate::error::{EnqueuesError, Result};
use crate::models::{EntryKey, EntryMap};

/// Merge per-role partial maps into one entry map.
///
/// A key produced twice aborts the merge; no partial map is returned.
pub fn merge_entries<I, P>(partials: I) -> Result<EntryMap>
where
  I: IntoIterator<Item = P>,
  P: IntoIterator<Item = (EntryKey, PathBuf)>,
{
  let mut merged = EntryMap::new();
  for partial in partials {
    for (key, path) in partial {
      match merged.entry(key) {
        Entry::Vacant(slot) => {
          slot.insert(path);
        }
        Entry::Occupied(slot) => {
          return Err(EnqueuesError::DuplicateEntryKey {
            key: slot.key().to_string(),
            first: slot.get().clone(),
            second: path,
          });
        }
      }
    }
  }
  Ok(merged)
}
