//! Reference-entry index for joining items to their acceptable names.
//!
//! The playable catalog and the reference master arrive already parsed from
//! the external data layer; this module builds the `ref_id` join index once
//! so reveals are a map lookup instead of a scan. A `ref_id` with no entry
//! is a valid, handled state, not an error.

use crate::error::{QuizError, Result};
use crate::types::ReferenceEntry;
use std::collections::HashMap;

/// Reference entries keyed by `ref_id`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: HashMap<String, ReferenceEntry>,
}

impl ReferenceIndex {
    /// Build the index, rejecting duplicate `ref_id`s.
    pub fn new(entries: Vec<ReferenceEntry>) -> Result<Self> {
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            if map.contains_key(&entry.ref_id) {
                return Err(QuizError::DuplicateReference {
                    ref_id: entry.ref_id,
                });
            }
            map.insert(entry.ref_id.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    pub fn lookup(&self, ref_id: &str) -> Option<&ReferenceEntry> {
        self.entries.get(ref_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
