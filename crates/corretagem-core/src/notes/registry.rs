//! Notes keyed by identity, so that pages of one note merge.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{BrokerageNote, NoteKey};

/// Notes seen while scanning a document, in first-seen order.
#[derive(Debug, Default)]
pub struct NoteRegistry {
    notes: Vec<BrokerageNote>,
    index: HashMap<NoteKey, usize>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The note for `key`, created empty on first use.
    pub fn get_or_insert(&mut self, key: NoteKey) -> &mut BrokerageNote {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                debug!(
                    "New brokerage note {:?} of {}",
                    key.reference_id, key.reference_date
                );
                self.notes.push(BrokerageNote::new(key));
                self.index.insert(key, self.notes.len() - 1);
                self.notes.len() - 1
            }
        };
        &mut self.notes[position]
    }

    pub fn get(&self, key: &NoteKey) -> Option<&BrokerageNote> {
        self.index.get(key).map(|&position| &self.notes[position])
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn into_notes(self) -> Vec<BrokerageNote> {
        self.notes
    }
}
