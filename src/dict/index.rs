//! # Headword Index
//!
//! Turns the document's orthographic index into a headword → fragments map.
//!
//! ## Rules
//! 1.  **Filter**: entries at offset 0 or with zero length carry no
//!     definition and are dropped.
//! 2.  **Decode**: labels are decoded with the document encoding.
//! 3.  **Group**: identical labels (case-sensitive) accumulate fragments in
//!     file order, so homographs keep every definition.
//!
//! Headwords keep the order in which they were first seen. That order is
//! the "index order" used for tie-breaking in link resolution.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info, trace};

use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::{DictionaryEntry, RawIndexEntry, TextEncoding};

/// Immutable mapping from headword to its definition fragments.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    /// `(headword, fragments)` in first-seen order.
    groups: Vec<(String, Vec<DictionaryEntry>)>,
    slots: HashMap<String, usize>,
    skipped: usize,
}

impl WordIndex {
    /// Builds the index from raw entries in file order.
    ///
    /// # Errors
    /// Returns [`DictError::CorruptIndex`] if no entry survives filtering.
    pub fn build<I>(raw_entries: I, encoding: TextEncoding) -> Result<Self>
    where
        I: IntoIterator<Item = RawIndexEntry>,
    {
        let started = Instant::now();
        let mut index = WordIndex::default();
        let mut homographs: Vec<String> = Vec::new();

        for raw in raw_entries {
            if !raw.has_definition() {
                trace!(
                    "Skipping entry without definition: offset={}, length={}",
                    raw.start_offset, raw.byte_length
                );
                index.skipped += 1;
                continue;
            }

            let label = decode_label(&raw.label, encoding);
            let entry = DictionaryEntry::from(&raw);

            match index.slots.get(&label) {
                Some(&slot) => {
                    let fragments = &mut index.groups[slot].1;
                    if fragments.len() == 1 {
                        homographs.push(label);
                    }
                    fragments.push(entry);
                }
                None => {
                    index.slots.insert(label.clone(), index.groups.len());
                    index.groups.push((label, vec![entry]));
                }
            }
        }

        if index.groups.is_empty() {
            return Err(DictError::CorruptIndex);
        }

        info!(
            "Word index built: {} headwords, {} fragments, {} entries skipped in {:?}",
            index.len(),
            index.fragment_count(),
            index.skipped,
            started.elapsed()
        );
        if !homographs.is_empty() {
            debug!("Headwords with multiple entries: {:?}", homographs);
        }

        Ok(index)
    }

    /// Number of distinct headwords.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of fragments across all headwords.
    pub fn fragment_count(&self) -> usize {
        self.groups.iter().map(|(_, fragments)| fragments.len()).sum()
    }

    /// Raw entries dropped during construction.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn contains(&self, word: &str) -> bool {
        self.slots.contains_key(word)
    }

    /// Fragments of `word` in file order.
    pub fn get(&self, word: &str) -> Option<&[DictionaryEntry]> {
        self.slots
            .get(word)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Headwords in first-seen order.
    pub fn headwords(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|(word, _)| word.as_str())
    }

    /// `(headword, fragments)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DictionaryEntry])> + '_ {
        self.groups
            .iter()
            .map(|(word, fragments)| (word.as_str(), fragments.as_slice()))
    }
}

/// Decodes an index label, dropping the NUL padding some generators leave behind.
fn decode_label(bytes: &[u8], encoding: TextEncoding) -> String {
    let text = encoding.decode(bytes);
    match text.find('\0') {
        Some(end) => text[..end].to_owned(),
        None => text,
    }
}
