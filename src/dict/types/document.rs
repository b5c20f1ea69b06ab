//! The document adapter seam.
//!
//! Parsing the ebook container is not this crate's job. A parser plugs in
//! by implementing [`DocumentOpener`] (path → document) and
//! [`DocumentSource`] (the parsed document). [`MemoryDocument`] is a plain
//! in-memory implementation for embedders that already hold the parsed
//! parts, and for tests.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use super::models::{DocumentMetadata, RawIndexEntry, ResourceBlob};

/// Errors reported by a document adapter while opening a file.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Memory allocation failed while loading the document")]
    Malloc,

    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The document is DRM protected and no (or a wrong) device key was given.
    #[error("Document is encrypted and requires a device serial number")]
    Encrypted,

    #[error("Document data is corrupt: {0}")]
    Corrupt(String),

    /// Valid ebook, but not something this crate can serve (e.g. no
    /// orthographic index, so not a dictionary).
    #[error("Unsupported document: {0}")]
    Unsupported(String),
}

/// A parsed dictionary document.
///
/// Implementations own the markup buffer and the resource store; the index
/// only borrows them.
pub trait DocumentSource: Send + Sync {
    fn metadata(&self) -> &DocumentMetadata;

    /// The orthographic index in file order.
    fn orthographic_entries(&self) -> Box<dyn Iterator<Item = RawIndexEntry> + '_>;

    /// The flat markup buffer that index entries point into.
    fn markup(&self) -> &[u8];

    /// Looks up an embedded resource by its numeric id.
    fn resource_by_id(&self, id: u32) -> Option<&ResourceBlob>;
}

/// Opens documents from disk.
pub trait DocumentOpener: Send + Sync {
    /// # Arguments
    /// * `path` - Path of the dictionary file
    /// * `decryption_key` - Optional device serial used to unlock DRM protected files
    fn open(
        &self,
        path: &Path,
        decryption_key: Option<&str>,
    ) -> std::result::Result<Box<dyn DocumentSource>, DocumentError>;
}

impl<F> DocumentOpener for F
where
    F: Fn(&Path, Option<&str>) -> std::result::Result<Box<dyn DocumentSource>, DocumentError>
        + Send
        + Sync,
{
    fn open(
        &self,
        path: &Path,
        decryption_key: Option<&str>,
    ) -> std::result::Result<Box<dyn DocumentSource>, DocumentError> {
        self(path, decryption_key)
    }
}

/// A fully materialized document held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    metadata: DocumentMetadata,
    entries: Vec<RawIndexEntry>,
    markup: Vec<u8>,
    resources: HashMap<u32, ResourceBlob>,
}

impl MemoryDocument {
    pub fn new(metadata: DocumentMetadata, markup: impl Into<Vec<u8>>) -> Self {
        Self {
            metadata,
            entries: Vec::new(),
            markup: markup.into(),
            resources: HashMap::new(),
        }
    }

    /// Appends an orthographic entry; order of calls is file order.
    pub fn with_entry(mut self, label: impl Into<Vec<u8>>, start_offset: u32, byte_length: u32) -> Self {
        self.entries
            .push(RawIndexEntry::new(label, start_offset, byte_length));
        self
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = RawIndexEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn with_resource(mut self, id: u32, blob: ResourceBlob) -> Self {
        self.resources.insert(id, blob);
        self
    }
}

impl DocumentSource for MemoryDocument {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn orthographic_entries(&self) -> Box<dyn Iterator<Item = RawIndexEntry> + '_> {
        Box::new(self.entries.iter().cloned())
    }

    fn markup(&self) -> &[u8] {
        &self.markup
    }

    fn resource_by_id(&self, id: u32) -> Option<&ResourceBlob> {
        self.resources.get(&id)
    }
}
