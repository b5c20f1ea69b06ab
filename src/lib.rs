//! # mobidict
//!
//! Lookup engine for Mobipocket (`.mobi`/`.azw`) dictionaries.
//!
//! Given a parsed document (orthographic index, markup buffer and embedded
//! resources, supplied through [`DocumentSource`]), it builds a headword
//! index, renders entries to rich markup, resolves internal links, maps
//! embedded images and serves completion queries.
//!
//! **Note:** Parsing the ebook container itself is left to a
//! [`DocumentOpener`] implementation.
pub mod dict;

// Re-export the main types for convenience
pub use dict::{
    collation::Collator,
    completion::{Completer, Matches},
    index::WordIndex,
    render::{not_found_markup, RICH_TEXT_MARKER},
    resources::{DecodedResource, ResourceMap},
    session::{ActiveDictionary, PendingOpen},
    types::{
        document::{DocumentError, DocumentOpener, DocumentSource, MemoryDocument},
        models::{
            DictionaryEntry, DocumentMetadata, RawIndexEntry, ResourceBlob, ResourceKind,
            TextEncoding,
        },
        options::{CompletionMode, DictOptions, LinkResolution},
    },
    DictError, DictionaryIndex, Result,
};
