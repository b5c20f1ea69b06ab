//! The opened dictionary: headword index, collated vocabulary and lookups.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use super::collation::Collator;
use super::completion::Completer;
use super::index::WordIndex;
use super::links;
use super::render;
use super::resources::{self, ResourceMap};
use super::types::document::{DocumentOpener, DocumentSource};
use super::types::error::{DictError, Result};
use super::types::models::{DictionaryEntry, DocumentMetadata, TextEncoding};
use super::types::options::DictOptions;

/// An opened dictionary, ready for lookups.
///
/// Owns the parsed document and the headword index built from it. Both are
/// immutable after construction, so a `DictionaryIndex` can be shared across
/// threads without locking.
pub struct DictionaryIndex {
    source: Box<dyn DocumentSource>,
    encoding: TextEncoding,
    index: WordIndex,
    /// Template over the collated vocabulary; handed out by [`completer`](Self::completer).
    completer: Completer,
    options: DictOptions,
}

impl std::fmt::Debug for DictionaryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("DictionaryIndex")
            .field("metadata", self.source.metadata())
            .field("encoding", &self.encoding)
            .field("headwords", &self.index.len())
            .field("options", &self.options)
            .finish()
    }
}

impl DictionaryIndex {
    /// Opens a dictionary file through `opener` and indexes it.
    ///
    /// This is the slow part of the lifecycle; run it off the interactive
    /// path (see [`ActiveDictionary`](crate::ActiveDictionary)).
    ///
    /// # Errors
    /// Returns an error if:
    /// - The adapter fails to open the file (propagated as [`DictError::Document`])
    /// - No usable headword is found ([`DictError::CorruptIndex`])
    pub fn open(opener: &dyn DocumentOpener, path: impl AsRef<Path>, options: DictOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening dictionary: {}", path.display());
        let started = Instant::now();

        let source = opener.open(path, options.decryption_key.as_deref())?;
        let dictionary = Self::from_source(source, options)?;

        info!(
            "Dictionary '{}' loaded in {:?}",
            dictionary.title(),
            started.elapsed()
        );
        Ok(dictionary)
    }

    /// Indexes an already parsed document.
    pub fn from_source(source: Box<dyn DocumentSource>, options: DictOptions) -> Result<Self> {
        let metadata = source.metadata();

        let encoding = options.encoding_override.unwrap_or(metadata.encoding);
        if encoding != metadata.encoding {
            info!(
                "Text encoding overridden: document='{}', final='{}'",
                metadata.encoding.name(),
                encoding.name()
            );
        }

        let index = WordIndex::build(source.orthographic_entries(), encoding)?;

        let mut words: Vec<String> = index.headwords().map(str::to_owned).collect();
        Collator::for_language(&metadata.language)?.sort(&mut words);
        debug!(
            "Vocabulary of {} words collated for language '{}'",
            words.len(),
            metadata.language
        );

        let completer = Completer::new(words, options.completion);
        Ok(Self {
            source,
            encoding,
            index,
            completer,
            options,
        })
    }

    pub fn title(&self) -> &str {
        &self.metadata().title
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        self.source.metadata()
    }

    /// The encoding in effect, after any override.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn options(&self) -> &DictOptions {
        &self.options
    }

    /// All headwords in collated order.
    pub fn words(&self) -> &[String] {
        self.completer.words()
    }

    pub fn word_index(&self) -> &WordIndex {
        &self.index
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn entries(&self, word: &str) -> Option<&[DictionaryEntry]> {
        self.index.get(word)
    }

    /// Renders the full definition of `word` as rich markup.
    pub fn render(&self, word: &str) -> Result<String> {
        let entries = self
            .index
            .get(word)
            .ok_or_else(|| DictError::NotFound(word.to_owned()))?;
        Ok(render::render_entries(self.source.markup(), entries, self.encoding))
    }

    /// Maps a markup byte offset back to the headword defined there.
    pub fn resolve(&self, offset: u32) -> Result<&str> {
        links::resolve_offset(&self.index, offset, self.options.link_resolution)
            .ok_or_else(|| DictError::NotFound(format!("offset {}", offset)))
    }

    /// Resolves a clicked link target (the value of a rewritten `href=`).
    pub fn resolve_link(&self, link: &str) -> Result<&str> {
        let offset = links::parse_link_target(link)
            .ok_or_else(|| DictError::NotFound(format!("link {}", link)))?;
        self.resolve(offset)
    }

    /// Fetches and decodes the resources referenced by rendered markup.
    pub fn extract_resources(&self, markup: &str) -> ResourceMap {
        resources::extract_resources(self.source.as_ref(), markup)
    }

    /// A completer over the collated vocabulary, using the configured mode.
    ///
    /// The vocabulary is shared with this dictionary, not copied.
    pub fn completer(&self) -> Completer {
        self.completer.clone()
    }
}
