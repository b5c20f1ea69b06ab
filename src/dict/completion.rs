//! Incremental word completion over the collated vocabulary.

use std::sync::Arc;

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::dict::types::error::{DictError, Result};
use crate::dict::types::options::CompletionMode;

/// Filters a fixed vocabulary against the text typed so far.
///
/// Matches always keep the vocabulary's order; the completer never sorts.
/// The vocabulary is shared, so cloning a completer or querying it never
/// copies the words.
#[derive(Debug, Clone)]
pub struct Completer {
    words: Arc<[String]>,
    /// Lowercased `words` for prefix matching.
    folded: Arc<[String]>,
    mode: CompletionMode,
    prefix: String,
    selection: Selection,
}

/// Which words the last query matched.
#[derive(Debug, Clone)]
enum Selection {
    All,
    Indices(Vec<usize>),
}

impl Completer {
    pub fn new(words: impl Into<Arc<[String]>>, mode: CompletionMode) -> Self {
        let words = words.into();
        Self {
            folded: fold(&words),
            words,
            mode,
            prefix: String::new(),
            selection: Selection::All,
        }
    }

    /// Replaces the vocabulary and resets the current query.
    pub fn set_words(&mut self, words: impl Into<Arc<[String]>>) {
        let words = words.into();
        self.folded = fold(&words);
        self.words = words;
        self.selection = Selection::All;
        self.prefix.clear();
    }

    pub fn set_mode(&mut self, mode: CompletionMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> CompletionMode {
        self.mode
    }

    /// Filters the vocabulary for `prefix` and returns the matches.
    ///
    /// An empty prefix yields the full vocabulary. In substring mode an
    /// invalid pattern yields no matches.
    pub fn set_prefix(&mut self, prefix: &str) -> Matches<'_> {
        self.prefix = prefix.to_owned();
        self.selection = if prefix.is_empty() {
            Selection::All
        } else {
            let indices = match self.mode {
                CompletionMode::Prefix => {
                    let lower = prefix.to_lowercase();
                    self.select(|_, folded| folded.starts_with(&lower))
                }
                CompletionMode::Substring => match substring_pattern(prefix) {
                    Ok(pattern) => self.select(|word, _| pattern.is_match(word)),
                    Err(e) => {
                        debug!("{}", e);
                        Vec::new()
                    }
                },
            };
            Selection::Indices(indices)
        };
        self.matches()
    }

    /// Matches of the last query.
    pub fn matches(&self) -> Matches<'_> {
        Matches {
            words: &self.words,
            indices: match &self.selection {
                Selection::All => None,
                Selection::Indices(indices) => Some(indices.as_slice()),
            },
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    fn select(&self, keep: impl Fn(&str, &str) -> bool) -> Vec<usize> {
        self.words
            .iter()
            .zip(self.folded.iter())
            .enumerate()
            .filter(|(_, (word, folded))| keep(word.as_str(), folded.as_str()))
            .map(|(i, _)| i)
            .collect()
    }
}

fn fold(words: &[String]) -> Arc<[String]> {
    words.iter().map(|word| word.to_lowercase()).collect()
}

/// A borrowed view of the words matched by the last query.
#[derive(Clone, Copy)]
pub struct Matches<'a> {
    words: &'a [String],
    /// `None` means every word matched.
    indices: Option<&'a [usize]>,
}

impl<'a> Matches<'a> {
    pub fn len(&self) -> usize {
        self.indices.map_or(self.words.len(), <[usize]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, position: usize) -> Option<&'a str> {
        let index = match self.indices {
            Some(indices) => *indices.get(position)?,
            None => position,
        };
        self.words.get(index).map(String::as_str)
    }

    /// Matched words in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let Matches { words, indices } = *self;
        (0..self.len()).map(move |position| {
            let index = indices.map_or(position, |indices| indices[position]);
            words[index].as_str()
        })
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

impl std::fmt::Debug for Matches<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<S: AsRef<str>> PartialEq<[S]> for Matches<'_> {
    fn eq(&self, other: &[S]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for Matches<'_> {
    fn eq(&self, other: &[S; N]) -> bool {
        *self == other[..]
    }
}

impl<S: AsRef<str>> PartialEq<&[S]> for Matches<'_> {
    fn eq(&self, other: &&[S]) -> bool {
        *self == **other
    }
}

/// Compiles a case-insensitive, unanchored completion filter.
pub fn substring_pattern(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| DictError::InvalidCompletionPattern(e.to_string()))
}
