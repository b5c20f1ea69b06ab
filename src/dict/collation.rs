//! Presentation order for the vocabulary.
//!
//! Words are ordered with the Unicode Collation Algorithm, tailored to the
//! document's language tag. Case and punctuation are ignored, accents count,
//! and digit runs compare by numeric value. Words that still tie are ordered
//! by their raw text so the order is total and deterministic.

use std::cmp::Ordering;

use icu_collator::{AlternateHandling, CollatorOptions, Numeric, Strength};
use icu_locid::Locale;
use log::{debug, warn};

use crate::dict::types::error::{DictError, Result};

/// Language-aware, punctuation-insensitive, case-insensitive string ordering.
pub struct Collator {
    locale: Locale,
    inner: icu_collator::Collator,
}

impl std::fmt::Debug for Collator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Collator").field("locale", &self.locale).finish()
    }
}

impl Collator {
    /// Builds a collator for a language tag such as `en-US`, `de` or `sv_SE`.
    ///
    /// Tags that do not parse, or that have no tailoring, fall back to the
    /// root collation order.
    pub fn for_language(tag: &str) -> Result<Self> {
        let locale = parse_locale(tag);
        let inner = match icu_collator::Collator::try_new(&(&locale).into(), options()) {
            Ok(inner) => inner,
            Err(e) => {
                warn!("No collation data for '{}': {}; using root order", locale, e);
                icu_collator::Collator::try_new(&Default::default(), options())
                    .map_err(|e| DictError::Collation(e.to_string()))?
            }
        };
        debug!("Collator ready for locale '{}'", locale);
        Ok(Self { locale, inner })
    }

    /// The locale the collator was built for (`und` for the root order).
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.inner.compare(a, b).then_with(|| a.cmp(b))
    }

    /// Sorts words in place.
    pub fn sort(&self, words: &mut [String]) {
        words.sort_by(|a, b| self.compare(a, b));
    }
}

fn options() -> CollatorOptions {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    options.alternate_handling = Some(AlternateHandling::Shifted);
    options.numeric = Some(Numeric::On);
    options
}

/// Parses a BCP 47 tag, accepting POSIX-style `_` separators.
fn parse_locale(tag: &str) -> Locale {
    let normalized = tag.trim().replace('_', "-");
    if normalized.is_empty() {
        return Locale::UND;
    }
    Locale::try_from_bytes(normalized.as_bytes()).unwrap_or_else(|e| {
        warn!("Unrecognized language tag '{}': {}", tag, e);
        Locale::UND
    })
}
