//! Entry rendering: fragments → displayable markup.
//!
//! Mobipocket markup addresses other entries with `filepos=` attributes and
//! embedded images with `recindex=` (plus the `hirecindex=`/`lowrecindex=`
//! spellings). Those are rewritten to plain `href=`/`src=` attributes so a
//! markup viewer hands them back to us as ordinary link and image URLs.

use log::warn;
use quick_xml::escape::escape;

use crate::dict::types::models::{DictionaryEntry, TextEncoding};

/// Prefix that makes the presentation layer treat the text as rich markup.
pub const RICH_TEXT_MARKER: &str = "<qt>";

/// Literal attribute rewrites, applied in this order. The longer
/// `hirecindex=`/`lowrecindex=` spellings go before `recindex=`, which is a
/// suffix of both.
const MARKER_REWRITES: &[(&str, &str)] = &[
    ("filepos=", "href="),
    ("hirecindex=", "src="),
    ("lowrecindex=", "src="),
    ("recindex=", "src="),
];

/// Decodes one fragment from the markup buffer.
///
/// Returns `None` if the fragment lies outside the buffer.
pub fn decode_fragment(
    markup: &[u8],
    entry: &DictionaryEntry,
    encoding: TextEncoding,
) -> Option<String> {
    let bytes = entry.range().and_then(|range| markup.get(range))?;
    Some(encoding.decode(bytes))
}

/// Renders a headword's fragments into a single markup document.
///
/// Fragments are decoded and concatenated in the given order, markers are
/// rewritten over the whole text, and the rich-text marker is prepended.
/// Out-of-bounds fragments are skipped.
pub fn render_entries(markup: &[u8], entries: &[DictionaryEntry], encoding: TextEncoding) -> String {
    let mut text = String::new();
    for entry in entries {
        match decode_fragment(markup, entry, encoding) {
            Some(fragment) => text.push_str(&fragment),
            None => warn!(
                "Fragment [{}..{}] is out of bounds for markup of {} bytes",
                entry.start_offset,
                entry.end_offset(),
                markup.len()
            ),
        }
    }

    let mut result = rewrite_markers(&text);
    result.insert_str(0, RICH_TEXT_MARKER);
    result
}

/// Rewrites internal link and resource markers to `href=`/`src=`.
pub fn rewrite_markers(text: &str) -> String {
    MARKER_REWRITES
        .iter()
        .fold(text.to_owned(), |acc, (from, to)| acc.replace(from, to))
}

/// Fallback document shown when a looked-up word is not in the dictionary.
pub fn not_found_markup(word: &str) -> String {
    format!(
        "{}<br><br><center><font size='+6'>&#129300;</font><br><br>\
         The word <b>\"{}\"</b> is not found in the dictionary.</center>",
        RICH_TEXT_MARKER,
        escape(word)
    )
}
