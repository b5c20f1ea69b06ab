//! Caller-supplied configuration for opening and querying a dictionary.

use log::warn;

use super::models::TextEncoding;

/// How a link's byte offset is mapped back to a headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkResolution {
    /// Only an entry starting exactly at the offset matches.
    #[default]
    Exact,
    /// The entry whose start is closest to the offset matches, provided it
    /// is at most `tolerance` bytes away.
    Nearest { tolerance: u32 },
}

/// How the completion index filters the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionMode {
    /// Case-insensitive starts-with.
    #[default]
    Prefix,
    /// Case-insensitive unanchored regular expression.
    Substring,
}

/// Options for [`DictionaryIndex`](crate::DictionaryIndex).
#[derive(Debug, Clone, Default)]
pub struct DictOptions {
    /// Device serial number used to unlock DRM protected dictionaries.
    pub decryption_key: Option<String>,
    /// Overrides the encoding declared by the document.
    pub encoding_override: Option<TextEncoding>,
    pub link_resolution: LinkResolution,
    pub completion: CompletionMode,
}

impl DictOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the device serial. Whitespace is stripped, since serials are
    /// usually copied in space-separated groups; a blank serial clears it.
    pub fn with_decryption_key(mut self, serial: &str) -> Self {
        let serial: String = serial.chars().filter(|c| !c.is_whitespace()).collect();
        self.decryption_key = (!serial.is_empty()).then_some(serial);
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding_override = Some(encoding);
        self
    }

    /// Sets the encoding override from a label. Unknown labels are ignored
    /// and the document's own encoding stays in effect.
    pub fn with_encoding_label(mut self, label: &str) -> Self {
        match TextEncoding::from_label(label) {
            Some(encoding) => self.encoding_override = Some(encoding),
            None => warn!("Ignoring unsupported encoding override '{}'", label),
        }
        self
    }

    pub fn with_link_resolution(mut self, mode: LinkResolution) -> Self {
        self.link_resolution = mode;
        self
    }

    pub fn with_completion(mut self, mode: CompletionMode) -> Self {
        self.completion = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_whitespace_is_stripped() {
        let options = DictOptions::new().with_decryption_key("B0 0A 1234 ");
        assert_eq!(options.decryption_key.as_deref(), Some("B00A1234"));
        assert!(DictOptions::new().with_decryption_key("   ").decryption_key.is_none());
    }

    #[test]
    fn unknown_encoding_label_keeps_document_encoding() {
        let options = DictOptions::new().with_encoding_label("shift_jis");
        assert_eq!(options.encoding_override, None);
        let options = DictOptions::new().with_encoding_label("windows-1252");
        assert_eq!(options.encoding_override, Some(TextEncoding::Cp1252));
    }
}
