//! Core data structures shared by the index, renderer and resource mapper.
//!
//! This module defines:
//! - Text encodings and document metadata
//! - Raw and normalized orthographic index entries
//! - Embedded resource blobs and their declared kinds

use std::ops::Range;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use image::ImageFormat;

/// Text encoding declared by a dictionary document.
///
/// Mobipocket dictionaries store labels and markup either as UTF-8 or as
/// single-byte CP1252. The choice is made once when the document is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Cp1252,
}

impl TextEncoding {
    /// Resolves an encoding label (`"utf-8"`, `"cp1252"`, `"latin1"`, ...).
    ///
    /// Labels are matched with the WHATWG rules used by `encoding_rs`, so the
    /// usual Latin-1 aliases map to CP1252. Any other encoding is rejected.
    pub fn from_label(label: &str) -> Option<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())?;
        if encoding == UTF_8 {
            Some(Self::Utf8)
        } else if encoding == WINDOWS_1252 {
            Some(Self::Cp1252)
        } else {
            None
        }
    }

    /// Returns the `encoding_rs` codec backing this encoding.
    pub fn codec(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Cp1252 => WINDOWS_1252,
        }
    }

    /// Decodes bytes into text. Malformed sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        let (text, _) = self.codec().decode_without_bom_handling(bytes);
        text.into_owned()
    }

    pub fn name(self) -> &'static str {
        self.codec().name()
    }
}

/// Read-only metadata describing an opened document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentMetadata {
    pub title: String,
    /// Language tag such as `en`, `de-DE` or `tr`.
    pub language: String,
    pub encoding: TextEncoding,
    pub encrypted: bool,
}

/// An orthographic index entry exactly as the document adapter reports it.
///
/// The label is kept undecoded; the index builder decodes it with the
/// document's encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIndexEntry {
    pub label: Vec<u8>,
    pub start_offset: u32,
    pub byte_length: u32,
}

impl RawIndexEntry {
    pub fn new(label: impl Into<Vec<u8>>, start_offset: u32, byte_length: u32) -> Self {
        Self {
            label: label.into(),
            start_offset,
            byte_length,
        }
    }

    /// Entries at offset zero or with no text carry no definition
    /// (alias-only headwords) and never enter the index.
    pub fn has_definition(&self) -> bool {
        self.start_offset != 0 && self.byte_length != 0
    }
}

/// A single definition fragment: a byte range inside the shared markup buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DictionaryEntry {
    pub start_offset: u32,
    pub byte_length: u32,
}

impl DictionaryEntry {
    /// Exclusive end offset of the fragment.
    pub fn end_offset(&self) -> u64 {
        u64::from(self.start_offset) + u64::from(self.byte_length)
    }

    /// The fragment's byte range, or `None` if it does not fit in `usize`.
    pub fn range(&self) -> Option<Range<usize>> {
        let start = usize::try_from(self.start_offset).ok()?;
        let end = usize::try_from(self.end_offset()).ok()?;
        Some(start..end)
    }
}

impl From<&RawIndexEntry> for DictionaryEntry {
    fn from(raw: &RawIndexEntry) -> Self {
        Self {
            start_offset: raw.start_offset,
            byte_length: raw.byte_length,
        }
    }
}

/// Declared type of an embedded resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Svg,
    Jpeg,
    Gif,
    Png,
    Bmp,
    /// Any other resource (fonts, audio, ...), named by the adapter.
    Other(String),
}

impl ResourceKind {
    /// Whether the renderer's presentation layer can display this kind.
    pub fn is_image(&self) -> bool {
        !matches!(self, ResourceKind::Other(_))
    }

    /// The raster format to decode with. SVG has none.
    pub fn raster_format(&self) -> Option<ImageFormat> {
        match self {
            ResourceKind::Jpeg => Some(ImageFormat::Jpeg),
            ResourceKind::Gif => Some(ImageFormat::Gif),
            ResourceKind::Png => Some(ImageFormat::Png),
            ResourceKind::Bmp => Some(ImageFormat::Bmp),
            ResourceKind::Svg | ResourceKind::Other(_) => None,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResourceKind::Svg => write!(f, "svg"),
            ResourceKind::Jpeg => write!(f, "jpeg"),
            ResourceKind::Gif => write!(f, "gif"),
            ResourceKind::Png => write!(f, "png"),
            ResourceKind::Bmp => write!(f, "bmp"),
            ResourceKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// An embedded resource as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBlob {
    pub kind: ResourceKind,
    pub data: Vec<u8>,
}

impl ResourceBlob {
    pub fn new(kind: ResourceKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }
}
