#![allow(dead_code)]

use std::io::Cursor;

use mobidict::{DocumentMetadata, MemoryDocument, RawIndexEntry, TextEncoding};

/// Builds a markup buffer and its orthographic index side by side.
pub struct Fixture {
    markup: Vec<u8>,
    entries: Vec<RawIndexEntry>,
}

impl Fixture {
    pub fn new() -> Self {
        // Offset 0 means "no definition", so real entries never start there.
        Self {
            markup: b"<html><head><guide></guide></head><body>".to_vec(),
            entries: Vec::new(),
        }
    }

    /// Appends `body` to the markup and indexes it under `word`. Returns its offset.
    pub fn define(&mut self, word: &str, body: &str) -> u32 {
        self.define_bytes(word.as_bytes(), body.as_bytes())
    }

    pub fn define_bytes(&mut self, word: &[u8], body: &[u8]) -> u32 {
        let offset = self.markup.len() as u32;
        self.markup.extend_from_slice(body);
        self.markup.extend_from_slice(b"<mbp:pagebreak/>");
        self.entries
            .push(RawIndexEntry::new(word, offset, body.len() as u32));
        offset
    }

    /// Indexes `word` without a definition (an alias-only headword).
    pub fn alias(&mut self, word: &str) {
        self.entries.push(RawIndexEntry::new(word, 0, 0));
    }

    pub fn entries(&self) -> &[RawIndexEntry] {
        &self.entries
    }

    pub fn document(self, metadata: DocumentMetadata) -> MemoryDocument {
        let mut markup = self.markup;
        markup.extend_from_slice(b"</body></html>");
        MemoryDocument::new(metadata, markup).with_entries(self.entries)
    }
}

pub fn metadata(title: &str, language: &str, encoding: TextEncoding) -> DocumentMetadata {
    DocumentMetadata {
        title: title.to_string(),
        language: language.to_string(),
        encoding,
        encrypted: false,
    }
}

/// A small English dictionary used across tests.
pub fn english_document() -> MemoryDocument {
    let mut fixture = Fixture::new();
    fixture.define("cat", "<b>cat</b> a small feline. See <a filepos=0000000000>kitten</a>.");
    fixture.define("Bat", "<b>bat</b> a flying mammal.");
    fixture.define("attic", "<b>attic</b> a room below the roof.");
    fixture.define("Catalog", "<b>catalog</b> a list of items.");
    fixture.define("dog", "<b>dog</b> a domestic canine.");
    fixture.alias("doggy");
    fixture.define("bank", "<b>bank</b> 1. the land alongside a river.");
    fixture.define("bank", "<b>bank</b> 2. a financial institution.");
    fixture.document(metadata("Tiny English", "en", TextEncoding::Utf8))
}

pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(2, 3, image::Rgb([200, 30, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}
