mod common;

use std::path::Path;

use common::{english_document, metadata, Fixture};
use mobidict::{
    DictError, DictOptions, DictionaryEntry, DictionaryIndex, DocumentError, DocumentSource,
    MemoryDocument, RawIndexEntry, TextEncoding, WordIndex,
};

fn entry(start_offset: u32, byte_length: u32) -> DictionaryEntry {
    DictionaryEntry { start_offset, byte_length }
}

#[test]
fn entries_without_definition_are_dropped() {
    let raw = vec![
        RawIndexEntry::new("Run", 100, 50),
        RawIndexEntry::new("run", 100, 50),
        RawIndexEntry::new("Jump", 0, 10),
        RawIndexEntry::new("Leap", 20, 0),
        RawIndexEntry::new("walk", 300, 12),
    ];
    let index = WordIndex::build(raw, TextEncoding::Utf8).expect("build index");

    let words: Vec<&str> = index.headwords().collect();
    assert_eq!(words, vec!["Run", "run", "walk"]);
    assert!(!index.contains("Jump"), "zero-offset entry must be skipped");
    assert!(!index.contains("Leap"), "zero-length entry must be skipped");
    assert_eq!(index.skipped(), 2);
}

#[test]
fn index_without_usable_entries_is_corrupt() {
    let raw = vec![
        RawIndexEntry::new("Jump", 0, 10),
        RawIndexEntry::new("Leap", 20, 0),
    ];
    assert!(matches!(
        WordIndex::build(raw, TextEncoding::Utf8),
        Err(DictError::CorruptIndex)
    ));
    assert!(matches!(
        WordIndex::build(Vec::new(), TextEncoding::Utf8),
        Err(DictError::CorruptIndex)
    ));
}

#[test]
fn repeated_labels_accumulate_fragments_in_file_order() {
    let raw = vec![
        RawIndexEntry::new("bank", 10, 5),
        RawIndexEntry::new("bat", 20, 5),
        RawIndexEntry::new("bank", 40, 7),
        RawIndexEntry::new("Bank", 60, 3),
    ];
    let index = WordIndex::build(raw, TextEncoding::Utf8).expect("build index");

    assert_eq!(index.get("bank"), Some(&[entry(10, 5), entry(40, 7)][..]));
    assert_eq!(index.get("Bank"), Some(&[entry(60, 3)][..]));
    assert_eq!(index.headwords().collect::<Vec<_>>(), vec!["bank", "bat", "Bank"]);
    assert_eq!(index.len(), 3);
    assert_eq!(index.fragment_count(), 4);
}

#[test]
fn labels_are_decoded_with_document_encoding() {
    let raw = vec![RawIndexEntry::new(&b"caf\xe9"[..], 10, 4)];

    let cp1252 = WordIndex::build(raw.clone(), TextEncoding::Cp1252).expect("cp1252 index");
    assert!(cp1252.contains("café"));

    let utf8 = WordIndex::build(raw, TextEncoding::Utf8).expect("utf-8 index");
    assert!(utf8.contains("caf\u{FFFD}"));
}

#[test]
fn build_is_deterministic() {
    let document = english_document();
    let first = WordIndex::build(document.orthographic_entries(), TextEncoding::Utf8).expect("first build");
    let second = WordIndex::build(document.orthographic_entries(), TextEncoding::Utf8).expect("second build");

    let a: Vec<(String, Vec<DictionaryEntry>)> =
        first.iter().map(|(w, e)| (w.to_string(), e.to_vec())).collect();
    let b: Vec<(String, Vec<DictionaryEntry>)> =
        second.iter().map(|(w, e)| (w.to_string(), e.to_vec())).collect();
    assert_eq!(a, b);
}

#[test]
fn vocabulary_is_collated() {
    let dictionary =
        DictionaryIndex::from_source(Box::new(english_document()), DictOptions::new()).expect("open");
    assert_eq!(
        dictionary.words(),
        &["attic", "bank", "Bat", "cat", "Catalog", "dog"]
    );
    assert!(!dictionary.contains("doggy"));
    assert_eq!(dictionary.title(), "Tiny English");
}

#[test]
fn vocabulary_follows_document_language() {
    let mut fixture = Fixture::new();
    for word in ["Strauch", "Straße", "Strasse", "öl", "zebra"] {
        fixture.define(word, "<b>entry</b>");
    }
    let german = fixture.document(metadata("Deutsch", "de-DE", TextEncoding::Utf8));
    let dictionary = DictionaryIndex::from_source(Box::new(german), DictOptions::new()).expect("open");
    assert_eq!(
        dictionary.words(),
        &["öl", "Strasse", "Straße", "Strauch", "zebra"]
    );

    let mut fixture = Fixture::new();
    for word in ["öl", "zebra", "apa"] {
        fixture.define(word, "<b>entry</b>");
    }
    let swedish = fixture.document(metadata("Svenska", "sv", TextEncoding::Utf8));
    let dictionary = DictionaryIndex::from_source(Box::new(swedish), DictOptions::new()).expect("open");
    assert_eq!(dictionary.words(), &["apa", "zebra", "öl"]);
}

#[test]
fn encoding_override_replaces_declared_encoding() {
    let mut fixture = Fixture::new();
    fixture.define_bytes(b"na\xefve", b"<b>na\xefve</b>");
    let document = fixture.document(metadata("Mislabeled", "fr", TextEncoding::Utf8));

    let options = DictOptions::new().with_encoding_label("cp1252");
    let dictionary = DictionaryIndex::from_source(Box::new(document), options).expect("open");

    assert_eq!(dictionary.encoding(), TextEncoding::Cp1252);
    assert_eq!(dictionary.words(), &["naïve"]);
}

#[test]
fn adapter_errors_propagate_unchanged() {
    let opener = |_: &Path, key: Option<&str>| -> Result<Box<dyn DocumentSource>, DocumentError> {
        match key {
            None => Err(DocumentError::Encrypted),
            Some(_) => Err(DocumentError::Unsupported("no orthographic index".to_string())),
        }
    };

    let err = DictionaryIndex::open(&opener, "locked.azw", DictOptions::new()).expect_err("encrypted");
    assert!(matches!(err, DictError::Document(DocumentError::Encrypted)));

    let err = DictionaryIndex::open(&opener, "book.mobi", DictOptions::new().with_decryption_key("B001 XXXX"))
        .expect_err("unsupported");
    assert!(matches!(err, DictError::Document(DocumentError::Unsupported(_))));
}

#[test]
fn decryption_key_reaches_adapter() {
    let opener = |_: &Path, key: Option<&str>| -> Result<Box<dyn DocumentSource>, DocumentError> {
        if key != Some("B001XXXX") {
            return Err(DocumentError::Encrypted);
        }
        Ok(Box::new(english_document()))
    };

    let options = DictOptions::new().with_decryption_key("B001 XXXX");
    let dictionary = DictionaryIndex::open(&opener, "locked.azw", options).expect("unlock");
    assert_eq!(dictionary.words().len(), 6);
}

#[test]
fn document_without_headwords_fails_to_open() {
    let document = MemoryDocument::new(metadata("Empty", "en", TextEncoding::Utf8), b"<html></html>".to_vec())
        .with_entry("ghost", 0, 0);
    let err = DictionaryIndex::from_source(Box::new(document), DictOptions::new()).expect_err("corrupt");
    assert!(matches!(err, DictError::CorruptIndex));
}

#[test]
fn dictionary_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DictionaryIndex>();
}
