mod common;

use common::english_document;
use mobidict::dict::completion::substring_pattern;
use mobidict::{CompletionMode, Completer, DictError, DictOptions, DictionaryIndex};

fn dictionary(mode: CompletionMode) -> DictionaryIndex {
    let options = DictOptions::new().with_completion(mode);
    DictionaryIndex::from_source(Box::new(english_document()), options).expect("open dictionary")
}

#[test]
fn prefix_matching_ignores_case() {
    let mut completer = dictionary(CompletionMode::Prefix).completer();

    let lower = completer.set_prefix("cat").to_vec();
    let upper = completer.set_prefix("CAT").to_vec();

    assert_eq!(lower, vec!["cat", "Catalog"]);
    assert_eq!(lower, upper);
    assert_eq!(completer.prefix(), "CAT");
}

#[test]
fn empty_prefix_returns_collated_vocabulary() {
    let dictionary = dictionary(CompletionMode::Prefix);
    let mut completer = dictionary.completer();

    completer.set_prefix("b");
    completer.set_prefix("zzz");
    assert!(completer.matches().is_empty());

    assert_eq!(completer.set_prefix(""), dictionary.words());
}

#[test]
fn matches_keep_vocabulary_order() {
    let mut completer = Completer::new(
        vec!["banana".to_string(), "Band".to_string(), "apple".to_string(), "bandana".to_string()],
        CompletionMode::Prefix,
    );
    assert_eq!(completer.set_prefix("BAN"), ["banana", "Band", "bandana"]);
}

#[test]
fn substring_mode_matches_anywhere() {
    let mut completer = dictionary(CompletionMode::Substring).completer();
    assert_eq!(completer.set_prefix("AT"), ["attic", "Bat", "cat", "Catalog"]);
    assert_eq!(completer.set_prefix("^b"), ["bank", "Bat"]);
}

#[test]
fn invalid_substring_pattern_yields_no_matches() {
    let mut completer = dictionary(CompletionMode::Substring).completer();

    assert!(completer.set_prefix("(cat").is_empty());
    // A bad pattern does not poison later queries.
    assert_eq!(completer.set_prefix("dog"), ["dog"]);

    assert!(matches!(
        substring_pattern("[a-"),
        Err(DictError::InvalidCompletionPattern(_))
    ));
}

#[test]
fn prefix_mode_treats_pattern_characters_literally() {
    let mut completer = Completer::new(
        vec!["c++".to_string(), "c#".to_string(), "cat".to_string()],
        CompletionMode::Prefix,
    );
    assert_eq!(completer.set_prefix("C+"), ["c++"]);
    assert!(completer.set_prefix("(").is_empty());
}

#[test]
fn replacing_words_resets_query() {
    let mut completer = dictionary(CompletionMode::Prefix).completer();
    completer.set_prefix("do");

    completer.set_words(vec!["zebra".to_string(), "yak".to_string()]);
    assert_eq!(completer.prefix(), "");
    assert_eq!(completer.matches(), ["zebra", "yak"]);
    assert_eq!(completer.set_prefix("Y"), ["yak"]);
}

#[test]
fn completers_share_the_dictionary_vocabulary() {
    let dictionary = dictionary(CompletionMode::Prefix);
    let mut completer = dictionary.completer();
    let other = completer.clone();

    assert!(std::ptr::eq(completer.words().as_ptr(), dictionary.words().as_ptr()));
    assert!(std::ptr::eq(other.words().as_ptr(), dictionary.words().as_ptr()));

    let everything = completer.set_prefix("");
    assert_eq!(everything.len(), 6);
    assert_eq!(everything.get(2), Some("Bat"));
    assert_eq!(everything.get(6), None);

    let narrowed = completer.set_prefix("ba");
    assert_eq!(narrowed.iter().collect::<Vec<_>>(), vec!["bank", "Bat"]);
    assert_eq!(narrowed.get(1), Some("Bat"));
}
