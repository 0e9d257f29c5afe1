use corpus_core::tokenizer::{char_count, term_frequencies, tokenize};

#[test]
fn it_lowercases_and_strips_punctuation() {
    let words = tokenize("Running, RUNNERS run! Really?");
    assert_eq!(words, vec!["running", "runners", "run", "really"]);
}

#[test]
fn it_keeps_stopwords_and_inflections() {
    let words = tokenize("The dogs and the dog");
    assert_eq!(words, vec!["the", "dogs", "and", "the", "dog"]);
}

#[test]
fn it_splits_on_spaces_only() {
    // Tabs and newlines are not delimiters.
    assert_eq!(tokenize("a\tb c\nd"), vec!["a\tb", "c\nd"]);
}

#[test]
fn it_drops_empty_tokens() {
    assert_eq!(tokenize("  two   spaces "), vec!["two", "spaces"]);
    assert!(tokenize("?! ... ,").is_empty());
    assert!(tokenize("").is_empty());
}

#[test]
fn frequencies_count_each_term_once() {
    let toks = tokenize("Months, months and MONTHS.");
    assert_eq!(term_frequencies(&toks), vec![("months".to_string(), 3), ("and".to_string(), 1)]);
}

#[test]
fn char_count_matches_known_values() {
    assert_eq!(char_count("Hello, World!"), 10);
    assert_eq!(char_count("baseball in the summer"), 19);
    assert_eq!(char_count("Ünïcode: ok"), 9);
}
