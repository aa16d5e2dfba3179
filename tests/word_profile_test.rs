mod helpers;

use helpers::{append_raw, message, test_store, write_stopwords};
use zidek::analysis::words::build_word_profile;
use zidek::error::AnalysisError;

#[test]
fn stopwords_are_dropped_from_profile() {
    let (tmp, store) = test_store();
    let path = store.log_path("u1", "room_1").unwrap();
    append_raw(&path, &[r#"{"user_id":"u1","content":"hello world hello"}"#]);
    let stopwords = write_stopwords(tmp.path(), &["world"]);

    let profile = build_word_profile(&store, "u1", "room_1", &stopwords).unwrap();
    assert_eq!(profile.total_words, 2);
    assert_eq!(profile.word_freq, vec![("hello".to_string(), 1.0)]);
}

#[test]
fn nonexistent_log_gives_empty_profile_without_stopwords() {
    let (tmp, store) = test_store();
    let missing = tmp.path().join("no-such-stopwords.txt");

    let profile = build_word_profile(&store, "ghost", "room_1", &missing).unwrap();
    assert_eq!(profile.total_words, 0);
    assert!(profile.word_freq.is_empty());
}

#[test]
fn missing_stopwords_is_an_error_once_there_is_text() {
    let (tmp, store) = test_store();
    store.append("u1", "room_1", &message("u1", "some text", vec![], 1)).unwrap();

    let err = build_word_profile(&store, "u1", "room_1", &tmp.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, AnalysisError::StopwordsNotFound(_)));
}

#[test]
fn frequencies_sum_to_one() {
    let (tmp, store) = test_store();
    let texts = [
        "The quick brown fox jumps over the lazy dog",
        "A dog and a cat, and another dog!",
        "Seven sevens: seven 7 seven",
    ];
    for (i, text) in texts.iter().enumerate() {
        store.append("u1", "room_1", &message("u1", text, vec![], i as i64)).unwrap();
    }
    let stopwords = write_stopwords(tmp.path(), &["the", "a", "and"]);

    let profile = build_word_profile(&store, "u1", "room_1", &stopwords).unwrap();
    let sum: f64 = profile.word_freq.iter().map(|(_, f)| f).sum();
    assert!((sum - 1.0).abs() < 1e-4, "sum was {sum}");
    assert_eq!(profile.word_freq[0].0, "dog");
    assert!(profile.frequency("the").is_none());
}

#[test]
fn malformed_lines_do_not_affect_counts() {
    let (tmp, store) = test_store();
    let path = store.log_path("u1", "room_1").unwrap();
    append_raw(
        &path,
        &[r#"{"content":"alpha beta"}"#, "{broken", r#"{"content":"alpha"}"#],
    );
    let stopwords = write_stopwords(tmp.path(), &[]);

    let profile = build_word_profile(&store, "u1", "room_1", &stopwords).unwrap();
    assert_eq!(profile.total_words, 3);
    assert_eq!(profile.word_freq[0], ("alpha".to_string(), 0.666667));
}

#[test]
fn profile_serializes_as_ordered_map() {
    let (tmp, store) = test_store();
    let path = store.log_path("u1", "room_1").unwrap();
    append_raw(&path, &[r#"{"content":"b b a"}"#]);
    let stopwords = write_stopwords(tmp.path(), &[]);

    let profile = build_word_profile(&store, "u1", "room_1", &stopwords).unwrap();
    let json = serde_json::to_string(&profile).unwrap();
    assert!(json.contains(r#""word_freq":{"b":0.666667,"a":0.333333}"#), "{json}");
}
