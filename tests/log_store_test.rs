mod helpers;

use helpers::{append_raw, message, test_store};
use zidek::memory::log::read_path;
use zidek::memory::types::LogEntry;

#[test]
fn append_then_read_preserves_order() {
    let (_tmp, store) = test_store();
    let sent: Vec<_> = (0..5)
        .map(|i| message("abc", &format!("message {i}"), vec![i as f32, 1.0], 100 - i))
        .collect();
    for node in &sent {
        store.append("abc", "room_1", node).unwrap();
    }

    let read = store.read_all("abc", "room_1").unwrap();
    assert_eq!(read.nodes, sent);
    assert!(read.skipped.is_empty());
}

#[test]
fn history_is_sorted_by_timestamp() {
    let (_tmp, store) = test_store();
    store.append("abc", "room_1", &message("abc", "late", vec![], 30)).unwrap();
    store.append("abc", "room_1", &message("abc", "early", vec![], 10)).unwrap();
    store.append("abc", "room_1", &message("abc", "middle", vec![], 20)).unwrap();

    let contents: Vec<String> = store
        .history("abc", "room_1")
        .unwrap()
        .nodes
        .into_iter()
        .map(|n| n.content)
        .collect();
    assert_eq!(contents, vec!["early", "middle", "late"]);
}

#[test]
fn malformed_line_is_skipped_and_reported() {
    let (_tmp, store) = test_store();
    store.append("abc", "room_1", &message("abc", "one", vec![], 1)).unwrap();
    let path = store.log_path("abc", "room_1").unwrap();
    append_raw(&path, &["{not json", "", r#"{"user_id":"abc"}"#]);
    store.append("abc", "room_1", &message("abc", "two", vec![], 2)).unwrap();

    let read = store.read_all("abc", "room_1").unwrap();
    let contents: Vec<&str> = read.nodes.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two"]);

    // the blank line is not damage; the record without content is
    let lines: Vec<usize> = read.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn minimal_record_loads_with_defaults() {
    let (_tmp, store) = test_store();
    let path = store.log_path("u1", "room_1").unwrap();
    append_raw(&path, &[r#"{"user_id":"u1","content":"hello world hello"}"#]);

    let read = read_path(&path).unwrap();
    assert_eq!(read.len(), 1);
    let node = &read.nodes[0];
    assert_eq!(node.content, "hello world hello");
    assert!(node.embedding.is_empty());
    assert_eq!(node.timestamp, 0);
}

#[test]
fn missing_log_reads_as_empty() {
    let (_tmp, store) = test_store();
    let read = store.read_all("nobody", "room_1").unwrap();
    assert!(read.is_empty());
    assert!(read.skipped.is_empty());
    assert_eq!(store.entries("nobody", "room_1").unwrap().count(), 0);
}

#[test]
fn lazy_entries_carry_line_numbers() {
    let (_tmp, store) = test_store();
    let path = store.log_path("abc", "room_1").unwrap();
    append_raw(&path, &["", r#"{"content":"a"}"#, "garbage"]);

    let entries: Vec<LogEntry> = store
        .entries("abc", "room_1")
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(entries.len(), 2);
    assert!(matches!(&entries[0], LogEntry::Node { line: 2, node } if node.content == "a"));
    assert!(matches!(&entries[1], LogEntry::Skipped(s) if s.line == 3));
}

#[test]
fn rooms_and_users_are_discovered() {
    let (_tmp, store) = test_store();
    store.append("bob", "lobby", &message("bob", "hi", vec![], 1)).unwrap();
    store.append("amy", "room_1", &message("amy", "hey", vec![], 1)).unwrap();
    store.append("amy", "lobby", &message("amy", "yo", vec![], 1)).unwrap();
    store.append("amy", "lobby", &message("amy_alt", "alt", vec![], 2)).unwrap();

    assert_eq!(store.users().unwrap(), vec!["amy", "bob"]);
    assert_eq!(store.rooms("amy").unwrap(), vec!["lobby", "room_1"]);
    assert_eq!(store.users_in_room("lobby").unwrap(), vec!["amy", "amy_alt", "bob"]);
}

#[test]
fn path_traversal_is_rejected() {
    let (_tmp, store) = test_store();
    assert!(store.log_path("../etc", "room_1").is_err());
    assert!(store.log_path("abc", "a/b").is_err());
    assert!(store.log_path("", "room_1").is_err());
}

#[test]
fn concurrent_appends_do_not_interleave() {
    let (_tmp, store) = test_store();
    let root = store.root().to_path_buf();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let root = root.clone();
            std::thread::spawn(move || {
                let store = zidek::memory::log::LogStore::new(root);
                for i in 0..25 {
                    let content = format!("thread {t} message {i} {}", "x".repeat(200));
                    store
                        .append("abc", "room_1", &message("abc", &content, vec![0.5; 32], i))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let read = store.read_all("abc", "room_1").unwrap();
    assert_eq!(read.len(), 100);
    assert!(read.skipped.is_empty());
}
