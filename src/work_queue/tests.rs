use tempfile::TempDir;

use super::{WorkQueue, WorkQueueError};
use crate::pipeline::{ArticleRecord, Document};
use crate::sanitizer::clean;

fn document(title: &str, text: &str) -> Document {
    Document {
        lang: "en".to_string(),
        title: title.to_string(),
        text: text.to_string(),
        en_title: title.to_string(),
    }
}

fn process(document: Document) -> ArticleRecord {
    let text = clean(&document.text);
    ArticleRecord::new(document, text)
}

#[test]
fn writes_all_records() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    let mut work_queue = WorkQueue::new(output.to_str().unwrap().to_owned(), process);
    work_queue
        .queue(document("Paris", "'''Paris''' is in [[France]]."))
        .unwrap();
    work_queue
        .queue(document("Berlin", "{{Infobox}}\n''Berlin''<ref>x</ref>"))
        .unwrap();
    work_queue.queue(document("Empty", "")).unwrap();

    let count = work_queue.wait_for_completion().unwrap();
    assert_eq!(count, 3);

    let contents = std::fs::read_to_string(&output).unwrap();
    let mut records: Vec<ArticleRecord> = serde_json::from_str(&contents).unwrap();
    records.sort_by(|a, b| a.title.cmp(&b.title));

    let cleaned: Vec<_> = records
        .iter()
        .map(|r| (r.title.as_str(), r.text.clone()))
        .collect();
    assert_eq!(
        cleaned,
        vec![
            ("Berlin", vec!["Berlin".to_string()]),
            ("Empty", vec![]),
            ("Paris", vec!["Paris is in France.".to_string()]),
        ]
    );
}

#[test]
fn no_records() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    let work_queue = WorkQueue::new(output.to_str().unwrap().to_owned(), process);
    assert_eq!(work_queue.wait_for_completion().unwrap(), 0);

    let contents = std::fs::read_to_string(&output).unwrap();
    let records: Vec<ArticleRecord> = serde_json::from_str(&contents).unwrap();
    assert!(records.is_empty());
}

#[test]
fn unwritable_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("missing").join("out.json");

    let mut work_queue = WorkQueue::new(output.to_str().unwrap().to_owned(), process);
    // Depending on timing the queue may already be closed
    let _ = work_queue.queue(document("Paris", "Paris"));

    assert!(matches!(
        work_queue.wait_for_completion(),
        Err(WorkQueueError::IoError(_))
    ));
}
